use crate::document::{Color, FontSize, DEFAULT_NODE_COLOR};
use crate::error::EditorError;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_MAX_UNDO_STEPS: usize = 128;
const MAX_INITIAL_NODES: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryConfig {
    /// `None` keeps every snapshot for the lifetime of the session. Must be at
    /// least 1.
    pub max_undo_steps: Option<usize>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_undo_steps: Some(DEFAULT_MAX_UNDO_STEPS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InspectorConfig {
    pub default_color: Color,
    pub default_font_size: FontSize,
}

impl Default for InspectorConfig {
    fn default() -> Self {
        Self {
            default_color: Color::new("#3498db"),
            default_font_size: FontSize::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentConfig {
    pub node_count: usize,
    pub width: f64,
    pub height: f64,
    pub node_color: Color,
    pub font_size: FontSize,
    pub seed: Option<u64>,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            node_count: 10,
            width: 400.0,
            height: 400.0,
            node_color: Color::new(DEFAULT_NODE_COLOR),
            font_size: FontSize::DEFAULT,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub history: HistoryConfig,
    pub inspector: InspectorConfig,
    pub document: DocumentConfig,
}

impl Config {
    /// Checks the values a file or command line can set out of range.
    pub fn validate(&self) -> Result<(), EditorError> {
        self.history.validate()?;
        self.document.validate()
    }
}

impl HistoryConfig {
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.max_undo_steps == Some(0) {
            return Err(EditorError::InvalidConfig {
                field: "history.maxUndoSteps",
                message: "must be at least 1; use \"unbounded\" to lift the limit".to_string(),
            });
        }
        Ok(())
    }
}

impl DocumentConfig {
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.node_count > MAX_INITIAL_NODES {
            return Err(EditorError::InvalidConfig {
                field: "document.nodeCount",
                message: format!("at most {MAX_INITIAL_NODES} nodes, got {}", self.node_count),
            });
        }
        extent_field("document.width", self.width)?;
        extent_field("document.height", self.height)?;
        Ok(())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    history: Option<HistoryConfigFile>,
    inspector: Option<InspectorConfigFile>,
    document: Option<DocumentConfigFile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HistoryConfigFile {
    max_undo_steps: Option<UndoLimit>,
}

/// `maxUndoSteps` accepts a count or the string `"unbounded"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum UndoLimit {
    Steps(usize),
    Keyword(String),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InspectorConfigFile {
    default_color: Option<String>,
    default_font_size: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DocumentConfigFile {
    node_count: Option<usize>,
    width: Option<f64>,
    height: Option<f64>,
    node_color: Option<String>,
    font_size: Option<i64>,
    seed: Option<u64>,
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let contents = std::fs::read_to_string(path)?;
    let is_json5 = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json5"))
        .unwrap_or(false);
    let config = parse_config(&contents, is_json5)?;
    Ok(config)
}

pub fn parse_config(contents: &str, is_json5: bool) -> Result<Config, EditorError> {
    let parsed: ConfigFile = if is_json5 {
        json5::from_str(contents)?
    } else {
        serde_json::from_str(contents)?
    };

    let mut config = Config::default();

    if let Some(history) = parsed.history {
        match history.max_undo_steps {
            Some(UndoLimit::Steps(steps)) => config.history.max_undo_steps = Some(steps),
            Some(UndoLimit::Keyword(word)) if word == "unbounded" => {
                config.history.max_undo_steps = None;
            }
            Some(UndoLimit::Keyword(word)) => {
                return Err(EditorError::InvalidConfig {
                    field: "history.maxUndoSteps",
                    message: format!("expected a number or \"unbounded\", got {word:?}"),
                });
            }
            None => {}
        }
    }

    if let Some(inspector) = parsed.inspector {
        if let Some(v) = inspector.default_color {
            config.inspector.default_color = Color::new(v);
        }
        if let Some(v) = inspector.default_font_size {
            config.inspector.default_font_size = font_size_field("inspector.defaultFontSize", v)?;
        }
    }

    if let Some(document) = parsed.document {
        if let Some(v) = document.node_count {
            config.document.node_count = v;
        }
        if let Some(v) = document.width {
            config.document.width = v;
        }
        if let Some(v) = document.height {
            config.document.height = v;
        }
        if let Some(v) = document.node_color {
            config.document.node_color = Color::new(v);
        }
        if let Some(v) = document.font_size {
            config.document.font_size = font_size_field("document.fontSize", v)?;
        }
        if document.seed.is_some() {
            config.document.seed = document.seed;
        }
    }

    config.validate()?;
    Ok(config)
}

fn font_size_field(field: &'static str, value: i64) -> Result<FontSize, EditorError> {
    FontSize::new(value).ok_or_else(|| EditorError::InvalidConfig {
        field,
        message: format!(
            "font size must be within {}..={}, got {value}",
            FontSize::MIN,
            FontSize::MAX
        ),
    })
}

fn extent_field(field: &'static str, value: f64) -> Result<(), EditorError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EditorError::InvalidConfig {
            field,
            message: format!("expected a finite non-negative number, got {value}"),
        })
    }
}
