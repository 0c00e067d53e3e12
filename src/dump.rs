use crate::change::dangling_edges;
use crate::editor::Editor;
use crate::error::EditorError;
use anyhow::Result;
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DumpMode {
    /// The present snapshot, `{nodes, edges}`.
    Present,
    /// The whole history, `{past, present, future}`.
    History,
    /// Counts and flags describing the session.
    Summary,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub selected: Vec<String>,
    pub dangling_edges: Vec<String>,
    pub undo_depth: usize,
    pub redo_depth: usize,
    pub can_undo: bool,
    pub can_redo: bool,
    pub active_node_id: Option<String>,
}

impl SessionSummary {
    pub fn from_editor(editor: &Editor) -> Self {
        let present = editor.present();
        let history = editor.history();
        Self {
            node_count: present.nodes.len(),
            edge_count: present.edges.len(),
            selected: present.selected_nodes().map(|node| node.id.clone()).collect(),
            dangling_edges: dangling_edges(present)
                .into_iter()
                .map(|edge| edge.id.clone())
                .collect(),
            undo_depth: history.past.len(),
            redo_depth: history.future.len(),
            can_undo: editor.can_undo(),
            can_redo: editor.can_redo(),
            active_node_id: editor.inspector().active_node_id().map(str::to_string),
        }
    }
}

pub fn dump_json(editor: &Editor, mode: DumpMode, pretty: bool) -> Result<String, EditorError> {
    let value = match mode {
        DumpMode::Present => serde_json::to_value(editor.present())?,
        DumpMode::History => serde_json::to_value(editor.history())?,
        DumpMode::Summary => serde_json::to_value(SessionSummary::from_editor(editor))?,
    };
    let json = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(json)
}

pub fn write_output(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))?;
        }
        None => {
            println!("{}", json);
        }
    }
    Ok(())
}
