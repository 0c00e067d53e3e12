use crate::change::{EdgeDelta, NodeDelta};
use crate::document::{Edge, Node, Position};
use crate::editor::Editor;
use crate::error::EditorError;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static COMMAND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([a-z]+)(?:\s+(.*))?$").unwrap());
static ADD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\S+)\s+(\S+)\s+(\S+)(?:\s+"((?:[^"\\]|\\.)*)")?$"#).unwrap()
});

/// One line of an edit script, already in the engine's vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Select(String),
    Color(String),
    FontSize(i64),
    Apply,
    Active(String),
    Nodes(NodeDelta),
    Edges(EdgeDelta),
    Undo,
    Redo,
    Prune,
}

pub fn parse_script(input: &str) -> Result<Vec<Command>, EditorError> {
    let mut commands = Vec::new();
    for (idx, raw_line) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }
        commands.push(parse_line(line, line_no)?);
    }
    Ok(commands)
}

fn strip_comment(line: &str) -> &str {
    // `#` also starts hex colors, so a trailing comment needs whitespace on both sides.
    if line.trim_start().starts_with('#') {
        return "";
    }
    let bytes = line.as_bytes();
    let mut in_quotes = false;
    let mut escaped = false;
    for (pos, &byte) in bytes.iter().enumerate() {
        if escaped {
            escaped = false;
            continue;
        }
        match byte {
            b'\\' if in_quotes => escaped = true,
            b'"' => in_quotes = !in_quotes,
            b'#' if !in_quotes => {
                let after_space = pos > 0 && bytes[pos - 1].is_ascii_whitespace();
                let before_space = bytes.get(pos + 1).is_none_or(|b| b.is_ascii_whitespace());
                if after_space && before_space {
                    return &line[..pos];
                }
            }
            _ => {}
        }
    }
    line
}

fn parse_line(line: &str, line_no: usize) -> Result<Command, EditorError> {
    let caps = COMMAND_RE
        .captures(line)
        .ok_or_else(|| EditorError::script(line_no, format!("unrecognized line: {line}")))?;
    let keyword = &caps[1];
    let rest = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
    let args: Vec<&str> = rest.split_whitespace().collect();

    let command = match keyword {
        "select" => Command::Select(single(&args, keyword, line_no)?.to_string()),
        "active" => Command::Active(single(&args, keyword, line_no)?.to_string()),
        "color" => Command::Color(single(&args, keyword, line_no)?.to_string()),
        "font" => Command::FontSize(parse_int(single(&args, keyword, line_no)?, line_no)?),
        "apply" => no_args(&args, keyword, line_no, Command::Apply)?,
        "undo" => no_args(&args, keyword, line_no, Command::Undo)?,
        "redo" => no_args(&args, keyword, line_no, Command::Redo)?,
        "prune" => no_args(&args, keyword, line_no, Command::Prune)?,
        "move" => {
            let [id, x, y] = exact::<3>(&args, keyword, line_no)?;
            Command::Nodes(NodeDelta::Move {
                id: id.to_string(),
                position: Position::new(parse_float(x, line_no)?, parse_float(y, line_no)?),
            })
        }
        "remove" => Command::Nodes(NodeDelta::Remove {
            id: single(&args, keyword, line_no)?.to_string(),
        }),
        "add" => {
            let caps = ADD_RE.captures(rest).ok_or_else(|| {
                EditorError::script(line_no, "expected: add <id> <x> <y> [\"label\"]")
            })?;
            let position = Position::new(
                parse_float(&caps[2], line_no)?,
                parse_float(&caps[3], line_no)?,
            );
            let mut node = Node::new(&caps[1], position);
            if let Some(label) = caps.get(4) {
                node = node.with_label(label.as_str().replace("\\\"", "\""));
            }
            Command::Nodes(NodeDelta::Add { node })
        }
        "connect" => {
            let [id, source, target] = exact::<3>(&args, keyword, line_no)?;
            Command::Edges(EdgeDelta::Add {
                edge: Edge::new(id, source, target),
            })
        }
        "disconnect" => Command::Edges(EdgeDelta::Remove {
            id: single(&args, keyword, line_no)?.to_string(),
        }),
        other => {
            return Err(EditorError::script(
                line_no,
                format!("unknown command: {other}"),
            ));
        }
    };
    Ok(command)
}

fn exact<'a, const N: usize>(
    args: &[&'a str],
    keyword: &str,
    line_no: usize,
) -> Result<[&'a str; N], EditorError> {
    <[&str; N]>::try_from(args).map_err(|_| {
        EditorError::script(
            line_no,
            format!("{keyword} takes {N} argument(s), got {}", args.len()),
        )
    })
}

fn single<'a>(args: &[&'a str], keyword: &str, line_no: usize) -> Result<&'a str, EditorError> {
    let [arg] = exact::<1>(args, keyword, line_no)?;
    Ok(arg)
}

fn no_args(
    args: &[&str],
    keyword: &str,
    line_no: usize,
    command: Command,
) -> Result<Command, EditorError> {
    exact::<0>(args, keyword, line_no)?;
    Ok(command)
}

fn parse_float(token: &str, line_no: usize) -> Result<f64, EditorError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| EditorError::script(line_no, format!("expected a number, got {token:?}")))
}

fn parse_int(token: &str, line_no: usize) -> Result<i64, EditorError> {
    token
        .parse::<i64>()
        .map_err(|_| EditorError::script(line_no, format!("expected an integer, got {token:?}")))
}

pub fn run_script(editor: &mut Editor, commands: &[Command]) {
    for command in commands {
        trace!(?command, "running script command");
        match command {
            Command::Select(id) => editor.select_node(id),
            Command::Color(value) => editor.edit_pending_color(value.as_str()),
            Command::FontSize(size) => editor.edit_pending_font_size(*size),
            Command::Apply => editor.commit_attributes(),
            Command::Active(id) => editor.set_active_node(id.as_str()),
            Command::Nodes(delta) => editor.apply_node_deltas(std::slice::from_ref(delta)),
            Command::Edges(delta) => editor.apply_edge_deltas(std::slice::from_ref(delta)),
            Command::Undo => {
                editor.undo();
            }
            Command::Redo => {
                editor.redo();
            }
            Command::Prune => editor.prune_dangling_edges(),
        }
    }
}
