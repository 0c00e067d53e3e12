//! The editing session a host UI talks to.
//!
//! An [`Editor`] owns the [`HistoryState`] and the inspector's draft buffer.
//! Every change to the document goes through [`Editor::dispatch`], which runs
//! the bounded history transition; the UI reads [`Editor::present`] back and
//! renders it.

use crate::change::{self, EdgeDelta, NodeDelta};
use crate::config::{Config, HistoryConfig, InspectorConfig};
use crate::document::{Color, FontSize, Snapshot, initial_document};
use crate::history::{Action, HistoryState, transition_bounded};
use tracing::debug;

/// Attribute edits staged for the active node. Not part of history.
#[derive(Debug, Clone, PartialEq)]
pub struct Inspector {
    active_node_id: Option<String>,
    pending_color: Color,
    pending_font_size: FontSize,
    staged: bool,
}

impl Inspector {
    pub fn new(config: &InspectorConfig) -> Self {
        Self {
            active_node_id: None,
            pending_color: config.default_color.clone(),
            pending_font_size: config.default_font_size,
            staged: false,
        }
    }

    pub fn active_node_id(&self) -> Option<&str> {
        self.active_node_id.as_deref()
    }

    pub fn pending_color(&self) -> &Color {
        &self.pending_color
    }

    pub fn pending_font_size(&self) -> FontSize {
        self.pending_font_size
    }

    /// True while the buffer holds edits that have not been committed yet.
    pub fn has_staged_edits(&self) -> bool {
        self.staged
    }

    pub fn set_color(&mut self, color: impl Into<Color>) {
        self.pending_color = color.into();
        self.staged = true;
    }

    pub fn set_font_size(&mut self, size: i64) {
        self.pending_font_size = FontSize::clamped(size);
        self.staged = true;
    }

    pub fn set_active(&mut self, node_id: Option<String>) {
        self.active_node_id = node_id.filter(|id| !id.is_empty());
    }

    // Staged edits win over the node's stored attributes.
    fn load(&mut self, node_id: &str, color: &Color, font_size: FontSize) {
        self.active_node_id = Some(node_id.to_string());
        if !self.staged {
            self.pending_color = color.clone();
            self.pending_font_size = font_size;
        }
    }
}

#[derive(Debug, Clone)]
pub struct Editor {
    history: HistoryState,
    limits: HistoryConfig,
    inspector: Inspector,
}

impl Editor {
    pub fn new(present: Snapshot, config: &Config) -> Self {
        Self {
            history: HistoryState::new(present),
            limits: config.history.clone(),
            inspector: Inspector::new(&config.inspector),
        }
    }

    /// Starts a session on the configured initial layout.
    pub fn from_config(config: &Config) -> Self {
        Self::new(initial_document(&config.document), config)
    }

    pub fn present(&self) -> &Snapshot {
        &self.history.present
    }

    pub fn history(&self) -> &HistoryState {
        &self.history
    }

    pub fn inspector(&self) -> &Inspector {
        &self.inspector
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn dispatch(&mut self, action: Action) {
        let state = std::mem::take(&mut self.history);
        self.history = transition_bounded(state, action, &self.limits);
    }

    pub fn commit(&mut self, snapshot: Snapshot) {
        self.dispatch(Action::Commit(snapshot));
    }

    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.dispatch(Action::Undo);
        true
    }

    /// Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.dispatch(Action::Redo);
        true
    }

    pub fn apply_node_deltas(&mut self, deltas: &[NodeDelta]) {
        if deltas.is_empty() {
            return;
        }
        let next = change::apply_node_deltas(self.present(), deltas);
        self.commit(next);
    }

    pub fn apply_edge_deltas(&mut self, deltas: &[EdgeDelta]) {
        if deltas.is_empty() {
            return;
        }
        let next = change::apply_edge_deltas(self.present(), deltas);
        self.commit(next);
    }

    /// Commits a copy of the present without dangling edges.
    pub fn prune_dangling_edges(&mut self) {
        let next = change::prune_dangling_edges(self.present());
        self.commit(next);
    }

    /// Makes `node_id` the active node and records the selection as its own
    /// undo step. Unknown ids leave the session untouched.
    pub fn select_node(&mut self, node_id: &str) {
        let Some(node) = self.present().node(node_id) else {
            debug!(%node_id, "select ignored, node not found");
            return;
        };
        let (color, font_size) = (node.color.clone(), node.font_size);
        self.inspector.load(node_id, &color, font_size);
        let next = change::set_selection(self.present(), node_id);
        self.commit(next);
    }

    /// Points the inspector at `node_id` without selecting it on the canvas.
    pub fn set_active_node(&mut self, node_id: impl Into<String>) {
        self.inspector.set_active(Some(node_id.into()));
    }

    pub fn edit_pending_color(&mut self, color: impl Into<Color>) {
        self.inspector.set_color(color);
    }

    pub fn edit_pending_font_size(&mut self, size: i64) {
        self.inspector.set_font_size(size);
    }

    /// Writes the draft buffer onto the active node as one undo step.
    pub fn commit_attributes(&mut self) {
        let Some(node_id) = self.inspector.active_node_id.clone() else {
            return;
        };
        let next = change::apply_attribute_edit(
            self.present(),
            &node_id,
            &self.inspector.pending_color,
            self.inspector.pending_font_size,
        );
        self.commit(next);
        self.inspector.staged = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Node, Position};

    fn editor_with(nodes: &[&str]) -> Editor {
        let snapshot = Snapshot::new(
            nodes
                .iter()
                .map(|id| Node::new(*id, Position::default()))
                .collect(),
            Vec::new(),
        );
        Editor::new(snapshot, &Config::default())
    }

    #[test]
    fn inspector_starts_from_config_defaults() {
        let editor = editor_with(&["a"]);
        assert_eq!(editor.inspector().pending_color().as_str(), "#3498db");
        assert_eq!(editor.inspector().pending_font_size().get(), 16);
        assert_eq!(editor.inspector().active_node_id(), None);
    }

    #[test]
    fn select_loads_node_attributes_into_clean_buffer() {
        let snapshot = Snapshot::new(
            vec![Node::new("a", Position::default())
                .with_color("#123456")
                .with_font_size(FontSize::clamped(22))],
            Vec::new(),
        );
        let mut editor = Editor::new(snapshot, &Config::default());
        editor.select_node("a");
        assert_eq!(editor.inspector().active_node_id(), Some("a"));
        assert_eq!(editor.inspector().pending_color().as_str(), "#123456");
        assert_eq!(editor.inspector().pending_font_size().get(), 22);
    }

    #[test]
    fn select_unknown_node_changes_nothing() {
        let mut editor = editor_with(&["a"]);
        editor.select_node("zz");
        assert!(!editor.can_undo());
        assert_eq!(editor.inspector().active_node_id(), None);
    }

    #[test]
    fn draft_edits_do_not_touch_history() {
        let mut editor = editor_with(&["a"]);
        editor.edit_pending_color("#000");
        editor.edit_pending_font_size(100);
        assert!(!editor.can_undo());
        assert_eq!(editor.inspector().pending_font_size().get(), 24);
        assert!(editor.inspector().has_staged_edits());
    }

    #[test]
    fn commit_without_active_node_is_noop() {
        let mut editor = editor_with(&["a"]);
        editor.edit_pending_color("#000");
        editor.commit_attributes();
        assert!(!editor.can_undo());
    }

    #[test]
    fn commit_clears_staged_flag() {
        let mut editor = editor_with(&["a", "b"]);
        editor.select_node("a");
        editor.edit_pending_color("#abcdef");
        editor.commit_attributes();
        assert!(!editor.inspector().has_staged_edits());
        assert_eq!(editor.present().node("a").unwrap().color.as_str(), "#abcdef");

        editor.select_node("b");
        assert_eq!(editor.inspector().pending_color().as_str(), "#ffffff");
    }

    #[test]
    fn typed_active_id_commits_even_when_unknown() {
        let mut editor = editor_with(&["a"]);
        editor.set_active_node("ghost");
        editor.commit_attributes();
        assert_eq!(editor.history().past.len(), 1);
        assert_eq!(editor.present(), &editor.history().past[0]);
    }

    #[test]
    fn empty_delta_batch_commits_nothing() {
        let mut editor = editor_with(&["a"]);
        editor.apply_node_deltas(&[]);
        editor.apply_edge_deltas(&[]);
        assert!(!editor.can_undo());
    }

    #[test]
    fn undo_redo_report_whether_they_moved() {
        let mut editor = editor_with(&["a"]);
        assert!(!editor.undo());
        editor.select_node("a");
        assert!(editor.undo());
        assert!(editor.redo());
        assert!(!editor.redo());
    }

    #[test]
    fn history_limit_is_applied_on_dispatch() {
        let config = Config {
            history: HistoryConfig {
                max_undo_steps: Some(3),
            },
            ..Config::default()
        };
        let mut editor = Editor::new(
            Snapshot::new(vec![Node::new("a", Position::default())], Vec::new()),
            &config,
        );
        for i in 0..10 {
            editor.apply_node_deltas(&[NodeDelta::Move {
                id: "a".to_string(),
                position: Position::new(i as f64, 0.0),
            }]);
        }
        assert_eq!(editor.history().past.len(), 3);
        assert_eq!(editor.present().node("a").unwrap().position.x, 9.0);
    }
}
