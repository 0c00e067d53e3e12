//! Document and history engine for node/edge diagram editors.
//!
//! The UI owns an [`Editor`], feeds it deltas and inspector edits, and renders
//! whatever [`Editor::present`] returns. Undo and redo never recompute a
//! document; they move stored [`Snapshot`]s between the past and future lists.

pub mod change;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod document;
pub mod dump;
pub mod editor;
pub mod error;
pub mod history;
pub mod script;

pub use change::{
    EdgeDelta, NodeDelta, apply_attribute_edit, apply_edge_deltas, apply_node_deltas,
    dangling_edges, prune_dangling_edges, set_selection,
};
#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{Config, DocumentConfig, HistoryConfig, InspectorConfig, load_config};
pub use document::{Color, Edge, FontSize, Node, Position, Snapshot, initial_document};
pub use dump::{DumpMode, SessionSummary, dump_json};
pub use editor::{Editor, Inspector};
pub use error::EditorError;
pub use history::{Action, HistoryState, transition, transition_bounded};
pub use script::{Command, parse_script, run_script};
