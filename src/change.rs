//! Pure edits over [`Snapshot`]s.
//!
//! Every function here takes the current snapshot by reference and returns a
//! freshly built one. Ids that match nothing are skipped rather than reported,
//! and removing a node leaves its edges in place; use [`dangling_edges`] and
//! [`prune_dangling_edges`] when that matters.

use crate::document::{Color, Edge, FontSize, Node, Position, Snapshot};
use serde::{Deserialize, Serialize};
use tracing::trace;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeDelta {
    Move { id: String, position: Position },
    Remove { id: String },
    Add { node: Node },
    Select { id: String, selected: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EdgeDelta {
    Add { edge: Edge },
    Remove { id: String },
}

/// Applies `deltas` in order. Adding a node whose id is already present is
/// ignored so ids stay unique.
pub fn apply_node_deltas(snapshot: &Snapshot, deltas: &[NodeDelta]) -> Snapshot {
    let mut nodes = snapshot.nodes.clone();
    for delta in deltas {
        match delta {
            NodeDelta::Move { id, position } => {
                if let Some(node) = nodes.iter_mut().find(|node| &node.id == id) {
                    node.position = *position;
                } else {
                    trace!(%id, "move skipped, node not found");
                }
            }
            NodeDelta::Remove { id } => {
                nodes.retain(|node| &node.id != id);
            }
            NodeDelta::Add { node } => {
                if nodes.iter().any(|existing| existing.id == node.id) {
                    trace!(id = %node.id, "add skipped, id already in use");
                } else {
                    nodes.push(node.clone());
                }
            }
            NodeDelta::Select { id, selected } => {
                if let Some(node) = nodes.iter_mut().find(|node| &node.id == id) {
                    node.selected = *selected;
                }
            }
        }
    }
    Snapshot::new(nodes, snapshot.edges.clone())
}

/// Applies `deltas` in order. Endpoints of added edges are not checked.
pub fn apply_edge_deltas(snapshot: &Snapshot, deltas: &[EdgeDelta]) -> Snapshot {
    let mut edges = snapshot.edges.clone();
    for delta in deltas {
        match delta {
            EdgeDelta::Add { edge } => {
                if edges.iter().any(|existing| existing.id == edge.id) {
                    trace!(id = %edge.id, "edge add skipped, id already in use");
                } else {
                    edges.push(edge.clone());
                }
            }
            EdgeDelta::Remove { id } => {
                edges.retain(|edge| &edge.id != id);
            }
        }
    }
    Snapshot::new(snapshot.nodes.clone(), edges)
}

/// Selects exactly the node with `node_id`; every other node is deselected.
pub fn set_selection(snapshot: &Snapshot, node_id: &str) -> Snapshot {
    let nodes = snapshot
        .nodes
        .iter()
        .map(|node| Node {
            selected: node.id == node_id,
            ..node.clone()
        })
        .collect();
    Snapshot::new(nodes, snapshot.edges.clone())
}

pub fn apply_attribute_edit(
    snapshot: &Snapshot,
    node_id: &str,
    color: &Color,
    font_size: FontSize,
) -> Snapshot {
    if !snapshot.contains_node(node_id) {
        trace!(%node_id, "attribute edit skipped, node not found");
        return snapshot.clone();
    }
    let nodes = snapshot
        .nodes
        .iter()
        .map(|node| {
            if node.id == node_id {
                Node {
                    color: color.clone(),
                    font_size,
                    ..node.clone()
                }
            } else {
                node.clone()
            }
        })
        .collect();
    Snapshot::new(nodes, snapshot.edges.clone())
}

pub fn dangling_edges(snapshot: &Snapshot) -> Vec<&Edge> {
    snapshot
        .edges
        .iter()
        .filter(|edge| !snapshot.contains_node(&edge.source) || !snapshot.contains_node(&edge.target))
        .collect()
}

pub fn prune_dangling_edges(snapshot: &Snapshot) -> Snapshot {
    let edges = snapshot
        .edges
        .iter()
        .filter(|edge| snapshot.contains_node(&edge.source) && snapshot.contains_node(&edge.target))
        .cloned()
        .collect();
    Snapshot::new(snapshot.nodes.clone(), edges)
}
