//! Linear undo/redo over document snapshots.
//!
//! [`transition`] is the only function that changes a [`HistoryState`]. It is
//! a plain reducer: it consumes the old state and an [`Action`] and returns the
//! next state. `Commit` is the only action that brings in a new snapshot;
//! `Undo` and `Redo` move existing snapshots between the lists, so a redo
//! always restores exactly what was undone.

use crate::config::HistoryConfig;
use crate::document::Snapshot;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Commit(Snapshot),
    Undo,
    Redo,
}

/// `past` is oldest first, `future` is nearest redo first.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    pub past: VecDeque<Snapshot>,
    pub present: Snapshot,
    pub future: VecDeque<Snapshot>,
}

impl HistoryState {
    pub fn new(present: Snapshot) -> Self {
        Self {
            past: VecDeque::new(),
            present,
            future: VecDeque::new(),
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }
}

pub fn transition(state: HistoryState, action: Action) -> HistoryState {
    let HistoryState {
        mut past,
        present,
        mut future,
    } = state;

    let next = match action {
        Action::Commit(snapshot) => {
            past.push_back(present);
            future.clear();
            HistoryState {
                past,
                present: snapshot,
                future,
            }
        }
        Action::Undo => match past.pop_back() {
            Some(previous) => {
                future.push_front(present);
                HistoryState {
                    past,
                    present: previous,
                    future,
                }
            }
            None => HistoryState {
                past,
                present,
                future,
            },
        },
        Action::Redo => match future.pop_front() {
            Some(upcoming) => {
                past.push_back(present);
                HistoryState {
                    past,
                    present: upcoming,
                    future,
                }
            }
            None => HistoryState {
                past,
                present,
                future,
            },
        },
    };

    debug!(
        past = next.past.len(),
        future = next.future.len(),
        "history transition"
    );
    next
}

/// [`transition`] followed by eviction down to `config.max_undo_steps`.
///
/// The oldest undo points and the farthest redo points are dropped first.
pub fn transition_bounded(
    state: HistoryState,
    action: Action,
    config: &HistoryConfig,
) -> HistoryState {
    let mut next = transition(state, action);
    if let Some(limit) = config.max_undo_steps {
        if next.past.len() > limit {
            let excess = next.past.len() - limit;
            next.past.drain(0..excess);
            debug!(evicted = excess, "dropped oldest undo steps");
        }
        if next.future.len() > limit {
            next.future.truncate(limit);
        }
    }
    next
}
