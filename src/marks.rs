//! Interface to the manual-mark collaborators.
//!
//! The engine produces styled spans; whether a reader has manually marked a
//! span lives outside the core, behind a key-value store keyed by a stable
//! span id and a broadcast bus for bulk operations. Only the contract is
//! defined here; the UI component and the cross-tab transport own their
//! implementations.

use crate::annotation::AnnotationCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender, channel};

/// Bulk mark operations broadcast to every live span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum MarkMessage {
    /// Unmark every span and drop its persisted state.
    ClearAll,
    /// Set the marked state of every span of one semantic type.
    MarkByType { code: AnnotationCode, marked: bool },
}

/// Persistence seam for manual marks. Implementations decide durability and
/// cross-tab propagation; callers only rely on read-your-writes within one
/// instance.
pub trait MarkStore {
    fn is_marked(&self, span_id: &str) -> bool;
    fn set_marked(&mut self, span_id: &str, marked: bool);
    fn clear(&mut self);
}

/// In-memory reference implementation, used by tests and by callers that do
/// not need persistence.
#[derive(Debug, Default)]
pub struct InMemoryMarkStore {
    marks: HashMap<String, bool>,
}

impl MarkStore for InMemoryMarkStore {
    fn is_marked(&self, span_id: &str) -> bool {
        self.marks.get(span_id).copied().unwrap_or(false)
    }

    fn set_marked(&mut self, span_id: &str, marked: bool) {
        if marked {
            self.marks.insert(span_id.to_string(), true);
        } else {
            self.marks.remove(span_id);
        }
    }

    fn clear(&mut self) {
        self.marks.clear();
    }
}

/// In-process broadcast of [`MarkMessage`]s to subscribed span holders.
#[derive(Debug, Default)]
pub struct MarkBus {
    subscribers: Vec<Sender<MarkMessage>>,
}

impl MarkBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<MarkMessage> {
        let (tx, rx) = channel();
        self.subscribers.push(tx);
        rx
    }

    /// Deliver a message to every live subscriber; dropped receivers are
    /// pruned.
    pub fn broadcast(&mut self, message: MarkMessage) {
        self.subscribers.retain(|tx| tx.send(message).is_ok());
    }
}
