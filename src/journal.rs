//! Read-only view over the host's append-only chat log.
//!
//! The journal never mutates entries after append; the grouping pass only ever
//! scans it backward looking for the preceding visible message.

use crate::message::ChatMessage;

/// Append-only sequence of chat messages in arrival order.
#[derive(Default)]
pub struct MessageJournal {
    entries: Vec<ChatMessage>,
}

impl MessageJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, msg: ChatMessage) {
        self.entries.push(msg);
    }

    pub fn entries(&self) -> &[ChatMessage] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry with the given id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|m| m.id == id)
    }

    /// First visible entry strictly before `index`, scanning backward.
    ///
    /// Only visibility is checked here; kind filtering belongs to the
    /// continuation predicate, which must see hidden-adjacent messages of any
    /// kind once they are visible.
    pub fn visible_entry_before(&self, index: usize) -> Option<&ChatMessage> {
        let index = index.min(self.entries.len());
        self.entries[..index].iter().rev().find(|m| m.visible)
    }

    /// The preceding visible entry for a message already in the journal.
    pub fn visible_entry_before_message(&self, msg: &ChatMessage) -> Option<&ChatMessage> {
        let index = self.position_of(&msg.id)?;
        self.visible_entry_before(index)
    }
}
