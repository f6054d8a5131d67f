//! Continuation predicate: does a message visually merge with its predecessor?

use std::collections::HashMap;

use log::warn;

use crate::message::{ChatMessage, MessageKind};

/// Expanded ("real") whisper recipient lists computed by an external
/// whisper-expansion collaborator from partial-name matches. The core never
/// computes these itself; absence of the collaborator, or of data for a given
/// message, is legal.
pub trait WhisperExpansion {
    fn expanded_targets(&self, msg: &ChatMessage) -> Option<Vec<String>>;
}

/// No enrichment available.
pub struct NoExpansion;

impl WhisperExpansion for NoExpansion {
    fn expanded_targets(&self, _msg: &ChatMessage) -> Option<Vec<String>> {
        None
    }
}

/// Expanded recipient lists keyed by message id.
#[derive(Default)]
pub struct MapExpansion {
    targets: HashMap<String, Vec<String>>,
}

impl MapExpansion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, message_id: impl Into<String>, targets: Vec<String>) {
        self.targets.insert(message_id.into(), targets);
    }
}

impl WhisperExpansion for MapExpansion {
    fn expanded_targets(&self, msg: &ChatMessage) -> Option<Vec<String>> {
        self.targets.get(&msg.id).cloned()
    }
}

/// Whether `next` continues the run started by `prev`.
///
/// `next` is expected to already be groupable and `prev` to be its preceding
/// visible message. All three comparisons are evaluated; a missing-whisper
/// diagnostic fires even when the speakers already differ.
pub fn is_continuation(
    prev: &ChatMessage,
    next: &ChatMessage,
    expansion: &dyn WhisperExpansion,
) -> bool {
    if next.force_leading {
        return false;
    }
    let same_kind = prev.kind == next.kind;
    let from_same_speaker = same_speaker(prev, next);
    let same_recipients = same_whisper_recipients(prev, next, expansion);
    same_kind && from_same_speaker && same_recipients
}

/// Speaker identity, most specific basis first: token ids when either side has
/// one, then aliases, then author user ids for kinds spoken as the player
/// (whispers and table talk). With no identity basis at all the messages are
/// conservatively treated as distinct speakers.
pub(crate) fn same_speaker(prev: &ChatMessage, next: &ChatMessage) -> bool {
    if prev.speaker.token.is_some() || next.speaker.token.is_some() {
        return prev.speaker.token == next.speaker.token;
    }
    if prev.speaker.alias.is_some() || next.speaker.alias.is_some() {
        return prev.speaker.alias == next.speaker.alias;
    }
    if matches!(next.kind, MessageKind::Whisper | MessageKind::Ooc) {
        return prev.user == next.user;
    }
    false
}

/// Recipient-set equality. Comparison is over ordered sequences; the same
/// recipients in a different order do not match.
///
/// A missing whisper attribute on either side means the messages cannot be
/// compared at all: warn once and classify as a new group rather than guess.
pub(crate) fn same_whisper_recipients(
    prev: &ChatMessage,
    next: &ChatMessage,
    expansion: &dyn WhisperExpansion,
) -> bool {
    let (Some(prev_set), Some(next_set)) = (prev.whisper.as_ref(), next.whisper.as_ref()) else {
        warn!(
            "whisper attribute missing on message {} or {}; starting a new group",
            prev.id, next.id
        );
        return false;
    };

    let real_match = match (expansion.expanded_targets(prev), expansion.expanded_targets(next)) {
        (Some(prev_real), Some(next_real)) => prev_real == next_real,
        // Expansion data on only one side (or neither) cannot veto.
        _ => true,
    };

    real_match && prev_set == next_set
}
