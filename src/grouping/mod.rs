//! Message grouping classifier.
//!
//! Pure decision logic: given an incoming message and read-only views of the
//! log, the roster, and the whisper-expansion enrichment, decide whether the
//! message is groupable, whether it continues the preceding visible message,
//! and resolve the display fields the presenter needs. One decision record is
//! computed per message and discarded after decoration.

mod continuation;
mod helpers;

pub use continuation::{is_continuation, MapExpansion, NoExpansion, WhisperExpansion};
pub use helpers::format_whisper_label;

use crate::journal::MessageJournal;
use crate::message::{ChatMessage, MessageKind, WhisperTo};
use crate::roster::GameRoster;

/// Kinds that re-render through the message template. Broader than the
/// grouping set: dice rolls get the decorated frame but never chain.
pub fn is_rerenderable(msg: &ChatMessage) -> bool {
    matches!(
        msg.kind,
        MessageKind::Ooc
            | MessageKind::InCharacter
            | MessageKind::Whisper
            | MessageKind::Other
            | MessageKind::Roll
    ) && !msg.speaker.is_description()
}

/// Kinds eligible for continuation grouping.
pub fn is_groupable(msg: &ChatMessage) -> bool {
    matches!(
        msg.kind,
        MessageKind::Ooc | MessageKind::InCharacter | MessageKind::Whisper
    ) && !msg.speaker.is_description()
}

/// Derived decision record, computed fresh per incoming message and never
/// persisted.
#[derive(Clone, Debug)]
pub struct ContinuationDecision {
    pub rerenderable: bool,
    pub groupable: bool,
    pub continuation: bool,
    pub is_self: bool,
    /// Whether the speaker resolved to an actor in the roster.
    pub actor_resolved: bool,
    pub avatar: Option<String>,
    pub speaker_label: String,
    pub whisper_label: String,
}

/// Run the full classification pass for one incoming message.
///
/// `lite_mode` is the display mode captured at the start of the pass; it only
/// affects the whisper label format.
pub fn classify(
    msg: &ChatMessage,
    journal: &MessageJournal,
    roster: &GameRoster,
    expansion: &dyn WhisperExpansion,
    lite_mode: bool,
) -> ContinuationDecision {
    let rerenderable = is_rerenderable(msg);
    let groupable = is_groupable(msg);

    let mut continuation = false;
    if !msg.force_leading && groupable {
        if let Some(prev) = journal.visible_entry_before_message(msg) {
            continuation = is_continuation(prev, msg, expansion);
            log::debug!(
                "message {} {} the run started by {}",
                msg.id,
                if continuation { "continues" } else { "breaks" },
                prev.id
            );
        }
    }

    let actor_resolved = roster.resolve_actor(&msg.speaker).is_some();
    let avatar = roster.avatar_for(msg);
    let speaker_label = msg
        .speaker
        .alias
        .clone()
        .unwrap_or_else(|| roster.user_name(&msg.user).to_string());

    // Prefer the expanded recipient list for the label when the enrichment
    // supplied one; fall back to the names the host delivered.
    let whisper_targets = match expansion.expanded_targets(msg) {
        Some(real) if !real.is_empty() => Some(WhisperTo::Names(
            real.iter()
                .map(|id| roster.user_name(id).to_string())
                .collect(),
        )),
        _ => msg.whisper_to.clone(),
    };
    let whisper_label = format_whisper_label(
        whisper_targets.as_ref(),
        msg.speaker.alias.as_deref(),
        lite_mode,
    );

    ContinuationDecision {
        rerenderable,
        groupable,
        continuation,
        is_self: roster.is_self(msg),
        actor_resolved,
        avatar,
        speaker_label,
        whisper_label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::DESCRIPTION_ALIAS;

    fn roster() -> GameRoster {
        GameRoster::new("u1")
    }

    #[test]
    fn test_rerenderable_and_groupable_sets() {
        let cases = [
            (MessageKind::Ooc, true, true),
            (MessageKind::InCharacter, true, true),
            (MessageKind::Whisper, true, true),
            (MessageKind::Roll, true, false),
            (MessageKind::Other, true, false),
            (MessageKind::Emote, false, false),
        ];
        for (kind, rerenderable, groupable) in cases {
            let msg = ChatMessage::new("m1", "u1", kind, "x");
            assert_eq!(is_rerenderable(&msg), rerenderable, "{:?}", kind);
            assert_eq!(is_groupable(&msg), groupable, "{:?}", kind);
        }
    }

    #[test]
    fn test_description_sentinel_is_never_groupable() {
        let msg = ChatMessage::new("m1", "u1", MessageKind::InCharacter, "x")
            .with_alias(DESCRIPTION_ALIAS);
        assert!(!is_rerenderable(&msg));
        assert!(!is_groupable(&msg));
    }

    #[test]
    fn test_two_public_messages_from_same_alias_continue() {
        let mut journal = MessageJournal::new();
        journal.append(
            ChatMessage::new("m1", "u1", MessageKind::InCharacter, "one").with_alias("Bob"),
        );
        journal.append(
            ChatMessage::new("m2", "u1", MessageKind::InCharacter, "two").with_alias("Bob"),
        );

        let second = journal.entries()[1].clone();
        let decision = classify(&second, &journal, &roster(), &NoExpansion, false);
        assert!(decision.groupable);
        assert!(decision.continuation);
    }

    #[test]
    fn test_roll_after_groupable_message_is_leading() {
        let mut journal = MessageJournal::new();
        journal.append(
            ChatMessage::new("m1", "u1", MessageKind::InCharacter, "I attack").with_alias("Bob"),
        );
        journal.append(
            ChatMessage::new("m2", "u1", MessageKind::Roll, "1d20: 17").with_alias("Bob"),
        );

        let roll = journal.entries()[1].clone();
        let decision = classify(&roll, &journal, &roster(), &NoExpansion, false);
        assert!(decision.rerenderable);
        assert!(!decision.groupable);
        assert!(!decision.continuation);
    }

    #[test]
    fn test_force_leading_skips_the_backward_scan() {
        let mut journal = MessageJournal::new();
        journal.append(
            ChatMessage::new("m1", "u1", MessageKind::InCharacter, "one").with_alias("Bob"),
        );
        journal.append(
            ChatMessage::new("m2", "u1", MessageKind::InCharacter, "two")
                .with_alias("Bob")
                .with_force_leading(),
        );

        let second = journal.entries()[1].clone();
        let decision = classify(&second, &journal, &roster(), &NoExpansion, false);
        assert!(!decision.continuation);
    }

    #[test]
    fn test_hidden_predecessor_is_skipped() {
        let mut journal = MessageJournal::new();
        journal.append(
            ChatMessage::new("m1", "u1", MessageKind::InCharacter, "one").with_alias("Bob"),
        );
        journal.append(
            ChatMessage::new("gm", "u9", MessageKind::InCharacter, "secret")
                .with_alias("GM")
                .hidden(),
        );
        journal.append(
            ChatMessage::new("m2", "u1", MessageKind::InCharacter, "two").with_alias("Bob"),
        );

        // The hidden GM note does not break the run.
        let second = journal.entries()[2].clone();
        let decision = classify(&second, &journal, &roster(), &NoExpansion, false);
        assert!(decision.continuation);
    }

    #[test]
    fn test_label_prefers_expanded_targets() {
        let mut roster = roster();
        roster.add_user(crate::roster::User {
            id: "u7".into(),
            name: "Alice".into(),
            avatar: None,
        });

        let msg = ChatMessage::new("m1", "u1", MessageKind::Whisper, "psst")
            .with_alias("Bob")
            .with_whisper(vec!["u7".into()])
            .with_whisper_to(WhisperTo::Name("Alice".into()));

        let journal = MessageJournal::new();
        let mut expansion = MapExpansion::new();
        expansion.insert("m1", vec!["u7".into()]);

        // Expanded ids resolve through the roster, then pass through the
        // list-filtering label rules.
        let decision = classify(&msg, &journal, &roster, &expansion, false);
        assert_eq!(decision.whisper_label, "(To )");

        // Without expansion the host-supplied single name formats directly.
        let decision = classify(&msg, &journal, &roster, &NoExpansion, false);
        assert_eq!(decision.whisper_label, "(To Alice)");
    }

    #[test]
    fn test_speaker_label_falls_back_to_user_name() {
        let mut roster = roster();
        roster.add_user(crate::roster::User {
            id: "u1".into(),
            name: "Player One".into(),
            avatar: None,
        });
        let msg = ChatMessage::new("m1", "u1", MessageKind::Ooc, "hi");
        let decision = classify(&msg, &MessageJournal::new(), &roster, &NoExpansion, false);
        assert_eq!(decision.speaker_label, "Player One");
    }
}
