//! Final visual state for a chat message: class set plus markup.
//!
//! Consumes the classifier's decision record and the rendering capability and
//! produces what the host applies to the displayed message. One linear
//! pipeline per message: mode select, classify, decorate, then either a
//! full-mode re-render or a lite-mode patch. No backward transitions.

use std::collections::BTreeSet;

use crate::config::Settings;
use crate::error::Result;
use crate::grouping::{self, ContinuationDecision, WhisperExpansion};
use crate::journal::MessageJournal;
use crate::markup;
use crate::message::{ChatMessage, MessageKind};
use crate::render::{MessageRenderer, RenderData, CHAT_MESSAGE_TEMPLATE};
use crate::roster::GameRoster;

/// CSS class vocabulary applied during decoration.
pub mod class_names {
    pub const MODIFIED: &str = "modified";
    pub const ROLL_UI: &str = "roll-ui";
    pub const LITE_UI: &str = "lite-ui";
    /// First message in a group.
    pub const LEADING: &str = "leading";
    /// Messages merging into the run above them.
    pub const CONTINUED: &str = "continued";
    pub const ROLL: &str = "roll";
    pub const ME: &str = "me";
}

/// Decorated output handed back to the host: the final class set and the
/// markup to display.
#[derive(Clone, Debug)]
pub struct DisplayState {
    pub classes: BTreeSet<&'static str>,
    pub html: String,
}

/// Compute the final class set for one message. The set is built once per
/// pass and handed over whole; nothing mutates it incrementally afterwards.
pub fn decorate(
    msg: &ChatMessage,
    decision: &ContinuationDecision,
    settings: &Settings,
    has_roll_card: bool,
) -> BTreeSet<&'static str> {
    let mut classes = BTreeSet::new();

    classes.insert(if settings.lite_mode {
        class_names::LITE_UI
    } else {
        class_names::ROLL_UI
    });
    if decision.rerenderable {
        classes.insert(class_names::MODIFIED);
    }
    if msg.kind == MessageKind::Roll || has_roll_card {
        classes.insert(class_names::ROLL);
    }
    if decision.is_self && settings.highlight_self {
        classes.insert(class_names::ME);
    }
    classes.insert(if decision.continuation {
        class_names::CONTINUED
    } else {
        class_names::LEADING
    });

    classes
}

/// Drives the per-message decoration pipeline against a rendering capability.
pub struct Presenter<R> {
    renderer: R,
}

impl<R: MessageRenderer> Presenter<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    /// Classify and decorate one incoming message.
    ///
    /// `html` is the message markup as the host currently displays it.
    /// Settings are captured by the caller once for the whole pass.
    pub async fn process(
        &self,
        msg: &ChatMessage,
        html: &str,
        journal: &MessageJournal,
        roster: &GameRoster,
        expansion: &dyn WhisperExpansion,
        settings: &Settings,
    ) -> Result<DisplayState> {
        let decision = grouping::classify(msg, journal, roster, expansion, settings.lite_mode);
        self.present(msg, html, &decision, settings).await
    }

    /// Decorate one message from an already-computed decision record.
    pub async fn present(
        &self,
        msg: &ChatMessage,
        html: &str,
        decision: &ContinuationDecision,
        settings: &Settings,
    ) -> Result<DisplayState> {
        let has_roll_card = markup::contains_roll_card(html);
        let classes = decorate(msg, decision, settings, has_roll_card);

        let mut out = if decision.groupable {
            markup::strip_inline_styles(html)
        } else {
            html.to_string()
        };

        if !settings.lite_mode && decision.rerenderable {
            let data = RenderData {
                avatar: decision.avatar.clone(),
                timestamp: msg.timestamp.format("%H:%M:%S").to_string(),
                speaker: decision.speaker_label.clone(),
                content: msg.content.clone(),
                whisper_to: decision.whisper_label.clone(),
                is_whisper: msg.kind == MessageKind::Whisper,
                is_roll: msg.kind == MessageKind::Roll || has_roll_card,
                is_continuation: decision.continuation,
            };
            // The render call may suspend; the splice below must only run on
            // its completed output.
            let mut rendered = self.renderer.render(CHAT_MESSAGE_TEMPLATE, &data).await?;
            if has_roll_card {
                if let Some(fragment) = markup::extract_roll_card(html) {
                    rendered = markup::splice_roll_card(&rendered, fragment);
                }
            }
            out = rendered;
        }

        if settings.lite_mode {
            if !decision.whisper_label.is_empty() {
                out = markup::upsert_whisper_span(&out, &decision.whisper_label);
            }
            if !decision.actor_resolved {
                if let Some(avatar) = decision.avatar.as_deref() {
                    out = markup::inject_portrait(&out, avatar, settings.portrait_size);
                }
            }
        }

        Ok(DisplayState { classes, html: out })
    }
}
