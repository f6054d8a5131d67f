//! Template rendering capability and the bundled Handlebars implementation.
//!
//! The decoration pass only depends on the [`MessageRenderer`] trait; hosts
//! with their own template pipeline implement it, everyone else uses
//! [`HandlebarsRenderer`] with the bundled chat message template. Rendering is
//! async because hosts may resolve templates lazily.

use async_trait::async_trait;
use handlebars::Handlebars;
use serde::Serialize;

use crate::error::Result;

/// Name of the bundled full-mode chat message template.
pub const CHAT_MESSAGE_TEMPLATE: &str = "chat_message";

const CHAT_MESSAGE_SOURCE: &str = include_str!("../templates/chat_message.hbs");

/// Data record handed to the message template.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderData {
    pub avatar: Option<String>,
    pub timestamp: String,
    pub speaker: String,
    pub content: String,
    /// Pre-formatted whisper label, empty for public messages.
    pub whisper_to: String,
    pub is_whisper: bool,
    pub is_roll: bool,
    pub is_continuation: bool,
}

/// Rendering capability provided by the host. Expansion may suspend.
#[async_trait]
pub trait MessageRenderer: Send + Sync {
    async fn render(&self, template: &str, data: &RenderData) -> Result<String>;
}

/// Handlebars-backed renderer with the bundled template pre-registered.
pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl HandlebarsRenderer {
    pub fn new() -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry
            .register_template_string(CHAT_MESSAGE_TEMPLATE, CHAT_MESSAGE_SOURCE)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }
}

#[async_trait]
impl MessageRenderer for HandlebarsRenderer {
    async fn render(&self, template: &str, data: &RenderData) -> Result<String> {
        Ok(self.registry.render(template, data)?)
    }
}
