//! Error taxonomy for the decoration pipeline.
//!
//! Missing whisper data and unresolved speakers degrade gracefully inside the
//! classifier and never surface here; only rendering failures propagate, since
//! no safe default markup exists for a half-rendered message.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Template expansion failed; propagated to the host message pipeline.
    #[error("template rendering failed: {0}")]
    Render(#[from] handlebars::RenderError),

    /// The bundled template did not compile at registration time.
    #[error("template registration failed: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
}

pub type Result<T> = std::result::Result<T, Error>;
