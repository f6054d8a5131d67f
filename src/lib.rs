//! Chat log decoration for virtual tabletops.
//!
//! Groups consecutive in-character messages from the same speaker and
//! recipients into visually continued runs, re-renders message markup with
//! speaker and whisper metadata, and applies mode-dependent styling (a
//! compact "lite" UI vs the full "roll" UI).
//!
//! Two cooperating halves:
//! - `grouping`: pure decision logic over the journal, roster, and
//!   whisper-expansion views (is this message groupable? does it continue
//!   the previous visible one?)
//! - `presenter`: turns a decision record into a class set and markup via
//!   the rendering capability
//!
//! Host collaborators (log, directories, settings, templates) are injected
//! as read-only values and capability traits so tests can substitute fakes.

pub mod config;
pub mod error;
pub mod grouping;
pub mod journal;
pub mod markup;
pub mod message;
pub mod presenter;
pub mod render;
pub mod roster;
