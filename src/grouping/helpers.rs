//! Whisper label formatting.

use crate::message::WhisperTo;

/// Format the "(To ...)" label shown next to a whispered message.
///
/// A single pre-joined name is shown unless it is the speaker's own alias.
/// A name list keeps only entries equal to the speaker alias before joining
/// (see the open questions in DESIGN.md) and is always formatted, even when
/// the filter leaves it empty.
///
/// Lite mode drops the parentheses to fit the compact header.
pub fn format_whisper_label(
    targets: Option<&WhisperTo>,
    speaker_alias: Option<&str>,
    lite: bool,
) -> String {
    let alias = speaker_alias.unwrap_or_default();
    match targets {
        Some(WhisperTo::Name(name)) if name != alias => wrap(name, lite),
        Some(WhisperTo::Names(names)) => {
            let joined = names
                .iter()
                .filter(|name| name.as_str() == alias)
                .cloned()
                .collect::<Vec<_>>()
                .join(",");
            wrap(&joined, lite)
        }
        _ => String::new(),
    }
}

fn wrap(names: &str, lite: bool) -> String {
    if lite {
        format!("To {}", names)
    } else {
        format!("(To {})", names)
    }
}
