//! Markup inspection and patching helpers.
//!
//! The decoration pass treats message markup as opaque strings; these helpers
//! cover the few structural spots it needs to find or patch: embedded
//! roll-card fragments, host inline styles, and the lite-mode header elements.

use handlebars::html_escape;
use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

/// Opening tag of a roll-card fragment embedded by a dice module.
static ROLL_CARD_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<section\s[^>]*class="[^"]*\broll-card\b[^"]*"[^>]*>"#)
        .expect("roll-card regex is valid")
});

static INLINE_STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\s+style="[^"]*""#).expect("style regex is valid"));

static WHISPER_SPAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<span class="whisper-to">[^<]*</span>"#).expect("whisper span regex is valid")
});

pub const MESSAGE_HEADER_OPEN: &str = r#"<header class="message-header">"#;
const MESSAGE_HEADER_CLOSE: &str = "</header>";
const SECTION_CLOSE: &str = "</section>";
const ROLL_CONTENT_SLOT: &str = r#"<div class="roll-content"></div>"#;

/// Whether the markup carries an embedded roll-card fragment.
pub fn contains_roll_card(html: &str) -> bool {
    ROLL_CARD_OPEN_RE.is_match(html)
}

/// Extract the embedded roll-card `<section>`, tags included.
///
/// Chat markup does not nest sections, so the first close tag after the
/// opening match ends the fragment.
pub fn extract_roll_card(html: &str) -> Option<&str> {
    let open = ROLL_CARD_OPEN_RE.find(html)?;
    let close = html[open.end()..].find(SECTION_CLOSE)?;
    Some(&html[open.start()..open.end() + close + SECTION_CLOSE.len()])
}

/// Put a roll-card fragment carried over from the previous markup into the
/// empty roll-content slot of freshly rendered markup. Re-rendering must not
/// lose embedded roll widgets.
pub fn splice_roll_card(rendered: &str, fragment: &str) -> String {
    rendered.replacen(
        ROLL_CONTENT_SLOT,
        &format!(r#"<div class="roll-content">{}</div>"#, fragment),
        1,
    )
}

/// Drop host inline styles so group styling applies cleanly.
pub fn strip_inline_styles(html: &str) -> String {
    INLINE_STYLE_RE.replace_all(html, "").into_owned()
}

/// Update the whisper label element, inserting one at the end of the message
/// header when none exists. Markup without a header is returned unchanged.
pub fn upsert_whisper_span(html: &str, label: &str) -> String {
    let span = format!(r#"<span class="whisper-to">{}</span>"#, html_escape(label));
    if WHISPER_SPAN_RE.is_match(html) {
        return WHISPER_SPAN_RE.replace(html, NoExpand(&span)).into_owned();
    }
    match html.find(MESSAGE_HEADER_CLOSE) {
        Some(pos) => {
            let mut out = String::with_capacity(html.len() + span.len());
            out.push_str(&html[..pos]);
            out.push_str(&span);
            out.push_str(&html[pos..]);
            out
        }
        None => html.to_string(),
    }
}

/// Insert a portrait image at the front of the message header.
pub fn inject_portrait(html: &str, src: &str, size: u32) -> String {
    let Some(pos) = html.find(MESSAGE_HEADER_OPEN) else {
        return html.to_string();
    };
    let img = format!(
        r#"<img class="portrait" src="{}" width="{}" height="{}">"#,
        html_escape(src),
        size,
        size
    );
    let insert_at = pos + MESSAGE_HEADER_OPEN.len();
    let mut out = String::with_capacity(html.len() + img.len());
    out.push_str(&html[..insert_at]);
    out.push_str(&img);
    out.push_str(&html[insert_at..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ROLL_HTML: &str = concat!(
        r#"<header class="message-header"><h4 class="message-sender">Bob</h4></header>"#,
        r#"<section class="dice roll-card"><span class="total">17</span></section>"#,
    );

    #[test]
    fn test_roll_card_detection_and_extraction() {
        assert!(contains_roll_card(ROLL_HTML));
        assert_eq!(
            extract_roll_card(ROLL_HTML).unwrap(),
            r#"<section class="dice roll-card"><span class="total">17</span></section>"#
        );

        let plain = r#"<div class="message-content">hello</div>"#;
        assert!(!contains_roll_card(plain));
        assert!(extract_roll_card(plain).is_none());

        // A section without the roll-card class does not match.
        let other = r#"<section class="sidebar">x</section>"#;
        assert!(!contains_roll_card(other));
    }

    #[test]
    fn test_splice_roll_card() {
        let rendered = r#"<div class="message-content">hi</div><div class="roll-content"></div>"#;
        let spliced = splice_roll_card(rendered, "<section class=\"roll-card\">17</section>");
        assert_eq!(
            spliced,
            concat!(
                r#"<div class="message-content">hi</div>"#,
                r#"<div class="roll-content"><section class="roll-card">17</section></div>"#,
            )
        );
    }

    #[test]
    fn test_strip_inline_styles() {
        let html = r#"<div style="color: red" class="a"><span style="x">hi</span></div>"#;
        assert_eq!(
            strip_inline_styles(html),
            r#"<div class="a"><span>hi</span></div>"#
        );
    }

    #[test]
    fn test_upsert_whisper_span_inserts_into_header() {
        let html = r#"<header class="message-header"><h4>Bob</h4></header><div>hi</div>"#;
        assert_eq!(
            upsert_whisper_span(html, "To Alice"),
            concat!(
                r#"<header class="message-header"><h4>Bob</h4>"#,
                r#"<span class="whisper-to">To Alice</span></header><div>hi</div>"#,
            )
        );
    }

    #[test]
    fn test_upsert_whisper_span_updates_existing() {
        let html = concat!(
            r#"<header class="message-header">"#,
            r#"<span class="whisper-to">To Bob</span></header>"#,
        );
        assert_eq!(
            upsert_whisper_span(html, "To Alice"),
            concat!(
                r#"<header class="message-header">"#,
                r#"<span class="whisper-to">To Alice</span></header>"#,
            )
        );
    }

    #[test]
    fn test_upsert_whisper_span_without_header_is_untouched() {
        let html = r#"<div class="message-content">hi</div>"#;
        assert_eq!(upsert_whisper_span(html, "To Alice"), html);
    }

    #[test]
    fn test_inject_portrait() {
        let html = r#"<header class="message-header"><h4>Bob</h4></header>"#;
        assert_eq!(
            inject_portrait(html, "bob.png", 36),
            concat!(
                r#"<header class="message-header">"#,
                r#"<img class="portrait" src="bob.png" width="36" height="36">"#,
                r#"<h4>Bob</h4></header>"#,
            )
        );
    }
}
