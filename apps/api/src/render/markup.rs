//! Inline markup: the fixed bold / italic / line-break / bullet transform applied to
//! free-text fields, and toolbar insertion driven by an explicit selection.
//!
//! Expansion is deliberately not a markdown parser. Per line, in order:
//! 1. HTML-significant characters are escaped; an `&` that already opens a character
//!    reference is left alone, so expanding expanded plain text changes nothing
//! 2. a leading `- ` becomes `• `
//! 3. `**x**` becomes `<strong>x</strong>`
//! 4. `*x*` becomes `<em>x</em>` (bold delimiters are already consumed)
//!
//! Lines are then joined with `<br>`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold pattern"));
static ITALIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*(.*?)\*").expect("Invalid italic pattern"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^&(?:[a-zA-Z][a-zA-Z0-9]*|#[0-9]+|#[xX][0-9a-fA-F]+);")
        .expect("Invalid entity pattern")
});

const EMPTY_PREVIEW: &str = "Nothing to preview...";

/// Expanded, display-ready HTML fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RichText(String);

impl RichText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn expand_inline(text: &str) -> RichText {
    let lines: Vec<String> = text.split('\n').map(expand_line).collect();
    RichText(lines.join("<br>"))
}

/// What the editor's preview pane shows for `text`.
pub fn preview_markup(text: &str) -> RichText {
    if text.is_empty() {
        return expand_inline(EMPTY_PREVIEW);
    }
    expand_inline(text)
}

fn expand_line(line: &str) -> String {
    let escaped = escape_html(line);
    let (bullet, rest) = match escaped.strip_prefix("- ") {
        Some(rest) => ("• ", rest),
        None => ("", escaped.as_str()),
    };
    let bold = BOLD.replace_all(rest, "<strong>${1}</strong>");
    let italic = ITALIC.replace_all(&bold, "<em>${1}</em>");
    format!("{bullet}{italic}")
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        match c {
            '&' if ENTITY.is_match(&text[i..]) => out.push('&'),
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

// ────────────────────────────────────────────────────────────────────────────
// Toolbar insertion
// ────────────────────────────────────────────────────────────────────────────

/// Cursor/selection in character offsets. `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupAction {
    Bold,
    Italic,
    Bullet,
    Link,
}

impl MarkupAction {
    /// Text inserted before and after the selection.
    pub fn delimiters(&self) -> (&'static str, &'static str) {
        match self {
            MarkupAction::Bold => ("**", "**"),
            MarkupAction::Italic => ("*", "*"),
            MarkupAction::Bullet => ("- ", ""),
            MarkupAction::Link => ("[", "](url)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkupEdit {
    pub value: String,
    /// Covers the originally selected text inside the new delimiters.
    pub selection: Selection,
}

/// Wraps the selected range of `value` in the action's delimiters.
///
/// Offsets past the end are clamped and a reversed range is normalised, so any
/// selection a client sends produces a well-formed edit.
pub fn insert_markup(value: &str, selection: Selection, action: MarkupAction) -> MarkupEdit {
    let len = value.chars().count();
    let start = selection.start.min(selection.end).min(len);
    let end = selection.start.max(selection.end).min(len);

    let start_byte = byte_offset(value, start);
    let end_byte = byte_offset(value, end);
    let (before, after) = action.delimiters();

    let mut edited = String::with_capacity(value.len() + before.len() + after.len());
    edited.push_str(&value[..start_byte]);
    edited.push_str(before);
    edited.push_str(&value[start_byte..end_byte]);
    edited.push_str(after);
    edited.push_str(&value[end_byte..]);

    let inner_start = start + before.chars().count();
    MarkupEdit {
        value: edited,
        selection: Selection {
            start: inner_start,
            end: inner_start + (end - start),
        },
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bold_line_break_and_bullet() {
        let out = expand_inline("Built **fast** systems\n- shipped v1");
        assert_eq!(
            out.as_str(),
            "Built <strong>fast</strong> systems<br>• shipped v1"
        );
    }

    #[test]
    fn test_italic_after_bold() {
        assert_eq!(
            expand_inline("**bold** and *soft*").as_str(),
            "<strong>bold</strong> and <em>soft</em>"
        );
    }

    #[test]
    fn test_every_bullet_line_is_prefixed() {
        assert_eq!(
            expand_inline("- one\n- two\nnot - three").as_str(),
            "• one<br>• two<br>not - three"
        );
    }

    #[test]
    fn test_markup_does_not_span_lines() {
        let out = expand_inline("**a\nb**");
        assert!(!out.as_str().contains("<strong>"));
        assert!(out.as_str().contains("<br>"));
    }

    #[test]
    fn test_html_is_escaped() {
        assert_eq!(
            expand_inline("<script>alert('x')</script> & **<b>**").as_str(),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; <strong>&lt;b&gt;</strong>"
        );
    }

    #[test]
    fn test_existing_entities_are_not_escaped_twice() {
        let once = expand_inline("Led the team's launch at AT&T");
        assert_eq!(once.as_str(), "Led the team&#39;s launch at AT&amp;T");
        assert_eq!(expand_inline(once.as_str()), once);
        assert_eq!(expand_inline("R&D &copy; &#169; &#xA9;").as_str(), "R&amp;D &copy; &#169; &#xA9;");
        assert_eq!(expand_inline("& ;").as_str(), "&amp; ;");
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(expand_inline("").as_str(), "");
        assert_eq!(preview_markup("").as_str(), "Nothing to preview...");
        assert_eq!(preview_markup("*hi*").as_str(), "<em>hi</em>");
    }

    #[test]
    fn test_insert_bold_around_selection() {
        let edit = insert_markup("make this loud", Selection { start: 10, end: 14 }, MarkupAction::Bold);
        assert_eq!(edit.value, "make this **loud**");
        assert_eq!(edit.selection, Selection { start: 12, end: 16 });
    }

    #[test]
    fn test_insert_bullet_at_caret() {
        let edit = insert_markup("item", Selection { start: 0, end: 0 }, MarkupAction::Bullet);
        assert_eq!(edit.value, "- item");
        assert_eq!(edit.selection, Selection { start: 2, end: 2 });
    }

    #[test]
    fn test_insert_link() {
        let edit = insert_markup("see docs", Selection { start: 4, end: 8 }, MarkupAction::Link);
        assert_eq!(edit.value, "see [docs](url)");
    }

    #[test]
    fn test_insert_clamps_and_normalises_selection() {
        let edit = insert_markup("abc", Selection { start: 99, end: 1 }, MarkupAction::Italic);
        assert_eq!(edit.value, "a*bc*");
        assert_eq!(edit.selection, Selection { start: 2, end: 4 });
    }

    #[test]
    fn test_insert_uses_character_offsets() {
        let edit = insert_markup("café crème", Selection { start: 5, end: 10 }, MarkupAction::Bold);
        assert_eq!(edit.value, "café **crème**");
    }

    proptest! {
        #[test]
        fn prop_plain_text_expansion_is_idempotent(text in "[a-zA-Z0-9 .,;#'&\"<>]{0,80}") {
            let once = expand_inline(&text);
            let twice = expand_inline(once.as_str());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_insert_keeps_original_text(
            text in "[a-z ]{0,30}",
            a in 0usize..40,
            b in 0usize..40,
        ) {
            let edit = insert_markup(&text, Selection { start: a, end: b }, MarkupAction::Bold);
            prop_assert_eq!(edit.value.replace("**", ""), text.clone());
            prop_assert_eq!(edit.value.chars().count(), text.chars().count() + 4);
        }
    }
}
