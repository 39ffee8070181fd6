//! Synopsis truncation
//!
//! Lengths are counted in characters, not words and not bytes. The input is
//! treated as raw markup: nothing is stripped before counting.

use std::borrow::Cow;

/// Marker appended to truncated text. It is an HTML entity so it renders as a
/// single horizontal ellipsis once inserted as markup.
pub const ELLIPSIS: &str = "&hellip;";

/// Shorten `text` to fit `limit` characters.
///
/// Text at or under the limit is returned unchanged. Longer text keeps its
/// first `limit - 1` characters; with `word_boundary` the prefix is cut back to
/// its last whitespace, unless it contains none. [`ELLIPSIS`] is appended to
/// anything that was cut.
pub fn truncate(text: &str, limit: usize, word_boundary: bool) -> String {
    truncate_cow(text, limit, word_boundary).into_owned()
}

/// Same as [`truncate`], borrowing when nothing needs to change.
pub fn truncate_cow(text: &str, limit: usize, word_boundary: bool) -> Cow<'_, str> {
    if text.chars().count() <= limit {
        return Cow::Borrowed(text);
    }

    let keep = limit.saturating_sub(1);
    let end = text
        .char_indices()
        .nth(keep)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let mut prefix = &text[..end];

    if word_boundary {
        if let Some(idx) = prefix.rfind(char::is_whitespace) {
            prefix = &prefix[..idx];
        }
    }

    let mut out = String::with_capacity(prefix.len() + ELLIPSIS.len());
    out.push_str(prefix);
    out.push_str(ELLIPSIS);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(truncate("abc", 3, false), "abc");
        assert_eq!(truncate("abc", 10, true), "abc");
        assert_eq!(truncate("", 0, true), "");
    }

    #[test]
    fn test_cut_without_boundary() {
        assert_eq!(truncate("abcdef", 4, false), format!("abc{}", ELLIPSIS));
    }

    #[test]
    fn test_cut_on_word_boundary() {
        assert_eq!(truncate("hello world", 8, true), format!("hello{}", ELLIPSIS));
    }

    #[test]
    fn test_boundary_without_whitespace_keeps_prefix() {
        assert_eq!(
            truncate("nowhitespacehere", 5, true),
            format!("nowh{}", ELLIPSIS)
        );
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        assert_eq!(truncate("ééééé", 5, false), "ééééé");
        assert_eq!(truncate("ééééé", 3, false), format!("éé{}", ELLIPSIS));
    }

    #[test]
    fn test_other_whitespace_is_a_boundary() {
        assert_eq!(
            truncate("alpha\tbeta gamma", 9, true),
            format!("alpha{}", ELLIPSIS)
        );
    }

    #[test]
    fn test_zero_limit() {
        assert_eq!(truncate("abc", 0, false), ELLIPSIS);
        assert_eq!(truncate("abc", 1, true), ELLIPSIS);
    }

    #[test]
    fn test_markup_is_counted_raw() {
        let synopsis = "<b>bold</b> text";
        assert_eq!(truncate(synopsis, 12, true), format!("<b>bold</b>{}", ELLIPSIS));
    }

    #[test]
    fn test_cow_borrows_short_text() {
        assert!(matches!(truncate_cow("short", 10, true), Cow::Borrowed("short")));
    }
}
