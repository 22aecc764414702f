//! Derive a [`ReplacementMap`] from an edited copy of extracted text.
//!
//! The extracted text and its edited copy are split into paragraphs on
//! blank lines and paired up by position.
use crate::ooxml::docx::replace::ReplacementMap;
use once_cell::sync::Lazy;
use regex::Regex;

static PARAGRAPH_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph break pattern"));

/// Split text into paragraphs on blank lines.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    PARAGRAPH_BREAK.split(text).collect()
}

/// Pair `original` and `edited` paragraphs by position.
///
/// An entry `original → edited` is recorded when the edited paragraph
/// exists, is not empty and differs from the original. Paragraphs added at
/// the end of the edited text are ignored. Later pairs win when the same
/// original paragraph occurs twice.
///
/// ```
/// use docx_editor::ooxml::docx::derive_text_map;
///
/// let map = derive_text_map("Hello\n\nWorld", "Hi\n\nWorld\n\nNew");
/// assert_eq!(map.len(), 1);
/// assert_eq!(map.get("Hello"), Some("Hi"));
/// ```
pub fn derive_text_map(original: &str, edited: &str) -> ReplacementMap {
    let edited = split_paragraphs(edited);
    let mut map = ReplacementMap::new();
    for (index, paragraph) in split_paragraphs(original).into_iter().enumerate() {
        match edited.get(index) {
            Some(&changed) if !changed.is_empty() && changed != paragraph => {
                map.insert(paragraph, changed);
            },
            _ => {},
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_on_blank_lines() {
        assert_eq!(split_paragraphs("a\n\nb\n \t\nc\nd"), ["a", "b", "c\nd"]);
        assert_eq!(split_paragraphs(""), [""]);
    }

    #[test]
    fn test_unchanged_and_emptied_paragraphs_skipped() {
        let map = derive_text_map("One\n\nTwo\n\nThree", "One\n\n\n\nTres");
        // "\n\n\n\n" is a single break, so "Tres" pairs with "Two".
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("Two"), Some("Tres"));
    }

    #[test]
    fn test_shorter_edit() {
        let map = derive_text_map("One\n\nTwo", "Uno");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("One"), Some("Uno"));
    }
}
