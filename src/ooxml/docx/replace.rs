//! Whole-paragraph text replacement.
//!
//! A paragraph is replaced when its trimmed text is exactly a key of the
//! [`ReplacementMap`]. Its content is then swapped for a single run holding
//! the mapped text; paragraph properties survive, run formatting does not.
//! There is no substring matching.
use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::paragraph::check_text;
use crate::ooxml::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Mapping from trimmed paragraph text to replacement text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplacementMap {
    entries: HashMap<String, String>,
}

impl ReplacementMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON object of string to string.
    ///
    /// Anything else (arrays, nested objects, non-string values) is an error.
    /// A key given twice keeps its last value.
    ///
    /// ```
    /// use docx_editor::ooxml::docx::ReplacementMap;
    ///
    /// let map = ReplacementMap::from_json(r#"{"Hello": "Hi"}"#).unwrap();
    /// assert_eq!(map.get("Hello"), Some("Hi"));
    /// assert!(ReplacementMap::from_json(r#"{"Hello": 1}"#).is_err());
    /// ```
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add an entry, returning the previous replacement for the key.
    pub fn insert(&mut self, original: impl Into<String>, replacement: impl Into<String>) -> Option<String> {
        self.entries.insert(original.into(), replacement.into())
    }

    #[inline]
    pub fn get(&self, original: &str) -> Option<&str> {
        self.entries.get(original).map(String::as_str)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Check that every replacement can be written into a document.
    ///
    /// Keys are only compared, so they are not checked.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::InvalidXmlChar`](crate::ooxml::OoxmlError::InvalidXmlChar)
    /// for the first replacement holding a character XML cannot carry.
    pub fn validate(&self) -> Result<()> {
        self.entries.values().try_for_each(|replacement| check_text(replacement))
    }
}

impl From<HashMap<String, String>> for ReplacementMap {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ReplacementMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// Outcome of [`apply_replacements`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplaceReport {
    /// Paragraphs looked at
    pub visited: usize,
    /// Paragraphs whose content was replaced
    pub replaced: usize,
}

/// Apply `map` to every paragraph of the document.
///
/// Paragraphs are visited in the order of [`Document::all_paragraphs_mut`],
/// each exactly once. The lookup key is the paragraph's text before it is
/// changed, so a replacement that is itself a key is not applied again.
///
/// The map is validated first; a map with an unwritable replacement leaves
/// the document untouched.
pub fn apply_replacements(document: &mut Document, map: &ReplacementMap) -> Result<ReplaceReport> {
    map.validate()?;

    let mut report = ReplaceReport::default();
    if map.is_empty() {
        report.visited = document.all_paragraphs()?.len();
        return Ok(report);
    }

    for mut paragraph in document.all_paragraphs_mut()? {
        report.visited += 1;
        let text = paragraph.text();
        if let Some(replacement) = map.get(text.trim()) {
            paragraph.set_text(replacement)?;
            report.replaced += 1;
        }
    }

    tracing::debug!(
        visited = report.visited,
        replaced = report.replaced,
        entries = map.len(),
        "applied replacements"
    );
    Ok(report)
}
