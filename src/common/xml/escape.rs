use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use std::borrow::Cow;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// Use LeftmostLongest to ensure longer entities are matched first (e.g., &amp; instead of &lt;)
static XML_UNESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
        .expect("Failed to build XML unescaper")
});

/// Escape XML special characters.
///
/// Text without any special character is returned borrowed.
///
/// # Examples
///
/// ```
/// use docx_editor::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// assert_eq!(escape_xml("plain"), "plain");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> Cow<'_, str> {
    let bytes = s.as_bytes();
    if memchr::memchr3(b'&', b'<', b'>', bytes).is_none()
        && memchr::memchr2(b'"', b'\'', bytes).is_none()
    {
        return Cow::Borrowed(s);
    }
    Cow::Owned(XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"]))
}

/// Unescape XML entities and character references.
///
/// Replaces the five predefined entities and decimal / hexadecimal
/// character references (`&#160;`, `&#xA0;`). Unknown or malformed
/// references are left unchanged.
///
/// # Examples
///
/// ```
/// use docx_editor::common::xml::unescape_xml;
/// assert_eq!(unescape_xml("&lt;a &amp; b&gt;"), "<a & b>");
/// assert_eq!(unescape_xml("&quot;hello&apos;"), "\"hello'");
/// assert_eq!(unescape_xml("&amp;lt;"), "&lt;"); // &amp; is matched first
/// assert_eq!(unescape_xml("a&#160;b&#x41;"), "a\u{a0}bA");
/// assert_eq!(unescape_xml("a & b"), "a & b"); // unchanged
/// assert_eq!(unescape_xml("&invalid;"), "&invalid;"); // unknown entity
/// ```
pub fn unescape_xml(s: &str) -> Cow<'_, str> {
    if memchr::memchr(b'&', s.as_bytes()).is_none() {
        return Cow::Borrowed(s);
    }

    let decoded = decode_char_refs(s);
    Cow::Owned(XML_UNESCAPER.replace_all(&decoded, &["&", "<", ">", "\"", "'"]))
}

/// Whether `ch` is an XML 1.0 `Char`.
///
/// Excluded are the C0 controls other than tab, line feed and carriage
/// return, and the noncharacters U+FFFE and U+FFFF. Surrogates cannot occur
/// in a `char`.
#[inline]
pub fn is_xml_char(ch: char) -> bool {
    match ch {
        '\t' | '\n' | '\r' => true,
        '\u{0}'..='\u{1F}' | '\u{FFFE}' | '\u{FFFF}' => false,
        _ => true,
    }
}

/// Byte offset and value of the first character XML cannot represent.
///
/// ```
/// use docx_editor::common::xml::escape::find_invalid_xml_char;
/// assert_eq!(find_invalid_xml_char("tab\tand\nnewline"), None);
/// assert_eq!(find_invalid_xml_char("bell\u{7}"), Some((4, '\u{7}')));
/// ```
pub fn find_invalid_xml_char(s: &str) -> Option<(usize, char)> {
    // Every excluded character is either ASCII or encodes as EF BF BE/BF.
    let bytes = s.as_bytes();
    let suspicious = bytes.iter().any(|&b| b < 0x20 || b == 0xEF);
    if !suspicious {
        return None;
    }
    s.char_indices().find(|&(_, ch)| !is_xml_char(ch))
}

/// Resolve `&#NNN;` and `&#xHHH;` references, leaving everything else intact.
fn decode_char_refs(s: &str) -> Cow<'_, str> {
    if memchr::memmem::find(s.as_bytes(), b"&#").is_none() {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("&#") {
        out.push_str(&rest[..start]);
        let tail = &rest[start + 2..];
        let resolved = tail.find(';').and_then(|end| {
            let body = &tail[..end];
            let code = match body.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok(),
                None => body.parse::<u32>().ok(),
            };
            code.and_then(char::from_u32).map(|ch| (ch, end))
        });

        match resolved {
            // Never let a character reference forge a new entity.
            Some(('&', end)) => {
                out.push_str("&amp;");
                rest = &tail[end + 1..];
            },
            Some((ch, end)) => {
                out.push(ch);
                rest = &tail[end + 1..];
            },
            None => {
                out.push_str("&#");
                rest = tail;
            },
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_borrows_plain_text() {
        assert!(matches!(escape_xml("Total: 5"), Cow::Borrowed(_)));
        assert!(matches!(unescape_xml("Total: 5"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_unescape_inverse() {
        let raw = r#"if a < b && c > "d" then 'e'"#;
        assert_eq!(unescape_xml(&escape_xml(raw)), raw);
    }

    #[test]
    fn test_char_ref_ampersand_is_literal() {
        // &#38;lt; is the text "&lt;", not "<"
        assert_eq!(unescape_xml("&#38;lt;"), "&lt;");
    }

    #[test]
    fn test_xml_chars() {
        for ch in ['\t', '\n', '\r', ' ', 'é', '\u{FFFD}', '\u{10000}'] {
            assert!(is_xml_char(ch), "{:?}", ch);
        }
        for ch in ['\u{0}', '\u{1}', '\u{B}', '\u{C}', '\u{1F}', '\u{FFFE}', '\u{FFFF}'] {
            assert!(!is_xml_char(ch), "{:?}", ch);
        }
        assert_eq!(find_invalid_xml_char("Hi\u{1}there\u{b}"), Some((2, '\u{1}')));
        assert_eq!(find_invalid_xml_char("caf\u{e9} \u{FFFF}"), Some((6, '\u{FFFF}')));
        assert_eq!(find_invalid_xml_char("\u{FFFD} is fine"), None);
    }

    #[test]
    fn test_malformed_char_refs() {
        assert_eq!(unescape_xml("&#xZZ;"), "&#xZZ;");
        assert_eq!(unescape_xml("&#12"), "&#12");
        assert_eq!(unescape_xml("&#xD800;"), "&#xD800;");
    }
}
