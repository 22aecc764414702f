/// Paragraph and Run structures for Word documents.
use crate::common::xml::{XmlElement, XmlNode, find_invalid_xml_char};
use crate::ooxml::error::{OoxmlError, Result};
use smallvec::SmallVec;
use std::borrow::Cow;

/// A paragraph in a Word document.
///
/// Represents a `<w:p>` element. Paragraphs contain runs which in turn
/// contain the actual text.
///
/// # Example
///
/// ```rust,ignore
/// for para in document.paragraphs()? {
///     println!("Paragraph text: {}", para.text());
///     for run in para.runs() {
///         println!("  Run: {}", run.text());
///     }
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Paragraph<'a> {
    element: &'a XmlElement,
}

impl<'a> Paragraph<'a> {
    /// Wrap a `<w:p>` element.
    #[inline]
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// Runs that carry the paragraph's text.
    ///
    /// These are the direct `<w:r>` children plus the runs inside direct
    /// `<w:hyperlink>` children, in document order.
    pub fn runs(&self) -> SmallVec<[Run<'a>; 8]> {
        let mut runs = SmallVec::new();
        for child in self.element.child_elements() {
            if child.is("r") {
                runs.push(Run::new(child));
            } else if child.is("hyperlink") {
                runs.extend(child.child_elements().filter(|e| e.is("r")).map(Run::new));
            }
        }
        runs
    }

    /// Get the text content of this paragraph.
    ///
    /// Concatenates the text of all runs, untrimmed.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for run in self.runs() {
            run.push_text(&mut text);
        }
        text
    }

    /// Style id from `<w:pPr><w:pStyle w:val="..."/>`.
    pub fn style_id(&self) -> Option<Cow<'a, str>> {
        self.element
            .find_child("pPr")?
            .find_child("pStyle")?
            .attribute_value("val")
    }
}

/// A paragraph borrowed for editing.
#[derive(Debug)]
pub struct ParagraphMut<'a> {
    element: &'a mut XmlElement,
}

impl<'a> ParagraphMut<'a> {
    /// Wrap a `<w:p>` element.
    #[inline]
    pub fn new(element: &'a mut XmlElement) -> Self {
        Self { element }
    }

    /// Read-only view of the same paragraph.
    #[inline]
    pub fn as_paragraph(&self) -> Paragraph<'_> {
        Paragraph::new(self.element)
    }

    #[inline]
    pub fn text(&self) -> String {
        self.as_paragraph().text()
    }

    /// Remove all content except the paragraph properties (`<w:pPr>`).
    pub fn clear(&mut self) {
        self.element.retain_children(|node| match node {
            XmlNode::Element(e) => e.is("pPr"),
            _ => true,
        });
    }

    /// Append a run holding `text`.
    ///
    /// `\t` becomes `<w:tab/>`, `\n` and `\r` become `<w:br/>`, and the
    /// remaining characters are grouped into `<w:t>` elements. Empty text
    /// appends an empty run.
    ///
    /// # Errors
    ///
    /// [`OoxmlError::InvalidXmlChar`] when `text` holds a character XML
    /// cannot carry; the paragraph is left unchanged.
    pub fn add_run(&mut self, text: &str) -> Result<()> {
        check_text(text)?;
        let prefix = name_prefix(self.element).to_string();
        self.element.push_element(build_run(&prefix, text));
        Ok(())
    }

    /// Replace the paragraph's content with a single run holding `text`.
    ///
    /// Paragraph properties are kept; run formatting is dropped. Invalid
    /// text fails like [`add_run`](Self::add_run), before anything is
    /// removed.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        check_text(text)?;
        self.clear();
        self.add_run(text)
    }
}

/// A run of text within a paragraph (`<w:r>`).
#[derive(Debug, Clone, Copy)]
pub struct Run<'a> {
    element: &'a XmlElement,
}

impl<'a> Run<'a> {
    #[inline]
    pub fn new(element: &'a XmlElement) -> Self {
        Self { element }
    }

    #[inline]
    pub fn element(&self) -> &'a XmlElement {
        self.element
    }

    /// Whether the run carries its own formatting (`<w:rPr>`).
    #[inline]
    pub fn has_properties(&self) -> bool {
        self.element.find_child("rPr").is_some()
    }

    /// Get the text content of this run.
    ///
    /// - `<w:t>` → its text
    /// - `<w:tab/>`, `<w:ptab/>` → tab character
    /// - `<w:br/>` (text wrapping only), `<w:cr/>` → newline character
    /// - `<w:noBreakHyphen/>` → hyphen
    ///
    /// Page and column breaks, drawings and field codes contribute nothing.
    pub fn text(&self) -> String {
        let mut text = String::new();
        self.push_text(&mut text);
        text
    }

    fn push_text(&self, out: &mut String) {
        for child in self.element.child_elements() {
            match child.local_name() {
                "t" => out.push_str(&child.text()),
                "tab" | "ptab" => out.push('\t'),
                "cr" => out.push('\n'),
                "br" => {
                    let wrapping = child
                        .attribute_value("type")
                        .is_none_or(|t| t == "textWrapping");
                    if wrapping {
                        out.push('\n');
                    }
                },
                "noBreakHyphen" => out.push('-'),
                _ => {},
            }
        }
    }
}

/// Reject text that cannot be serialized into a well-formed part.
pub(crate) fn check_text(text: &str) -> Result<()> {
    match find_invalid_xml_char(text) {
        Some((position, ch)) => Err(OoxmlError::InvalidXmlChar {
            codepoint: ch as u32,
            position,
        }),
        None => Ok(()),
    }
}

/// Namespace prefix of an element's name including the colon (`w:`), or "".
#[inline]
fn name_prefix(element: &XmlElement) -> &str {
    let name = element.name();
    &name[..name.len() - element.local_name().len()]
}

/// Build a `<w:r>` holding `text`, using the given namespace prefix.
fn build_run(prefix: &str, text: &str) -> XmlElement {
    let qname = |local: &str| format!("{}{}", prefix, local);
    let mut run = XmlElement::new(qname("r"));
    let mut pending = String::new();

    let flush = |run: &mut XmlElement, pending: &mut String| {
        if pending.is_empty() {
            return;
        }
        let mut t = XmlElement::new(qname("t"));
        if pending.trim().len() < pending.len() {
            t.set_attribute("xml:space", "preserve");
        }
        t.push(XmlNode::text(pending));
        run.push_element(t);
        pending.clear();
    };

    for ch in text.chars() {
        match ch {
            '\t' => {
                flush(&mut run, &mut pending);
                run.push_element(XmlElement::new(qname("tab")));
            },
            '\n' | '\r' => {
                flush(&mut run, &mut pending);
                run.push_element(XmlElement::new(qname("br")));
            },
            _ => pending.push(ch),
        }
    }
    flush(&mut run, &mut pending);

    run
}
