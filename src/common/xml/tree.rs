//! Lossless, mutable XML element tree.
//!
//! OOXML parts are edited in place: everything that is not touched must be
//! written back exactly as it was read. The tree therefore keeps character
//! data and attribute values in their escaped (serialized) form, keeps
//! comments, processing instructions and the whitespace between elements,
//! and only normalizes the quoting of attribute values and `<a></a>` into
//! `<a/>`.
//!
//! Parsing uses `quick-xml` streaming events with an explicit element stack,
//! so deeply nested documents never recurse during parsing.

use super::escape::{escape_xml, unescape_xml};
use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use std::borrow::Cow;
use std::fmt::Write as FmtWrite;
use thiserror::Error;

/// Errors raised while building an [`XmlDocument`].
#[derive(Error, Debug)]
pub enum XmlError {
    /// Syntax error reported by the XML reader
    #[error("XML syntax error: {0}")]
    Syntax(#[from] quick_xml::Error),

    /// Malformed attribute
    #[error("XML attribute error: {0}")]
    Attribute(#[from] AttrError),

    /// Part content is not UTF-8
    #[error("XML is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// Structurally invalid document (no root, several roots, unclosed tags)
    #[error("Malformed XML: {0}")]
    Malformed(String),
}

/// A node in the element tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// A child element
    Element(XmlElement),
    /// Character data in escaped form (`a &amp; b`)
    Text(String),
    /// Content of a `<![CDATA[...]]>` section
    CData(String),
    /// Content of a `<!--...-->` comment
    Comment(String),
    /// Content of a `<?...?>` processing instruction
    ProcessingInstruction(String),
    /// Content of a `<!DOCTYPE ...>` declaration
    DocType(String),
}

impl XmlNode {
    /// Create a text node from unescaped text.
    pub fn text(text: &str) -> Self {
        XmlNode::Text(escape_xml(text).into_owned())
    }

    /// Get the element if this node is one.
    #[inline]
    pub fn as_element(&self) -> Option<&XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get the element mutably if this node is one.
    #[inline]
    pub fn as_element_mut(&mut self) -> Option<&mut XmlElement> {
        match self {
            XmlNode::Element(e) => Some(e),
            _ => None,
        }
    }
}

/// An XML element with its attributes and children.
///
/// Names are kept qualified (`w:p`); attribute values are kept escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    /// Create an empty element with the given qualified name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    fn from_start(start: &BytesStart<'_>) -> Result<Self, XmlError> {
        let mut element = Self::new(utf8(start.name().as_ref())?);
        for attr in start.attributes() {
            let attr = attr?;
            element
                .attributes
                .push((utf8(attr.key.as_ref())?, utf8(&attr.value)?));
        }
        Ok(element)
    }

    /// Qualified name, e.g. `w:p`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local name without the namespace prefix, e.g. `p` for `w:p`.
    #[inline]
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// Check the local name.
    #[inline]
    pub fn is(&self, local_name: &str) -> bool {
        self.local_name() == local_name
    }

    /// Raw (escaped) value of the attribute with this qualified name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Unescaped value of the first attribute with this local name.
    pub fn attribute_value(&self, local_name: &str) -> Option<Cow<'_, str>> {
        self.attributes
            .iter()
            .find(|(key, _)| local_part(key) == local_name)
            .map(|(_, value)| unescape_xml(value))
    }

    /// Set an attribute from an unescaped value, replacing any previous value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        let escaped = escape_xml(value).into_owned();
        match self.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = escaped,
            None => self.attributes.push((name.to_string(), escaped)),
        }
    }

    /// Builder form of [`set_attribute`](Self::set_attribute).
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Attributes as `(qualified name, escaped value)` pairs in document order.
    #[inline]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// All child nodes.
    #[inline]
    pub fn children(&self) -> &[XmlNode] {
        &self.children
    }

    /// All child nodes, mutably.
    #[inline]
    pub fn children_mut(&mut self) -> &mut Vec<XmlNode> {
        &mut self.children
    }

    /// Child elements in document order.
    pub fn child_elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(XmlNode::as_element)
    }

    /// Child elements in document order, mutably.
    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut XmlElement> {
        self.children.iter_mut().filter_map(XmlNode::as_element_mut)
    }

    /// First child element with this local name.
    pub fn find_child(&self, local_name: &str) -> Option<&XmlElement> {
        self.child_elements().find(|e| e.is(local_name))
    }

    /// First child element with this local name, mutably.
    pub fn find_child_mut(&mut self, local_name: &str) -> Option<&mut XmlElement> {
        self.child_elements_mut().find(|e| e.is(local_name))
    }

    /// Append a child node.
    pub fn push(&mut self, node: XmlNode) {
        if let XmlNode::Text(text) = &node
            && let Some(XmlNode::Text(last)) = self.children.last_mut()
        {
            last.push_str(text);
            return;
        }
        self.children.push(node);
    }

    /// Append a child element.
    #[inline]
    pub fn push_element(&mut self, element: XmlElement) {
        self.children.push(XmlNode::Element(element));
    }

    /// Keep only the children for which `keep` returns true.
    pub fn retain_children<F>(&mut self, keep: F)
    where
        F: FnMut(&XmlNode) -> bool,
    {
        self.children.retain(keep);
    }

    /// Unescaped concatenation of the direct text children.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for child in &self.children {
            match child {
                XmlNode::Text(t) => text.push_str(&unescape_xml(t)),
                XmlNode::CData(t) => text.push_str(t),
                _ => {},
            }
        }
        text
    }

    /// Serialize this element and its subtree.
    pub fn write_to(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            // Values read from single-quoted attributes may contain a raw '"'
            if value.contains('"') {
                out.push_str(&value.replace('"', "&quot;"));
            } else {
                out.push_str(value);
            }
            out.push('"');
        }

        if self.children.is_empty() {
            out.push_str("/>");
            return;
        }

        out.push('>');
        for child in &self.children {
            write_node(child, out);
        }
        out.push_str("</");
        out.push_str(&self.name);
        out.push('>');
    }

    /// Serialize this element and its subtree to a new string.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(256);
        self.write_to(&mut out);
        out
    }
}

fn write_node(node: &XmlNode, out: &mut String) {
    match node {
        XmlNode::Element(e) => e.write_to(out),
        XmlNode::Text(t) => out.push_str(t),
        XmlNode::CData(t) => {
            let _ = write!(out, "<![CDATA[{}]]>", t);
        },
        XmlNode::Comment(t) => {
            let _ = write!(out, "<!--{}-->", t);
        },
        XmlNode::ProcessingInstruction(t) => {
            let _ = write!(out, "<?{}?>", t);
        },
        XmlNode::DocType(t) => {
            let _ = write!(out, "<!DOCTYPE {}>", t);
        },
    }
}

/// A parsed XML part: optional declaration, the root element, and whatever
/// surrounds the root (whitespace, comments, processing instructions).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    declaration: Option<String>,
    prolog: Vec<XmlNode>,
    root: XmlElement,
    epilog: Vec<XmlNode>,
}

impl XmlDocument {
    /// Create a document around a root element with the standard OOXML
    /// declaration.
    pub fn new(root: XmlElement) -> Self {
        Self {
            declaration: Some(r#"xml version="1.0" encoding="UTF-8" standalone="yes""#.to_string()),
            prolog: vec![XmlNode::Text("\r\n".to_string())],
            root,
            epilog: Vec::new(),
        }
    }

    /// Parse a UTF-8 XML document.
    ///
    /// # Errors
    ///
    /// Returns an error on syntax errors, mismatched or unclosed tags,
    /// invalid UTF-8, or when there is not exactly one root element.
    pub fn parse(xml: &[u8]) -> Result<Self, XmlError> {
        let mut reader = Reader::from_reader(xml);
        // Whitespace is significant inside w:t and must round-trip.
        reader.config_mut().trim_text(false);

        let mut builder = TreeBuilder::default();
        let mut buf = Vec::with_capacity(1024);

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => builder.stack.push(XmlElement::from_start(&e)?),
                Event::Empty(e) => {
                    let element = XmlElement::from_start(&e)?;
                    builder.attach(XmlNode::Element(element))?;
                },
                Event::End(_) => {
                    let element = builder
                        .stack
                        .pop()
                        .ok_or_else(|| XmlError::Malformed("unexpected end tag".to_string()))?;
                    builder.attach(XmlNode::Element(element))?;
                },
                Event::Text(e) => builder.attach(XmlNode::Text(utf8(&e)?))?,
                Event::GeneralRef(e) => builder.attach(XmlNode::Text(format!("&{};", utf8(&e)?)))?,
                Event::CData(e) => builder.attach(XmlNode::CData(utf8(&e)?))?,
                Event::Comment(e) => builder.attach(XmlNode::Comment(utf8(&e)?))?,
                Event::PI(e) => builder.attach(XmlNode::ProcessingInstruction(utf8(&e)?))?,
                Event::DocType(e) => builder.attach(XmlNode::DocType(utf8(&e)?))?,
                Event::Decl(e) => {
                    let mut decl = format!(r#"xml version="{}""#, utf8(&e.version()?)?);
                    if let Some(encoding) = e.encoding() {
                        let _ = write!(decl, r#" encoding="{}""#, utf8(&encoding?)?);
                    }
                    if let Some(standalone) = e.standalone() {
                        let _ = write!(decl, r#" standalone="{}""#, utf8(&standalone?)?);
                    }
                    builder.declaration = Some(decl);
                },
                Event::Eof => break,
            }
            buf.clear();
        }

        builder.finish()
    }

    /// The root element.
    #[inline]
    pub fn root(&self) -> &XmlElement {
        &self.root
    }

    /// The root element, mutably.
    #[inline]
    pub fn root_mut(&mut self) -> &mut XmlElement {
        &mut self.root
    }

    /// Serialize the whole document.
    pub fn to_xml_string(&self) -> String {
        let mut out = String::with_capacity(4096);
        if let Some(decl) = &self.declaration {
            out.push_str("<?");
            out.push_str(decl);
            out.push_str("?>");
        }
        for node in &self.prolog {
            write_node(node, &mut out);
        }
        self.root.write_to(&mut out);
        for node in &self.epilog {
            write_node(node, &mut out);
        }
        out
    }

    /// Serialize the whole document to UTF-8 bytes.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_xml_string().into_bytes()
    }
}

#[derive(Default)]
struct TreeBuilder {
    declaration: Option<String>,
    stack: Vec<XmlElement>,
    prolog: Vec<XmlNode>,
    root: Option<XmlElement>,
    epilog: Vec<XmlNode>,
}

impl TreeBuilder {
    fn attach(&mut self, node: XmlNode) -> Result<(), XmlError> {
        if let Some(parent) = self.stack.last_mut() {
            parent.push(node);
            return Ok(());
        }

        match node {
            XmlNode::Element(element) => {
                if self.root.is_some() {
                    return Err(XmlError::Malformed("multiple root elements".to_string()));
                }
                self.root = Some(element);
            },
            other if self.root.is_none() => push_merged(&mut self.prolog, other),
            other => push_merged(&mut self.epilog, other),
        }
        Ok(())
    }

    fn finish(self) -> Result<XmlDocument, XmlError> {
        if let Some(open) = self.stack.last() {
            return Err(XmlError::Malformed(format!("unclosed element <{}>", open.name())));
        }
        let root = self
            .root
            .ok_or_else(|| XmlError::Malformed("no root element".to_string()))?;
        Ok(XmlDocument {
            declaration: self.declaration,
            prolog: self.prolog,
            root,
            epilog: self.epilog,
        })
    }
}

fn push_merged(nodes: &mut Vec<XmlNode>, node: XmlNode) {
    if let XmlNode::Text(text) = &node
        && let Some(XmlNode::Text(last)) = nodes.last_mut()
    {
        last.push_str(text);
        return;
    }
    nodes.push(node);
}

#[inline]
fn local_part(name: &str) -> &str {
    match memchr::memrchr(b':', name.as_bytes()) {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

#[inline]
fn utf8(bytes: &[u8]) -> Result<String, XmlError> {
    Ok(std::str::from_utf8(bytes)?.to_owned())
}
