//! XML helpers shared by the OOXML layers.
//!
//! - [`escape`]: entity escaping and unescaping
//! - [`tree`]: lossless mutable element tree used to edit parts in place

pub mod escape;
pub mod tree;

pub use escape::{escape_xml, find_invalid_xml_char, is_xml_char, unescape_xml};
pub use tree::{XmlDocument, XmlElement, XmlError, XmlNode};
