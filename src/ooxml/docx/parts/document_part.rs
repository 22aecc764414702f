/// DocumentPart - the main document.xml part of a Word document.
use crate::common::xml::{XmlDocument, XmlElement};
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::PackURI;

/// The main document part of a Word document.
///
/// This corresponds to the `/word/document.xml` part in the package. The part
/// is held as a parsed element tree so that paragraphs can be edited in place
/// and written back.
#[derive(Debug, Clone)]
pub struct DocumentPart {
    partname: PackURI,
    xml: XmlDocument,
}

impl DocumentPart {
    /// Parse a DocumentPart from the part's bytes.
    ///
    /// The root element must be `w:document`.
    pub fn load(partname: PackURI, blob: &[u8]) -> Result<Self> {
        let xml = XmlDocument::parse(blob)?;
        if !xml.root().is("document") {
            return Err(OoxmlError::InvalidFormat(format!(
                "{} has root element <{}>, expected <w:document>",
                partname,
                xml.root().name()
            )));
        }
        Ok(Self { partname, xml })
    }

    #[inline]
    pub fn partname(&self) -> &PackURI {
        &self.partname
    }

    /// The `w:body` element.
    pub fn body(&self) -> Result<&XmlElement> {
        self.xml
            .root()
            .find_child("body")
            .ok_or_else(|| self.missing_body())
    }

    /// The `w:body` element, mutably.
    pub fn body_mut(&mut self) -> Result<&mut XmlElement> {
        let err = self.missing_body();
        self.xml.root_mut().find_child_mut("body").ok_or(err)
    }

    fn missing_body(&self) -> OoxmlError {
        OoxmlError::InvalidFormat(format!("{} has no <w:body> element", self.partname))
    }

    /// Serialize the part.
    #[inline]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.xml.to_bytes()
    }
}
