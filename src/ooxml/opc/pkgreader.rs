//! Reading of the package-level structure: content types and package relationships.
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::{CONTENT_TYPES_URI, PACKAGE_URI, PackURI};
use crate::ooxml::opc::phys_pkg::PhysPkgReader;
use crate::ooxml::opc::rel::Relationships;
use quick_xml::Reader;
use quick_xml::events::Event;
use std::collections::HashMap;

/// Content type map for looking up content types by part name or extension.
///
/// Implements the OPC content type discovery algorithm using Default and Override elements
/// from [Content_Types].xml.
#[derive(Debug, Clone, Default)]
pub struct ContentTypeMap {
    /// Maps lowercase file extensions to default content types
    defaults: HashMap<String, String>,

    /// Maps lowercase partnames to override content types
    overrides: HashMap<String, String>,
}

impl ContentTypeMap {
    /// Parse content types from [Content_Types].xml.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut map = Self::default();
        let mut reader = Reader::from_reader(xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                    let key_attr: &[u8] = match e.local_name().as_ref() {
                        b"Default" => b"Extension",
                        b"Override" => b"PartName",
                        _ => b"",
                    };

                    let mut key = None;
                    let mut content_type = None;
                    for attr in e.attributes() {
                        let attr = attr?;
                        if attr.key.as_ref() == key_attr {
                            key = Some(attr.unescape_value()?.into_owned());
                        } else if attr.key.as_ref() == b"ContentType" {
                            content_type = Some(attr.unescape_value()?.into_owned());
                        }
                    }

                    if let (Some(key), Some(ct)) = (key, content_type) {
                        match key_attr {
                            b"Extension" => map.add_default(&key, ct),
                            b"PartName" => map.add_override(&key, ct),
                            _ => {},
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(source) => {
                    return Err(OpcError::MalformedPart {
                        part: CONTENT_TYPES_URI,
                        source,
                    });
                },
                _ => {},
            }
            buf.clear();
        }

        Ok(map)
    }

    /// Add a default content type mapping for a file extension.
    pub fn add_default(&mut self, extension: &str, content_type: String) {
        self.defaults.insert(extension.to_ascii_lowercase(), content_type);
    }

    /// Add an override content type mapping for a specific partname.
    pub fn add_override(&mut self, partname: &str, content_type: String) {
        self.overrides.insert(partname.to_ascii_lowercase(), content_type);
    }

    /// Get the content type for a partname.
    ///
    /// Part names compare case-insensitively. Overrides win over the
    /// extension default.
    pub fn get(&self, pack_uri: &PackURI) -> Result<&str> {
        if let Some(ct) = self.overrides.get(&pack_uri.as_str().to_ascii_lowercase()) {
            return Ok(ct);
        }

        if let Some(ct) = self.defaults.get(&pack_uri.ext().to_ascii_lowercase()) {
            return Ok(ct);
        }

        Err(OpcError::ContentTypeNotFound(pack_uri.to_string()))
    }
}

/// Package-level metadata read from a physical package.
#[derive(Debug, Clone)]
pub struct PackageReader {
    content_types: ContentTypeMap,
    pkg_rels: Relationships,
}

impl PackageReader {
    /// Read `[Content_Types].xml` and `/_rels/.rels` from a physical package.
    ///
    /// A missing content types part is an error. A missing package
    /// relationships part yields an empty collection.
    pub fn from_phys_reader(phys_reader: &PhysPkgReader) -> Result<Self> {
        let ct_uri = PackURI::new(CONTENT_TYPES_URI).map_err(OpcError::InvalidPackUri)?;
        let content_types_xml = phys_reader
            .blob_for(&ct_uri)
            .ok_or_else(|| OpcError::PartNotFound(CONTENT_TYPES_URI.to_string()))?;
        let content_types = ContentTypeMap::from_xml(content_types_xml)?;

        let pkg_uri = PackURI::new(PACKAGE_URI).map_err(OpcError::InvalidPackUri)?;
        let rels_uri = pkg_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        let pkg_rels = match phys_reader.blob_for(&rels_uri) {
            Some(xml) => Relationships::from_xml(xml, pkg_uri.base_uri())?,
            None => Relationships::default(),
        };

        Ok(Self {
            content_types,
            pkg_rels,
        })
    }

    #[inline]
    pub fn content_types(&self) -> &ContentTypeMap {
        &self.content_types
    }

    #[inline]
    pub fn pkg_rels(&self) -> &Relationships {
        &self.pkg_rels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_malformed_content_types_keeps_source() {
        let err = ContentTypeMap::from_xml(b"<Types><Default Extension=\"xml\"></Override></Types>").unwrap_err();
        assert!(matches!(err, OpcError::MalformedPart { .. }));
        assert!(err.source().is_some_and(|source| source.is::<quick_xml::Error>()));
    }

    #[test]
    fn test_content_type_map() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="XML" ContentType="application/xml"/>
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>
</Types>"#;

        let ct_map = ContentTypeMap::from_xml(xml).unwrap();

        let doc = PackURI::new("/Word/Document.xml").unwrap();
        assert_eq!(
            ct_map.get(&doc).unwrap(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"
        );

        let styles = PackURI::new("/word/styles.xml").unwrap();
        assert_eq!(ct_map.get(&styles).unwrap(), "application/xml");

        let image = PackURI::new("/word/media/image1.png").unwrap();
        assert!(matches!(
            ct_map.get(&image),
            Err(OpcError::ContentTypeNotFound(_))
        ));
    }
}
