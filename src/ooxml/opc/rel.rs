//! Relationship-related objects for OPC packages.
//!
//! Relationships are read from `.rels` parts and used to locate target parts,
//! most importantly the main document part of a package. The editor never
//! changes relationships, so the collection here is read-only.
use crate::ooxml::opc::constants::target_mode;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use quick_xml::Reader;
use quick_xml::events::Event;
use smallvec::SmallVec;

/// A single relationship from a source part to a target.
///
/// Identified by an rId. Can be either internal (pointing to another part)
/// or external (pointing to a URL outside the package).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relationship {
    /// Relationship ID (e.g., "rId1")
    r_id: String,

    /// Relationship type URI
    reltype: String,

    /// Target reference, a relative part reference or an external URL
    target_ref: String,

    /// Base URI of the source, for resolving relative references
    base_uri: String,

    is_external: bool,
}

impl Relationship {
    pub fn new(
        r_id: impl Into<String>,
        reltype: impl Into<String>,
        target_ref: impl Into<String>,
        base_uri: impl Into<String>,
        is_external: bool,
    ) -> Self {
        Self {
            r_id: r_id.into(),
            reltype: reltype.into(),
            target_ref: target_ref.into(),
            base_uri: base_uri.into(),
            is_external,
        }
    }

    #[inline]
    pub fn r_id(&self) -> &str {
        &self.r_id
    }

    #[inline]
    pub fn reltype(&self) -> &str {
        &self.reltype
    }

    #[inline]
    pub fn target_ref(&self) -> &str {
        &self.target_ref
    }

    #[inline]
    pub fn is_external(&self) -> bool {
        self.is_external
    }

    /// Get the absolute target partname for internal relationships.
    ///
    /// Returns an error if this is an external relationship.
    pub fn target_partname(&self) -> Result<PackURI> {
        if self.is_external {
            return Err(OpcError::InvalidRelationship(format!(
                "{} targets an external resource",
                self.r_id
            )));
        }
        PackURI::from_rel_ref(&self.base_uri, &self.target_ref).map_err(OpcError::InvalidPackUri)
    }
}

/// Relationships declared by a single source, in document order.
///
/// Packages rarely declare more than a handful of package-level
/// relationships, so they are kept inline.
#[derive(Debug, Clone, Default)]
pub struct Relationships {
    rels: SmallVec<[Relationship; 8]>,
}

impl Relationships {
    /// Parse a `.rels` part.
    ///
    /// `base_uri` is the directory of the source part, used later to
    /// resolve relative targets. Relationship entries missing any of
    /// `Id`, `Type` or `Target` are skipped.
    pub fn from_xml(rels_xml: &[u8], base_uri: &str) -> Result<Self> {
        let mut rels = SmallVec::new();
        let mut reader = Reader::from_reader(rels_xml);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                    if e.local_name().as_ref() == b"Relationship" =>
                {
                    let mut r_id = None;
                    let mut reltype = None;
                    let mut target_ref = None;
                    let mut is_external = false;

                    for attr in e.attributes() {
                        let attr = attr?;
                        match attr.key.as_ref() {
                            b"Id" => r_id = Some(attr.unescape_value()?.into_owned()),
                            b"Type" => reltype = Some(attr.unescape_value()?.into_owned()),
                            b"Target" => target_ref = Some(attr.unescape_value()?.into_owned()),
                            b"TargetMode" => {
                                is_external = attr.unescape_value()? == target_mode::EXTERNAL;
                            },
                            _ => {},
                        }
                    }

                    if let (Some(id), Some(rt), Some(tr)) = (r_id, reltype, target_ref) {
                        rels.push(Relationship::new(id, rt, tr, base_uri, is_external));
                    }
                },
                Ok(Event::Eof) => break,
                Err(source) => return Err(OpcError::MalformedPart { part: "relationships part", source }),
                _ => {},
            }
            buf.clear();
        }

        Ok(Self { rels })
    }

    /// Get a relationship by its ID.
    pub fn get(&self, r_id: &str) -> Option<&Relationship> {
        self.rels.iter().find(|rel| rel.r_id() == r_id)
    }

    /// First internal relationship of the given type.
    pub fn by_reltype(&self, reltype: &str) -> Option<&Relationship> {
        self.rels
            .iter()
            .find(|rel| !rel.is_external() && rel.reltype() == reltype)
    }

    /// Resolve the target partname of the first internal relationship of the given type.
    pub fn part_with_reltype(&self, reltype: &str) -> Result<PackURI> {
        self.by_reltype(reltype)
            .ok_or_else(|| OpcError::RelationshipNotFound(reltype.to_string()))?
            .target_partname()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Relationship> {
        self.rels.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::constants::relationship_type;

    const PKG_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId9" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/hyperlink" Target="https://example.com/a?b=1&amp;c=2" TargetMode="External"/>
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>
  <Relationship Id="broken" Type="http://example.com/missing-target"/>
</Relationships>"#;

    #[test]
    fn test_parse_package_rels() {
        let rels = Relationships::from_xml(PKG_RELS, "/").unwrap();
        assert_eq!(rels.len(), 3);

        let main = rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT)
            .unwrap();
        assert_eq!(main.as_str(), "/word/document.xml");

        let link = rels.get("rId9").unwrap();
        assert!(link.is_external());
        assert_eq!(link.target_ref(), "https://example.com/a?b=1&c=2");
        assert!(link.target_partname().is_err());
    }

    #[test]
    fn test_missing_reltype() {
        let rels = Relationships::from_xml(PKG_RELS, "/").unwrap();
        let err = rels
            .part_with_reltype(relationship_type::OFFICE_DOCUMENT_STRICT)
            .unwrap_err();
        assert!(matches!(err, OpcError::RelationshipNotFound(_)));
    }

    #[test]
    fn test_relative_target_from_part_rels() {
        let xml = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="t" Target="../customXml/item1.xml"/></Relationships>"#;
        let rels = Relationships::from_xml(xml, "/word").unwrap();
        let rel = rels.get("rId1").unwrap();
        assert_eq!(rel.target_partname().unwrap().as_str(), "/customXml/item1.xml");
    }
}
