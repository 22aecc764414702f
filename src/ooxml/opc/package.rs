//! Objects that implement reading and writing OPC packages.
//!
//! The main OpcPackage type keeps every member of the underlying archive in
//! its original order. Parts can be read by partname and replaced wholesale;
//! saving writes every member back, untouched members byte-for-byte, with
//! the compression method each one was read with.

use crate::ooxml::opc::constants::relationship_type;
use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use crate::ooxml::opc::phys_pkg::{PackageMember, PhysPkgReader, PhysPkgWriter};
use crate::ooxml::opc::pkgreader::{ContentTypeMap, PackageReader};
use crate::ooxml::opc::rel::Relationships;
use std::io::Read;
use std::path::Path;

/// Main API class for working with OPC packages.
///
/// # Example
/// ```no_run
/// use docx_editor::ooxml::opc::OpcPackage;
///
/// let pkg = OpcPackage::open("document.docx").unwrap();
/// let main = pkg.main_document_partname().unwrap();
/// println!("{} is {}", main, pkg.content_type(&main).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct OpcPackage {
    members: Vec<PackageMember>,
    content_types: ContentTypeMap,
    rels: Relationships,
}

impl OpcPackage {
    /// Open an OPC package from a file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::open(path)?)
    }

    /// Load an OPC package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_reader(reader)?)
    }

    /// Load an OPC package from in-memory ZIP bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_phys_reader(PhysPkgReader::from_bytes(data)?)
    }

    fn from_phys_reader(phys_reader: PhysPkgReader) -> Result<Self> {
        let pkg_reader = PackageReader::from_phys_reader(&phys_reader)?;
        Ok(Self {
            content_types: pkg_reader.content_types().clone(),
            rels: pkg_reader.pkg_rels().clone(),
            members: phys_reader.into_members(),
        })
    }

    /// Package-level relationships.
    #[inline]
    pub fn rels(&self) -> &Relationships {
        &self.rels
    }

    /// Partname of the main document part.
    ///
    /// Follows the package `officeDocument` relationship, in either its
    /// transitional or strict form.
    pub fn main_document_partname(&self) -> Result<PackURI> {
        let rel = self
            .rels
            .by_reltype(relationship_type::OFFICE_DOCUMENT)
            .or_else(|| self.rels.by_reltype(relationship_type::OFFICE_DOCUMENT_STRICT))
            .ok_or_else(|| {
                OpcError::RelationshipNotFound(relationship_type::OFFICE_DOCUMENT.to_string())
            })?;
        rel.target_partname()
    }

    /// Content type of a part.
    pub fn content_type(&self, partname: &PackURI) -> Result<&str> {
        self.content_types.get(partname)
    }

    fn position(&self, partname: &PackURI) -> Option<usize> {
        let wanted = partname.membername();
        self.members
            .iter()
            .position(|m| m.name == wanted)
            .or_else(|| {
                self.members
                    .iter()
                    .position(|m| m.name.eq_ignore_ascii_case(wanted))
            })
    }

    /// Raw bytes of a part.
    pub fn part_blob(&self, partname: &PackURI) -> Result<&[u8]> {
        self.position(partname)
            .map(|i| self.members[i].blob.as_slice())
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))
    }

    /// Replace the bytes of an existing part, keeping its archive position.
    pub fn set_part_blob(&mut self, partname: &PackURI, blob: Vec<u8>) -> Result<()> {
        let index = self
            .position(partname)
            .ok_or_else(|| OpcError::PartNotFound(partname.to_string()))?;
        self.members[index].blob = blob;
        Ok(())
    }

    /// Archive members in their original order.
    #[inline]
    pub fn members(&self) -> &[PackageMember] {
        &self.members
    }

    /// Serialize the package to ZIP bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = PhysPkgWriter::new();
        for member in &self.members {
            writer.write_member(member)?;
        }
        writer.finish()
    }

    /// Save the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::opc::phys_pkg::Compression;

    const CONTENT_TYPES: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

    const STRICT_RELS: &[u8] = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument" Target="/word/document.xml"/></Relationships>"#;

    fn build(rels: &[u8]) -> Vec<u8> {
        let mut writer = PhysPkgWriter::new();
        writer.write("[Content_Types].xml", CONTENT_TYPES).unwrap();
        writer.write("_rels/.rels", rels).unwrap();
        writer
            .write_with("word/media/image1.png", b"\x89PNG\r\n", Compression::Stored)
            .unwrap();
        writer.write("word/document.xml", b"<w:document/>").unwrap();
        writer.finish().unwrap()
    }

    #[test]
    fn test_main_document_strict_relationship() {
        let pkg = OpcPackage::from_bytes(&build(STRICT_RELS)).unwrap();
        let main = pkg.main_document_partname().unwrap();
        assert_eq!(main.as_str(), "/word/document.xml");
        assert_eq!(
            pkg.content_type(&main).unwrap(),
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"
        );
    }

    #[test]
    fn test_missing_main_relationship() {
        let rels = br#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"/>"#;
        let pkg = OpcPackage::from_bytes(&build(rels)).unwrap();
        assert!(matches!(
            pkg.main_document_partname(),
            Err(OpcError::RelationshipNotFound(_))
        ));
    }

    #[test]
    fn test_set_blob_and_resave() {
        let mut pkg = OpcPackage::from_bytes(&build(STRICT_RELS)).unwrap();
        let main = PackURI::new("/word/document.xml").unwrap();
        pkg.set_part_blob(&main, b"<w:document>edited</w:document>".to_vec())
            .unwrap();

        let reread = OpcPackage::from_bytes(&pkg.to_bytes().unwrap()).unwrap();
        assert_eq!(
            reread.part_blob(&main).unwrap(),
            b"<w:document>edited</w:document>"
        );

        let names: Vec<&str> = reread.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            ["[Content_Types].xml", "_rels/.rels", "word/media/image1.png", "word/document.xml"]
        );
        assert_eq!(reread.members()[2].compression, Compression::Stored);
        assert_eq!(reread.members()[2].blob, b"\x89PNG\r\n");
    }

    #[test]
    fn test_unknown_part() {
        let mut pkg = OpcPackage::from_bytes(&build(STRICT_RELS)).unwrap();
        let missing = PackURI::new("/word/footer1.xml").unwrap();
        assert!(pkg.part_blob(&missing).is_err());
        assert!(pkg.set_part_blob(&missing, Vec::new()).is_err());
    }

    #[test]
    fn test_missing_content_types() {
        let mut writer = PhysPkgWriter::new();
        writer.write("word/document.xml", b"<w:document/>").unwrap();
        let data = writer.finish().unwrap();
        assert!(matches!(
            OpcPackage::from_bytes(&data),
            Err(OpcError::PartNotFound(_))
        ));
    }
}
