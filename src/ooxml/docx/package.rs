use crate::ooxml::docx::document::Document;
use crate::ooxml::docx::parts::DocumentPart;
/// Package implementation for Word documents.
use crate::ooxml::error::{OoxmlError, Result};
use crate::ooxml::opc::OpcPackage;
use crate::ooxml::opc::constants::content_type as ct;
use crate::ooxml::opc::phys_pkg::PhysPkgWriter;
use std::io::Read;
use std::path::Path;

/// A Word (.docx) package.
///
/// This is the main entry point for working with Word documents. It wraps
/// an OPC package together with the parsed main document. Saving writes
/// the (possibly edited) document back in place of the original main part
/// and copies every other part unchanged.
///
/// # Examples
///
/// ```rust,no_run
/// use docx_editor::ooxml::docx::Package;
///
/// let mut pkg = Package::open("document.docx")?;
/// for mut para in pkg.document_mut().all_paragraphs_mut()? {
///     if para.text().trim() == "Draft" {
///         para.set_text("Final")?;
///     }
/// }
/// pkg.save("document-final.docx")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Package {
    /// The underlying OPC package
    opc: OpcPackage,
    document: Document,
}

impl Package {
    /// Open a .docx package from a file path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_opc(OpcPackage::open(path)?)
    }

    /// Create a .docx package from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_opc(OpcPackage::from_reader(reader)?)
    }

    /// Create a .docx package from in-memory bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_opc(OpcPackage::from_bytes(data)?)
    }

    fn from_opc(opc: OpcPackage) -> Result<Self> {
        let partname = opc
            .main_document_partname()
            .map_err(|e| OoxmlError::PartNotFound(format!("main document part: {}", e)))?;

        // Verify it's a Word document by checking the main part's content type
        let content_type = opc.content_type(&partname)?;
        if !ct::WML_MAIN_PARTS.contains(&content_type) {
            return Err(OoxmlError::InvalidContentType {
                expected: ct::WML_DOCUMENT_MAIN.to_string(),
                got: content_type.to_string(),
            });
        }

        let blob = opc.part_blob(&partname)?;
        let part = DocumentPart::load(partname, blob)?;
        tracing::debug!(part = %part.partname(), bytes = blob.len(), "loaded main document part");

        Ok(Self {
            opc,
            document: Document::new(part),
        })
    }

    /// Get the main document.
    #[inline]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the main document for editing.
    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Consume the package, keeping only the main document.
    #[inline]
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Get the underlying OPC package.
    ///
    /// Its main part still holds the bytes the package was opened with.
    #[inline]
    pub fn opc_package(&self) -> &OpcPackage {
        &self.opc
    }

    /// Serialize the package to `.docx` bytes.
    ///
    /// Members keep their order and compression; only the main document
    /// part is re-encoded.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let main = self.document.part().partname();
        let document_xml = self.document.to_bytes();

        let mut writer = PhysPkgWriter::new();
        for member in self.opc.members() {
            if member.partname().as_str().eq_ignore_ascii_case(main.as_str()) {
                writer.write_with(&member.name, &document_xml, member.compression)?;
            } else {
                writer.write_member(member)?;
            }
        }
        Ok(writer.finish()?)
    }

    /// Save the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}
