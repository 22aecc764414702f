//! Provides a general interface to a physical OPC package (ZIP file).
//!
//! The reader decompresses every member up front and keeps the archive's
//! member order, so that a package can be rewritten with only the edited
//! parts changed. Directory entries are dropped, and the total unpacked
//! size is bounded.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::PackURI;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Largest total unpacked size accepted by [`PhysPkgReader::from_bytes`]: 256 MiB.
pub const DEFAULT_MAX_UNPACKED_SIZE: u64 = 256 * 1024 * 1024;

/// Upper bound on the buffer reserved up front for a single member.
const CAPACITY_HINT_CAP: u64 = 1024 * 1024;

/// How a member is stored in the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    Stored,
    Deflated,
}

impl From<CompressionMethod> for Compression {
    fn from(method: CompressionMethod) -> Self {
        match method {
            CompressionMethod::Stored => Compression::Stored,
            // Anything else is re-encoded with deflate.
            _ => Compression::Deflated,
        }
    }
}

impl From<Compression> for CompressionMethod {
    fn from(compression: Compression) -> Self {
        match compression {
            Compression::Stored => CompressionMethod::Stored,
            Compression::Deflated => CompressionMethod::Deflated,
        }
    }
}

/// A single decompressed archive member.
#[derive(Debug, Clone)]
pub struct PackageMember {
    /// ZIP member name, without leading slash
    pub name: String,
    pub blob: Vec<u8>,
    pub compression: Compression,
}

impl PackageMember {
    #[inline]
    pub fn partname(&self) -> PackURI {
        PackURI::from_membername(&self.name)
    }
}

/// Physical package reader holding every member of a ZIP-based OPC package.
#[derive(Debug, Clone)]
pub struct PhysPkgReader {
    members: Vec<PackageMember>,
}

impl PhysPkgReader {
    /// Open an OPC package from a file path.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// Create a reader from a reader over ZIP bytes.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Read all members from in-memory ZIP bytes.
    ///
    /// The members may unpack to at most [`DEFAULT_MAX_UNPACKED_SIZE`]
    /// bytes in total.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_limit(data, DEFAULT_MAX_UNPACKED_SIZE)
    }

    /// Read all members, failing with [`OpcError::PackageTooLarge`] once
    /// their unpacked sizes add up to more than `limit` bytes.
    ///
    /// Sizes declared by the archive are only used as hints; the limit is
    /// enforced on the bytes actually inflated.
    pub fn from_bytes_with_limit(data: &[u8], limit: u64) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;
        let mut members = Vec::with_capacity(archive.len());
        let mut remaining = limit;

        for index in 0..archive.len() {
            let file = archive.by_index(index)?;
            if file.is_dir() {
                continue;
            }
            if file.size() > remaining {
                return Err(OpcError::PackageTooLarge { limit });
            }

            let name = file.name().to_string();
            let compression = file.compression().into();
            let hint = file.size().min(CAPACITY_HINT_CAP) as usize;

            let mut blob = Vec::with_capacity(hint);
            file.take(remaining.saturating_add(1)).read_to_end(&mut blob)?;
            let read = blob.len() as u64;
            if read > remaining {
                return Err(OpcError::PackageTooLarge { limit });
            }
            remaining -= read;

            members.push(PackageMember {
                name,
                blob,
                compression,
            });
        }

        Ok(Self { members })
    }

    /// Get the member for a partname.
    ///
    /// Exact member names win. Otherwise names are matched ignoring ASCII
    /// case, as part names are case-insensitive.
    pub fn member_for(&self, pack_uri: &PackURI) -> Option<&PackageMember> {
        let wanted = pack_uri.membername();
        self.members
            .iter()
            .find(|m| m.name == wanted)
            .or_else(|| {
                self.members
                    .iter()
                    .find(|m| m.name.eq_ignore_ascii_case(wanted))
            })
    }

    /// Get the blob for a partname.
    #[inline]
    pub fn blob_for(&self, pack_uri: &PackURI) -> Option<&[u8]> {
        self.member_for(pack_uri).map(|m| m.blob.as_slice())
    }

    #[inline]
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.member_for(pack_uri).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in archive order.
    #[inline]
    pub fn members(&self) -> &[PackageMember] {
        &self.members
    }

    #[inline]
    pub fn into_members(self) -> Vec<PackageMember> {
        self.members
    }
}

/// Physical package writer producing an in-memory ZIP archive.
pub struct PhysPkgWriter {
    archive: ZipWriter<Cursor<Vec<u8>>>,
}

impl PhysPkgWriter {
    pub fn new() -> Self {
        Self {
            archive: ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Write a member with deflate compression.
    pub fn write(&mut self, membername: &str, blob: &[u8]) -> Result<()> {
        self.write_with(membername, blob, Compression::Deflated)
    }

    /// Write a member with an explicit compression method.
    pub fn write_with(
        &mut self,
        membername: &str,
        blob: &[u8],
        compression: Compression,
    ) -> Result<()> {
        let options = SimpleFileOptions::default()
            .compression_method(compression.into())
            .large_file(blob.len() as u64 >= u32::MAX as u64);
        self.archive.start_file(membername, options)?;
        self.archive.write_all(blob)?;
        Ok(())
    }

    /// Write a member read from another package, keeping its compression.
    #[inline]
    pub fn write_member(&mut self, member: &PackageMember) -> Result<()> {
        self.write_with(&member.name, &member.blob, member.compression)
    }

    /// Finish the archive and return its bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        Ok(self.archive.finish()?.into_inner())
    }
}

impl Default for PhysPkgWriter {
    fn default() -> Self {
        Self::new()
    }
}
