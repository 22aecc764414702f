//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::io::{Cursor, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Default Extension="png" ContentType="image/png"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#,
    r#"</Types>"#
);

pub const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

pub const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\nnot really an image";

/// `<w:p>` with a single run holding `text`.
pub fn para(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
}

pub fn document_xml(body: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
            "<w:body>{}<w:sectPr/></w:body></w:document>"
        ),
        body
    )
}

/// A minimal `.docx` with `body` as the content of `<w:body>` and a stored
/// image member after the main part.
pub fn docx(body: &str) -> Vec<u8> {
    let mut archive = ZipWriter::new(Cursor::new(Vec::new()));
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let document = document_xml(body);
    let members: [(&str, &[u8], SimpleFileOptions); 4] = [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes(), deflated),
        ("_rels/.rels", PACKAGE_RELS.as_bytes(), deflated),
        ("word/document.xml", document.as_bytes(), deflated),
        ("word/media/image1.png", IMAGE, stored),
    ];
    for (name, blob, options) in members {
        archive.start_file(name, options).unwrap();
        archive.write_all(blob).unwrap();
    }
    archive.finish().unwrap().into_inner()
}

/// Member names and contents of a ZIP archive, in archive order.
pub fn members(data: &[u8]) -> Vec<(String, Vec<u8>)> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
    (0..archive.len())
        .map(|i| {
            let mut file = archive.by_index(i).unwrap();
            let mut blob = Vec::new();
            file.read_to_end(&mut blob).unwrap();
            (file.name().to_string(), blob)
        })
        .collect()
}

/// A one-member stored archive whose central directory claims, through a
/// zip64 extra field, that `a.txt` unpacks to 2^62 bytes.
pub fn archive_declaring_huge_member() -> Vec<u8> {
    const NAME: &[u8] = b"a.txt";
    const DATA: &[u8] = b"hello";
    const CRC: u32 = 0x3610_a686;

    fn u16le(out: &mut Vec<u8>, v: u16) {
        out.extend_from_slice(&v.to_le_bytes());
    }
    fn u32le(out: &mut Vec<u8>, v: u32) {
        out.extend_from_slice(&v.to_le_bytes());
    }

    let mut out = Vec::new();
    u32le(&mut out, 0x0403_4b50);
    for v in [45, 0, 0, 0, 0x0021] {
        u16le(&mut out, v);
    }
    u32le(&mut out, CRC);
    u32le(&mut out, DATA.len() as u32);
    u32le(&mut out, DATA.len() as u32);
    u16le(&mut out, NAME.len() as u16);
    u16le(&mut out, 0);
    out.extend_from_slice(NAME);
    out.extend_from_slice(DATA);

    let cd_offset = out.len() as u32;
    u32le(&mut out, 0x0201_4b50);
    for v in [45, 45, 0, 0, 0, 0x0021] {
        u16le(&mut out, v);
    }
    u32le(&mut out, CRC);
    u32le(&mut out, DATA.len() as u32);
    u32le(&mut out, u32::MAX);
    u16le(&mut out, NAME.len() as u16);
    for v in [12, 0, 0, 0] {
        u16le(&mut out, v);
    }
    u32le(&mut out, 0);
    u32le(&mut out, 0);
    out.extend_from_slice(NAME);
    u16le(&mut out, 0x0001);
    u16le(&mut out, 8);
    out.extend_from_slice(&(1u64 << 62).to_le_bytes());
    let cd_size = out.len() as u32 - cd_offset;

    u32le(&mut out, 0x0605_4b50);
    for v in [0, 0, 1, 1] {
        u16le(&mut out, v);
    }
    u32le(&mut out, cd_size);
    u32le(&mut out, cd_offset);
    u16le(&mut out, 0);
    out
}
