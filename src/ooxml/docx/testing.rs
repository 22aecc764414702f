//! In-memory `.docx` fixtures for unit tests.
use crate::ooxml::docx::{Document, Package};
use crate::ooxml::opc::phys_pkg::{Compression, PhysPkgWriter};

const CONTENT_TYPES: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\r\n",
    r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
    r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
    r#"<Default Extension="xml" ContentType="application/xml"/>"#,
    r#"<Default Extension="png" ContentType="image/png"/>"#,
    r#"<Override PartName="/word/document.xml" ContentType="{MAIN}"/>"#,
    r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#,
    r#"</Types>"#
);

const PACKAGE_RELS: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
    "\r\n",
    r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#,
    r#"</Relationships>"#
);

pub(crate) const STYLES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:type="paragraph" w:styleId="Heading1"/></w:styles>"#;

pub(crate) const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\n\0\0\0\rIHDR";

/// Wrap body content in a `w:document` part.
pub(crate) fn document_xml(body_xml: &str) -> String {
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            "\r\n",
            r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
            r#"<w:body>{}</w:body></w:document>"#
        ),
        body_xml
    )
}

/// Build a `.docx` with the given main part content type and body content.
pub(crate) fn docx_with_content_type(main_content_type: &str, body_xml: &str) -> Vec<u8> {
    let mut writer = PhysPkgWriter::new();
    writer
        .write(
            "[Content_Types].xml",
            CONTENT_TYPES.replace("{MAIN}", main_content_type).as_bytes(),
        )
        .unwrap();
    writer.write("_rels/.rels", PACKAGE_RELS.as_bytes()).unwrap();
    writer
        .write("word/document.xml", document_xml(body_xml).as_bytes())
        .unwrap();
    writer.write("word/styles.xml", STYLES.as_bytes()).unwrap();
    writer
        .write_with("word/media/image1.png", IMAGE, Compression::Stored)
        .unwrap();
    writer.finish().unwrap()
}

/// Build a minimal `.docx` around the given body content.
pub(crate) fn minimal_docx(body_xml: &str) -> Vec<u8> {
    docx_with_content_type(
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml",
        body_xml,
    )
}

pub(crate) fn document_from_body(body_xml: &str) -> Document {
    Package::from_bytes(&minimal_docx(body_xml))
        .unwrap()
        .into_document()
}

/// A simple paragraph with one run.
pub(crate) fn para(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{}</w:t></w:r></w:p>"#, text)
}
