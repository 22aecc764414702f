//! Constant values related to the Open Packaging Convention.
//!
//! This module contains content type URIs (like MIME-types) that specify a part's format
//! and the relationship types used to locate the main document.

/// Content type URIs (like MIME-types) that specify a part's format
pub mod content_type {
    // WordprocessingML package (the MIME type of a whole .docx file)
    pub const WML_DOCUMENT: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

    // WordprocessingML main document parts
    pub const WML_DOCUMENT_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
    pub const WML_TEMPLATE_MAIN: &str =
        "application/vnd.openxmlformats-officedocument.wordprocessingml.template.main+xml";
    pub const WML_DOCUMENT_MACRO_ENABLED_MAIN: &str =
        "application/vnd.ms-word.document.macroEnabled.main+xml";
    pub const WML_TEMPLATE_MACRO_ENABLED_MAIN: &str =
        "application/vnd.ms-word.template.macroEnabledTemplate.main+xml";

    /// Content types accepted for the main part of a Word package
    pub const WML_MAIN_PARTS: [&str; 4] = [
        WML_DOCUMENT_MAIN,
        WML_TEMPLATE_MAIN,
        WML_DOCUMENT_MACRO_ENABLED_MAIN,
        WML_TEMPLATE_MACRO_ENABLED_MAIN,
    ];
}

/// Open XML relationship target modes
pub mod target_mode {
    /// External relationship target mode (e.g., hyperlinks to external URLs)
    pub const EXTERNAL: &str = "External";
}

/// Relationship type URIs used in OPC packages
pub mod relationship_type {
    // Office document
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    /// Strict Open XML spelling of [`OFFICE_DOCUMENT`]
    pub const OFFICE_DOCUMENT_STRICT: &str =
        "http://purl.oclc.org/ooxml/officeDocument/relationships/officeDocument";
}
