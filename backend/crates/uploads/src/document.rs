//! Document classification and object-path construction

use kernel::id::UserRef;
use platform::crypto::{random_bytes, to_hex};

use crate::error::{UploadsError, UploadsResult};

/// Documents up to 5 MB are accepted.
pub const MAX_FILE_BYTES: usize = 5 * 1024 * 1024;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Where the document lives relative to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentScope {
    /// Attached to an admission application
    Application,
    /// Certificate kept on the user account (hsc_path / sslc_path)
    Account,
}

impl DocumentScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentScope::Application => "application",
            DocumentScope::Account => "account",
        }
    }
}

/// Certificate kind accepted by the upload endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Hsc,
    Sslc,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Hsc => "hsc",
            DocumentType::Sslc => "sslc",
        }
    }

    pub fn parse(value: &str) -> UploadsResult<Self> {
        match value {
            "hsc" => Ok(DocumentType::Hsc),
            "sslc" => Ok(DocumentType::Sslc),
            other => Err(UploadsError::Validation(format!(
                "document type must be hsc or sslc, got {other}"
            ))),
        }
    }
}

/// Content check: the declared metadata can lie, the magic bytes cannot.
pub fn is_pdf(bytes: &[u8], content_type: Option<&str>, filename: &str) -> bool {
    if !bytes.starts_with(PDF_MAGIC) {
        return false;
    }
    if let Some(declared) = content_type {
        if declared != "application/pdf" && declared != "application/octet-stream" {
            return false;
        }
    }
    filename.to_lowercase().ends_with(".pdf")
}

/// Keep only characters safe in an object path; collapse everything else
/// to `_` and strip leading/trailing dots so traversal sequences cannot
/// survive. The random segment in the final path keeps sanitized names
/// collision-free.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_matches(|c| c == '_' || c == '.');
    if trimmed.is_empty() {
        "document.pdf".to_string()
    } else {
        trimmed.chars().take(80).collect()
    }
}

/// Object path: `{user_ref}/{scope}/{type}/{ts}-{rand}-{name}`.
pub fn object_path(
    user_ref: UserRef,
    scope: DocumentScope,
    doc_type: DocumentType,
    timestamp_ms: i64,
    filename: &str,
) -> String {
    let rand = to_hex(&random_bytes(3));
    format!(
        "{}/{}/{}/{}-{}-{}",
        user_ref,
        scope.as_str(),
        doc_type.as_str(),
        timestamp_ms,
        rand,
        sanitize_filename(filename)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_parse() {
        assert_eq!(DocumentType::parse("hsc").unwrap(), DocumentType::Hsc);
        assert_eq!(DocumentType::parse("sslc").unwrap(), DocumentType::Sslc);
        assert!(DocumentType::parse("aadhar").is_err());
    }

    #[test]
    fn test_pdf_sniff_requires_magic() {
        assert!(is_pdf(b"%PDF-1.7 rest", Some("application/pdf"), "marks.pdf"));
        assert!(!is_pdf(b"PK\x03\x04zip", Some("application/pdf"), "marks.pdf"));
        assert!(!is_pdf(b"", Some("application/pdf"), "marks.pdf"));
    }

    #[test]
    fn test_pdf_sniff_checks_declared_type_and_extension() {
        assert!(!is_pdf(b"%PDF-1.7", Some("image/png"), "marks.pdf"));
        assert!(!is_pdf(b"%PDF-1.7", Some("application/pdf"), "marks.png"));
        // octet-stream is what some mobile clients declare
        assert!(is_pdf(b"%PDF-1.7", Some("application/octet-stream"), "marks.PDF"));
        assert!(is_pdf(b"%PDF-1.7", None, "marks.pdf"));
    }

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("HSC marks 2024.pdf"), "HSC_marks_2024.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename(".hidden.pdf"), "hidden.pdf");
        assert_eq!(sanitize_filename("???"), "document.pdf");
        assert_eq!(sanitize_filename("..."), "document.pdf");
    }

    #[test]
    fn test_object_path_shape() {
        let user_ref = UserRef::new();
        let path = object_path(
            user_ref,
            DocumentScope::Account,
            DocumentType::Hsc,
            1_756_500_000_000,
            "marks.pdf",
        );
        let parts: Vec<&str> = path.split('/').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], user_ref.to_string());
        assert_eq!(parts[1], "account");
        assert_eq!(parts[2], "hsc");
        assert!(parts[3].starts_with("1756500000000-"));
        assert!(parts[3].ends_with("-marks.pdf"));
    }
}
