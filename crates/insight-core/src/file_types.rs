//! Upload type rules: which files are accepted and how their type is named.
//!
//! A file is accepted when either its declared MIME type or its extension
//! matches one of the supported formats.

use serde::Serialize;

/// File formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AcceptedFileType {
    PlainText,
    Csv,
    Pdf,
}

impl AcceptedFileType {
    pub const ALL: [AcceptedFileType; 3] = [Self::PlainText, Self::Csv, Self::Pdf];

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::PlainText => "text/plain",
            Self::Csv => "text/csv",
            Self::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::PlainText => "txt",
            Self::Csv => "csv",
            Self::Pdf => "pdf",
        }
    }

    fn from_mime(mime: &str) -> Option<Self> {
        // Drop parameters such as "; charset=utf-8"
        let essence = mime.split(';').next().unwrap_or("").trim().to_lowercase();
        Self::ALL.into_iter().find(|t| t.mime_type() == essence)
    }

    fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.to_lowercase();
        Self::ALL.into_iter().find(|t| t.extension() == ext)
    }

    /// Classify an upload by declared MIME type, falling back to the extension.
    pub fn from_upload(filename: &str, claimed_mime: Option<&str>) -> Option<Self> {
        claimed_mime
            .and_then(Self::from_mime)
            .or_else(|| extension_of(filename).and_then(|ext| Self::from_extension(&ext)))
    }
}

/// Extension of a filename without the dot, if it has one.
pub fn extension_of(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_string())
}

/// The `file_type` recorded for a document: its extension, or `unknown`.
pub fn document_file_type(filename: &str) -> String {
    extension_of(filename).unwrap_or_else(|| "unknown".to_string())
}

/// Detect actual content type from file magic bytes.
///
/// Returns the MIME type `infer` recognizes, or the claimed type for
/// text-like formats that have no magic bytes.
pub fn detect_content_type(data: &[u8], claimed: &str) -> String {
    if let Some(kind) = infer::get(data) {
        return kind.mime_type().to_string();
    }
    tracing::trace!(claimed = %claimed, "no magic bytes matched, keeping claimed type");
    claimed.to_string()
}
