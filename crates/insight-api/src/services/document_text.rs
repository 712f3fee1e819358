//! Text content of an uploaded document.

use insight_core::AcceptedFileType;
use tracing::warn;

/// Read the text sent for extraction.
///
/// Plain text and CSV are decoded as UTF-8, replacing invalid sequences.
/// PDFs go through `pdf-extract` on a blocking thread; when that fails,
/// panics, or yields no text, the raw bytes are decoded the same lossy way.
pub async fn read_document_text(kind: AcceptedFileType, bytes: &[u8]) -> String {
    match kind {
        AcceptedFileType::Pdf => {
            let data = bytes.to_vec();
            let extracted =
                tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data)).await;
            match extracted {
                Ok(Ok(text)) if !text.trim().is_empty() => text,
                Ok(Ok(_)) => {
                    warn!(subsystem = "upload", op = "read_text", "PDF contained no extractable text");
                    lossy(bytes)
                }
                Ok(Err(e)) => {
                    warn!(subsystem = "upload", op = "read_text", error = %e, "PDF text extraction failed");
                    lossy(bytes)
                }
                Err(e) => {
                    warn!(subsystem = "upload", op = "read_text", error = %e, "PDF text extraction panicked");
                    lossy(bytes)
                }
            }
        }
        AcceptedFileType::PlainText | AcceptedFileType::Csv => lossy(bytes),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plain_text_is_lossy_utf8() {
        let text = read_document_text(AcceptedFileType::PlainText, b"caf\xc3\xa9 \xff").await;
        assert_eq!(text, "caf\u{e9} \u{fffd}");
    }

    #[tokio::test]
    async fn test_csv_passes_through() {
        let text = read_document_text(AcceptedFileType::Csv, b"name,role\nAda,engineer\n").await;
        assert_eq!(text, "name,role\nAda,engineer\n");
    }

    #[tokio::test]
    async fn test_broken_pdf_falls_back_to_raw_text() {
        let text = read_document_text(AcceptedFileType::Pdf, b"not really a pdf").await;
        assert_eq!(text, "not really a pdf");
    }
}
