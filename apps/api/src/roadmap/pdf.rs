//! Resume PDF intake — size/type limits enforced before any AI call, text
//! extracted in memory and truncated to bound prompt size.

use crate::errors::AppError;

/// Maximum accepted upload size.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
/// Extracted text beyond this is dropped to avoid token overflow.
pub const MAX_RESUME_CHARS: usize = 50_000;

/// Extracts text from an uploaded PDF. The caller has already checked the
/// content type and size; any parse failure here is a client input error.
pub fn extract_resume_text(data: &[u8]) -> Result<String, AppError> {
    let text = pdf_extract::extract_text_from_mem(data)
        .map_err(|_| AppError::Validation("Failed to read PDF file.".to_string()))?;
    Ok(truncate_chars(text, MAX_RESUME_CHARS))
}

/// Truncates to at most `max` characters, respecting char boundaries.
fn truncate_chars(text: String, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate_chars("hello".to_string(), 10), "hello");
    }

    #[test]
    fn test_truncate_at_exact_limit() {
        assert_eq!(truncate_chars("hello".to_string(), 5), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        assert_eq!(truncate_chars("hello world".to_string(), 5), "hello");
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        // Multi-byte chars must not be split mid-codepoint.
        let text = "héllo wörld".to_string();
        let truncated = truncate_chars(text, 6);
        assert_eq!(truncated, "héllo ");
    }

    #[test]
    fn test_invalid_pdf_is_client_error() {
        let err = extract_resume_text(b"not a pdf").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
