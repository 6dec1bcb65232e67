//! File payload codec
//!
//! Uploads carry file bytes as base64, optionally wrapped in a
//! `data:<mime>;base64,` URL. Payloads are decoded once at ingest and stored
//! as raw bytes keyed by their SHA-256.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use sha2::{Digest, Sha256};
use shared::error::{AppError, ErrorCode};
use shared::models::MAX_FILE_SIZE;

/// Standard alphabet, padding optional on decode
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoded payload ready to store
#[derive(Debug, Clone)]
pub struct DecodedPayload {
    pub bytes: Vec<u8>,
    pub hash: String,
}

impl DecodedPayload {
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// True when the uploader supplied something that should be decoded
pub fn has_payload(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| !s.trim().is_empty())
}

/// Strip an optional data-URL prefix and decode the base64 body.
///
/// Fails with `InvalidFileData` when the data URL has no body, the body is
/// blank, or it is not valid base64.
pub fn decode_file_data(raw: &str) -> Result<Vec<u8>, AppError> {
    let trimmed = raw.trim();
    let body = if trimmed.starts_with("data:") {
        trimmed
            .split_once(',')
            .map(|(_, b)| b)
            .ok_or_else(|| AppError::new(ErrorCode::InvalidFileData))?
    } else {
        trimmed
    };

    let compact: String = body.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if compact.is_empty() {
        return Err(AppError::new(ErrorCode::InvalidFileData));
    }

    LENIENT.decode(compact.as_bytes()).map_err(|e| {
        tracing::debug!(error = %e, "Rejected malformed base64 payload");
        AppError::new(ErrorCode::InvalidFileData)
    })
}

/// Decode and hash a payload, enforcing the size ceiling on the decoded bytes
pub fn ingest(raw: &str) -> Result<DecodedPayload, AppError> {
    let bytes = decode_file_data(raw)?;
    if bytes.len() as u64 > MAX_FILE_SIZE {
        return Err(AppError::file_too_large(bytes.len() as u64));
    }
    let hash = content_hash(&bytes);
    Ok(DecodedPayload { bytes, hash })
}

/// Lower-case hex SHA-256 of `bytes`
pub fn content_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Content type for serving a stored file.
///
/// The uploader's `fileType` wins unless it is empty or `unknown`; then the
/// filename extension is consulted before falling back to octet-stream.
pub fn serve_content_type(file_type: &str, filename: &str) -> String {
    let declared = file_type.trim();
    if !declared.is_empty() && declared != shared::models::DEFAULT_FILE_TYPE {
        return declared.to_string();
    }
    mime_guess::from_path(filename)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::STANDARD;

    #[test]
    fn decodes_plain_and_data_url() {
        let encoded = STANDARD.encode(b"hello world");
        assert_eq!(decode_file_data(&encoded).unwrap(), b"hello world");

        let url = format!("data:text/plain;base64,{encoded}");
        assert_eq!(decode_file_data(&url).unwrap(), b"hello world");
    }

    #[test]
    fn tolerates_missing_padding_and_line_breaks() {
        assert_eq!(decode_file_data("aGVsbG8").unwrap(), b"hello");
        assert_eq!(decode_file_data("aGVs\nbG8=").unwrap(), b"hello");
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in ["data:image/png;base64,", "data:image/png;base64", "@@@@", "   "] {
            let err = decode_file_data(raw).unwrap_err();
            assert_eq!(err.code, ErrorCode::InvalidFileData, "input {raw:?}");
        }
    }

    #[test]
    fn ingest_hashes_decoded_bytes() {
        let payload = ingest(&STANDARD.encode(b"abc")).unwrap();
        assert_eq!(payload.bytes, b"abc");
        assert_eq!(payload.len(), 3);
        assert_eq!(
            payload.hash,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn has_payload_ignores_blank() {
        assert!(!has_payload(None));
        assert!(!has_payload(Some("  ")));
        assert!(has_payload(Some("aGk=")));
    }

    #[test]
    fn content_type_resolution() {
        assert_eq!(serve_content_type("application/pdf", "x.bin"), "application/pdf");
        assert_eq!(serve_content_type("unknown", "photo.png"), "image/png");
        assert_eq!(serve_content_type("", "archive.zzz"), "application/octet-stream");
    }
}
