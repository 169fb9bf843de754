//! Attachment encoding.
//!
//! Converts a user-selected binary attachment into the transport-safe
//! payload the write actions expect: `{ name, type, content }` with the
//! content as standard base64. The size ceiling is enforced before any
//! encoding work — oversized files fail immediately and never reach the
//! network.

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Hard ceiling on attachment size: 10 MiB.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

/// A user-selected binary attachment, pre-encoding.
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Original file name.
    pub name: String,
    /// Declared content type (e.g., `application/pdf`).
    pub content_type: String,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}

/// The encoded payload nested into attachment-bearing write commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedFile {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    /// Base64-encoded file content.
    pub content: String,
}

/// Encode an attachment for transport.
///
/// Fails with [`SyncError::AttachmentTooLarge`] before any encoding work if
/// the file exceeds [`MAX_ATTACHMENT_BYTES`]. The base64 pass runs on the
/// blocking pool so a large file does not stall the caller's event loop;
/// encoding either completes or fails — there is no partial result.
pub async fn encode(attachment: Attachment) -> Result<EncodedFile, SyncError> {
    if attachment.bytes.len() > MAX_ATTACHMENT_BYTES {
        return Err(SyncError::AttachmentTooLarge {
            size: attachment.bytes.len(),
            limit: MAX_ATTACHMENT_BYTES,
        });
    }
    let handle = tokio::task::spawn_blocking(move || EncodedFile {
        name: attachment.name,
        content_type: attachment.content_type,
        content: B64.encode(&attachment.bytes),
    });
    handle.await.map_err(|e| SyncError::MalformedResponse {
        action: "encode_attachment".into(),
        detail: format!("encoding task failed: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn encodes_name_type_and_base64_content() {
        let encoded = encode(Attachment {
            name: "report.pdf".into(),
            content_type: "application/pdf".into(),
            bytes: b"hello".to_vec(),
        })
        .await
        .unwrap();
        assert_eq!(encoded.name, "report.pdf");
        assert_eq!(encoded.content_type, "application/pdf");
        assert_eq!(encoded.content, "aGVsbG8=");
    }

    #[tokio::test]
    async fn oversized_attachment_fails_before_encoding() {
        let result = encode(Attachment {
            name: "huge.bin".into(),
            content_type: "application/octet-stream".into(),
            bytes: vec![0u8; MAX_ATTACHMENT_BYTES + 1],
        })
        .await;
        match result {
            Err(SyncError::AttachmentTooLarge { size, limit }) => {
                assert_eq!(size, MAX_ATTACHMENT_BYTES + 1);
                assert_eq!(limit, MAX_ATTACHMENT_BYTES);
            }
            other => panic!("expected AttachmentTooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn exactly_at_ceiling_is_accepted() {
        let result = encode(Attachment {
            name: "edge.bin".into(),
            content_type: "application/octet-stream".into(),
            bytes: vec![0u8; MAX_ATTACHMENT_BYTES],
        })
        .await;
        assert!(result.is_ok());
    }

    #[test]
    fn encoded_file_serializes_with_wire_field_names() {
        let encoded = EncodedFile {
            name: "a.png".into(),
            content_type: "image/png".into(),
            content: "AAAA".into(),
        };
        let value = serde_json::to_value(&encoded).unwrap();
        assert_eq!(value["type"], "image/png");
        assert_eq!(value["name"], "a.png");
    }
}
