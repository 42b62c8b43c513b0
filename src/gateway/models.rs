//! Wire types for the backend gateway
//!
//! Field names follow the backend protocol exactly (`telefono`, `nombre`,
//! `tipo`, `contenido`, `es_audio`); the Rust side uses English names via
//! serde renames.

use serde::{Deserialize, Serialize};

/// A contact as stored by the backend. Read-only snapshot on the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "telefono")]
    pub phone: String,

    #[serde(rename = "nombre", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Contact {
    /// Display name, falling back to the phone number
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.phone)
    }
}

/// Message direction relative to this client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "enviado")]
    Sent,
    #[serde(rename = "recibido")]
    Received,
}

/// A message record, either fetched from the backend or appended locally
/// as an optimistic echo. The model carries no message ID; echoes are never
/// reconciled against the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredMessage {
    #[serde(rename = "tipo")]
    pub direction: Direction,

    #[serde(rename = "contenido")]
    pub content: String,

    /// Authoritative when present; when absent the renderer infers
    /// audio-ness from the content pattern.
    #[serde(rename = "es_audio", default, skip_serializing_if = "Option::is_none")]
    pub is_audio: Option<bool>,
}

impl StoredMessage {
    /// Optimistic echo for an outgoing text message
    pub fn sent(content: impl Into<String>) -> Self {
        Self {
            direction: Direction::Sent,
            content: content.into(),
            is_audio: None,
        }
    }

    /// Optimistic echo for an uploaded voice message
    pub fn sent_audio(content: impl Into<String>) -> Self {
        Self {
            direction: Direction::Sent,
            content: content.into(),
            is_audio: Some(true),
        }
    }
}

/// Finalized audio capture ready for upload
#[derive(Debug, Clone)]
pub struct AudioPayload {
    /// Upload file name, by convention `<phone>_<timestamp>.wav`
    pub filename: String,
    /// MIME type of the container
    pub mime_type: String,
    /// Encoded audio bytes
    pub bytes: Vec<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_wire_names() {
        let contact: Contact = serde_json::from_str(r#"{"telefono":"555","nombre":"Ana"}"#)
            .expect("contact should deserialize");
        assert_eq!(contact.phone, "555");
        assert_eq!(contact.display_name(), "Ana");
    }

    #[test]
    fn test_contact_name_fallback() {
        let contact: Contact =
            serde_json::from_str(r#"{"telefono":"555"}"#).expect("contact should deserialize");
        assert_eq!(contact.name, None);
        assert_eq!(contact.display_name(), "555");
    }

    #[test]
    fn test_message_wire_names() {
        let msg: StoredMessage =
            serde_json::from_str(r#"{"tipo":"recibido","contenido":"hola"}"#)
                .expect("message should deserialize");
        assert_eq!(msg.direction, Direction::Received);
        assert_eq!(msg.content, "hola");
        assert_eq!(msg.is_audio, None);

        let audio: StoredMessage = serde_json::from_str(
            r#"{"tipo":"enviado","contenido":"[Audio saved: a.wav]","es_audio":true}"#,
        )
        .expect("audio message should deserialize");
        assert_eq!(audio.direction, Direction::Sent);
        assert_eq!(audio.is_audio, Some(true));
    }

    #[test]
    fn test_message_serializes_without_absent_flag() {
        let json = serde_json::to_string(&StoredMessage::sent("hi")).expect("serialize");
        assert_eq!(json, r#"{"tipo":"enviado","contenido":"hi"}"#);

        let json = serde_json::to_string(&StoredMessage::sent_audio("[Audio saved: a.wav]"))
            .expect("serialize");
        assert!(json.contains(r#""es_audio":true"#));
    }
}
