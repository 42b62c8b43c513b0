//! Thin request layer over the backend gateway
//!
//! Four network operations plus audio URL resolution. No retry logic: a
//! failed call surfaces as a `Network` error and the operation is simply
//! not applied.

use crate::gateway::models::{AudioPayload, Contact, StoredMessage};
use crate::{CharlaError, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client as HttpClient;
use serde_json::json;
use tracing::debug;

pub struct GatewayClient {
    http: HttpClient,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: HttpClient::new(),
            base_url,
        }
    }

    /// Fetch the contact snapshot. `GET /contactos`
    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let url = format!("{}/contactos", self.base_url);
        let contacts = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Contact>>()
            .await?;
        debug!("Fetched {} contacts", contacts.len());
        Ok(contacts)
    }

    /// Fetch the ordered message history for one contact.
    /// `GET /mensajes/{telefono}`
    pub async fn list_messages(&self, phone: &str) -> Result<Vec<StoredMessage>> {
        let url = format!("{}/mensajes/{}", self.base_url, phone);
        let messages = self
            .http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<StoredMessage>>()
            .await?;
        debug!("Fetched {} messages for {}", messages.len(), phone);
        Ok(messages)
    }

    /// Send a text message. `POST /mensajes` with `{telefono, mensaje}`.
    ///
    /// Empty text must be rejected by the caller before this is reached;
    /// the check here is a final guard so no network call goes out.
    pub async fn send_text(&self, phone: &str, text: &str) -> Result<()> {
        if text.trim().is_empty() {
            return Err(CharlaError::Validation("empty message".to_string()));
        }
        let url = format!("{}/mensajes", self.base_url);
        self.http
            .post(&url)
            .json(&json!({ "telefono": phone, "mensaje": text }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Upload a voice message. `POST /mensajes/audio` as multipart form
    /// with parts `telefono` and `audio`.
    pub async fn send_audio(&self, phone: &str, payload: AudioPayload) -> Result<()> {
        let url = format!("{}/mensajes/audio", self.base_url);
        let part = Part::bytes(payload.bytes)
            .file_name(payload.filename)
            .mime_str(&payload.mime_type)
            .map_err(|e| CharlaError::Network(e.to_string()))?;
        let form = Form::new()
            .text("telefono", phone.to_string())
            .part("audio", part);
        self.http
            .post(&url)
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Playable URL for a stored audio file. `GET /audios/{filename}`
    pub fn audio_url(&self, filename: &str) -> String {
        format!("{}/audios/{}", self.base_url, filename)
    }

    /// Base path under which audio files are served
    pub fn audio_base(&self) -> String {
        format!("{}/audios", self.base_url)
    }
}
