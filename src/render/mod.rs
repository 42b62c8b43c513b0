//! Message renderer
//!
//! Pure mapping from a stored message record to its display form. Audio
//! messages reach the client in a legacy shape: the file reference is
//! embedded in the plain content string as `"[Audio saved: <name>]"`, with
//! an optional `es_audio` flag that is authoritative when present. The
//! structured `DisplayForm` variant exists only client-side; the wire
//! format is preserved as-is.

use crate::gateway::models::StoredMessage;

const PLACEHOLDER_PREFIX: &str = "[Audio saved: ";
const PLACEHOLDER_SUFFIX: &str = "]";

/// Display form of a message, resolved from the stored record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayForm {
    /// Plain text bubble
    Text(String),
    /// Voice message with a playable source
    Audio {
        /// Resolved URL of the audio stream
        source: String,
        /// Bare file name, for labelling
        filename: String,
    },
}

/// Build the legacy placeholder string for an uploaded audio file
pub fn audio_placeholder(filename: &str) -> String {
    format!("{PLACEHOLDER_PREFIX}{filename}{PLACEHOLDER_SUFFIX}")
}

/// Extract the file name from a legacy placeholder string, if it matches
pub fn decode_placeholder(content: &str) -> Option<&str> {
    let name = content
        .strip_prefix(PLACEHOLDER_PREFIX)?
        .strip_suffix(PLACEHOLDER_SUFFIX)?;
    if name.is_empty() {
        return None;
    }
    Some(name)
}

/// Map a stored message to its display form. `audio_base` is the path
/// under which the backend serves audio files (no trailing slash).
///
/// A message flagged `es_audio` whose content does not carry a decodable
/// placeholder has no recoverable source; it falls back to its literal
/// content text (gap inherited from the legacy format).
pub fn render(audio_base: &str, msg: &StoredMessage) -> DisplayForm {
    let flagged = msg.is_audio == Some(true);
    match decode_placeholder(&msg.content) {
        Some(name) if flagged || msg.is_audio.is_none() => DisplayForm::Audio {
            source: format!("{}/{}", audio_base, name),
            filename: name.to_string(),
        },
        _ => DisplayForm::Text(msg.content.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::models::{Direction, StoredMessage};

    const BASE: &str = "https://example.test/audios";

    fn message(content: &str, is_audio: Option<bool>) -> StoredMessage {
        StoredMessage {
            direction: Direction::Sent,
            content: content.to_string(),
            is_audio,
        }
    }

    #[test]
    fn test_placeholder_round_trip() {
        let placeholder = audio_placeholder("foo.webm");
        assert_eq!(placeholder, "[Audio saved: foo.webm]");
        assert_eq!(decode_placeholder(&placeholder), Some("foo.webm"));
    }

    #[test]
    fn test_flagged_placeholder_renders_audio_reference() {
        let msg = message("[Audio saved: foo.webm]", Some(true));
        match render(BASE, &msg) {
            DisplayForm::Audio { source, filename } => {
                assert!(source.ends_with("foo.webm"));
                assert_eq!(source, "https://example.test/audios/foo.webm");
                assert_eq!(filename, "foo.webm");
            }
            other => panic!("Expected audio form, got {:?}", other),
        }
    }

    #[test]
    fn test_audio_inferred_from_pattern_when_flag_absent() {
        let msg = message("[Audio saved: bar.wav]", None);
        assert!(matches!(render(BASE, &msg), DisplayForm::Audio { .. }));
    }

    #[test]
    fn test_flag_false_is_authoritative() {
        let msg = message("[Audio saved: bar.wav]", Some(false));
        assert_eq!(
            render(BASE, &msg),
            DisplayForm::Text("[Audio saved: bar.wav]".to_string())
        );
    }

    #[test]
    fn test_flagged_without_pattern_falls_back_to_text() {
        let msg = message("voice note", Some(true));
        assert_eq!(render(BASE, &msg), DisplayForm::Text("voice note".to_string()));
    }

    #[test]
    fn test_plain_text_renders_verbatim() {
        let msg = message("hola", None);
        assert_eq!(render(BASE, &msg), DisplayForm::Text("hola".to_string()));
    }

    #[test]
    fn test_malformed_placeholders_rejected() {
        assert_eq!(decode_placeholder("[Audio saved: ]"), None);
        assert_eq!(decode_placeholder("[Audio saved: x"), None);
        assert_eq!(decode_placeholder("Audio saved: x]"), None);
        assert_eq!(decode_placeholder("hola"), None);
    }
}
