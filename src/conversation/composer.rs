//! Message composer
//!
//! Validates outgoing text and runs the optimistic-echo protocol: the echo
//! is appended (and the input buffer cleared) only after the backend has
//! accepted the send. A failed send leaves both the store and the input
//! untouched.

use crate::conversation::store::ConversationStore;
use crate::gateway::models::StoredMessage;
use crate::gateway::pipeline::{GatewayCommand, GatewayEvent, GatewayOp};
use crossbeam_channel::Sender;
use tracing::{debug, warn};

/// What applying a gateway event meant for the composer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposerOutcome {
    /// Event did not belong to the composer
    Ignored,
    /// Send accepted: the echo was appended, the input should be cleared
    Sent,
    /// Send not applied; user-facing message to surface
    Failed(String),
}

pub struct MessageComposer {
    store: ConversationStore,
    commands: Sender<GatewayCommand>,
}

impl MessageComposer {
    pub fn new(store: ConversationStore, commands: Sender<GatewayCommand>) -> Self {
        Self { store, commands }
    }

    /// Submit outgoing text. Whitespace-only text and the no-selection case
    /// are no-ops: nothing is mutated and no command is issued. Returns
    /// whether a send was issued.
    pub fn submit(&self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        let Some(phone) = self.store.active_phone() else {
            debug!("No active contact; dropping submit");
            return false;
        };

        let command = GatewayCommand::SendText {
            phone,
            text: text.to_string(),
        };
        match self.commands.send(command) {
            Ok(()) => true,
            Err(e) => {
                warn!("Could not issue send: {}", e);
                false
            }
        }
    }

    /// Apply a gateway completion for an outgoing text message
    pub fn apply(&self, event: &GatewayEvent) -> ComposerOutcome {
        match event {
            GatewayEvent::TextSent { text, .. } => {
                self.store.append_message(StoredMessage::sent(text.clone()));
                ComposerOutcome::Sent
            }
            GatewayEvent::Failed {
                op: GatewayOp::SendText,
                error,
            } => {
                warn!("Text send failed: {}", error);
                ComposerOutcome::Failed("Message was not sent.".to_string())
            }
            _ => ComposerOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::models::Direction;
    use crossbeam_channel::bounded;

    fn setup() -> (
        ConversationStore,
        MessageComposer,
        crossbeam_channel::Receiver<GatewayCommand>,
    ) {
        let store = ConversationStore::new();
        let (tx, rx) = bounded(16);
        let composer = MessageComposer::new(store.clone(), tx);
        (store, composer, rx)
    }

    #[test]
    fn test_whitespace_only_is_a_noop() {
        let (store, composer, commands) = setup();
        store.select_contact("555");

        assert!(!composer.submit("   \t\n"));
        assert!(commands.try_recv().is_err());
        assert_eq!(store.message_count(), 0);
    }

    #[test]
    fn test_submit_without_selection_is_a_noop() {
        let (_store, composer, commands) = setup();

        assert!(!composer.submit("hi"));
        assert!(commands.try_recv().is_err());
    }

    #[test]
    fn test_submit_issues_send_with_original_text() {
        let (store, composer, commands) = setup();
        store.select_contact("555");

        assert!(composer.submit("  hi there "));
        match commands.try_recv().expect("a send should be issued") {
            GatewayCommand::SendText { phone, text } => {
                assert_eq!(phone, "555");
                // Text travels as typed; trimming is only for the emptiness check
                assert_eq!(text, "  hi there ");
            }
            other => panic!("Expected SendText, got {:?}", other),
        }
    }

    #[test]
    fn test_accepted_send_appends_exactly_one_trailing_echo() {
        let (store, composer, _commands) = setup();
        store.select_contact("555");
        store.append_message(StoredMessage {
            direction: Direction::Received,
            content: "hola".to_string(),
            is_audio: None,
        });

        let outcome = composer.apply(&GatewayEvent::TextSent {
            phone: "555".to_string(),
            text: "hi".to_string(),
        });
        assert_eq!(outcome, ComposerOutcome::Sent);

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        let last = messages.last().expect("trailing echo");
        assert_eq!(last.direction, Direction::Sent);
        assert_eq!(last.content, "hi");
        assert_eq!(last.is_audio, None);
    }

    #[test]
    fn test_failed_send_leaves_store_untouched() {
        let (store, composer, _commands) = setup();

        let outcome = composer.apply(&GatewayEvent::Failed {
            op: GatewayOp::SendText,
            error: "boom".to_string(),
        });
        assert!(matches!(outcome, ComposerOutcome::Failed(_)));
        assert_eq!(store.message_count(), 0);
    }
}
