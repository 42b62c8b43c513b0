//! Conversation loader
//!
//! Reactive synchronizer between the store and the gateway. Two triggers:
//! contacts are loaded once on mount, and message history is reloaded on
//! every selection change via the store's observer. History completions
//! are applied only when their generation token is still current, so a
//! slow fetch can never overwrite a newer one.

use crate::conversation::store::ConversationStore;
use crate::gateway::pipeline::{GatewayCommand, GatewayEvent, GatewayOp};
use crossbeam_channel::Sender;
use tracing::{debug, warn};

pub struct ConversationLoader {
    store: ConversationStore,
    commands: Sender<GatewayCommand>,
}

impl ConversationLoader {
    /// Create the loader and register it as the store's selection observer
    pub fn new(store: ConversationStore, commands: Sender<GatewayCommand>) -> Self {
        let fetch_tx = commands.clone();
        store.set_selection_observer(Box::new(move |phone, generation| {
            let command = GatewayCommand::LoadMessages {
                phone: phone.to_string(),
                generation,
            };
            if let Err(e) = fetch_tx.send(command) {
                warn!("Could not request history for {}: {}", phone, e);
            }
        }));

        Self { store, commands }
    }

    /// Request the contact snapshot; called once at startup
    pub fn load_contacts(&self) {
        if let Err(e) = self.commands.send(GatewayCommand::LoadContacts) {
            warn!("Could not request contacts: {}", e);
        }
    }

    /// Apply a gateway completion. Returns a user-facing error message when
    /// an operation this loader owns was not applied.
    pub fn apply(&self, event: &GatewayEvent) -> Option<String> {
        match event {
            GatewayEvent::Contacts(contacts) => {
                self.store.set_contacts(contacts.clone());
                None
            }
            GatewayEvent::Messages {
                phone,
                generation,
                messages,
            } => {
                if self.store.replace_messages(*generation, messages.clone()) {
                    debug!("Applied {} messages for {}", messages.len(), phone);
                } else {
                    debug!("Discarded stale history for {}", phone);
                }
                None
            }
            GatewayEvent::Failed {
                op: GatewayOp::LoadContacts,
                error,
            } => {
                // No contacts available; the empty snapshot stands.
                warn!("Contact load failed: {}", error);
                Some("Could not load contacts.".to_string())
            }
            GatewayEvent::Failed {
                op: GatewayOp::LoadMessages,
                error,
            } => {
                // Previous message list stays untouched.
                warn!("History load failed: {}", error);
                Some("Could not load the conversation.".to_string())
            }
            _ => None,
        }
    }
}
