//! Gateway pipeline for running network operations off the UI thread
//!
//! Provides a channel-based interface: the UI sends commands, a worker
//! thread owns a tokio runtime and performs the HTTP calls sequentially,
//! and completions come back as events. Requests are never cancelled once
//! issued; stale history fetches are discarded by the generation token
//! carried through `LoadMessages`/`Messages`.

use crate::gateway::client::GatewayClient;
use crate::gateway::models::{AudioPayload, Contact, StoredMessage};
use crate::Result;
use crossbeam_channel::{bounded, Receiver, Sender};
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

/// Commands that can be sent to the gateway worker
#[derive(Debug, Clone)]
pub enum GatewayCommand {
    /// Fetch the contact snapshot
    LoadContacts,

    /// Fetch message history for a contact
    LoadMessages {
        phone: String,
        /// Selection generation this fetch belongs to
        generation: u64,
    },

    /// Send a text message
    SendText { phone: String, text: String },

    /// Upload a finalized voice recording
    SendAudio { phone: String, payload: AudioPayload },

    /// Shutdown the worker
    Shutdown,
}

/// The operation a failure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayOp {
    LoadContacts,
    LoadMessages,
    SendText,
    SendAudio,
}

/// Events emitted by the gateway worker
#[derive(Debug, Clone)]
pub enum GatewayEvent {
    /// Contact snapshot fetched
    Contacts(Vec<Contact>),

    /// Message history fetched
    Messages {
        phone: String,
        generation: u64,
        messages: Vec<StoredMessage>,
    },

    /// Text message accepted by the backend
    TextSent { phone: String, text: String },

    /// Voice message accepted by the backend
    AudioSent { phone: String, filename: String },

    /// An operation was not applied
    Failed { op: GatewayOp, error: String },

    /// Worker has shut down
    Shutdown,
}

/// Gateway pipeline with channel-based communication
pub struct GatewayPipeline {
    base_url: String,
    command_tx: Sender<GatewayCommand>,
    command_rx: Receiver<GatewayCommand>,
    event_tx: Sender<GatewayEvent>,
    event_rx: Receiver<GatewayEvent>,
}

impl GatewayPipeline {
    /// Create a new pipeline for the given backend base URL
    pub fn new(base_url: impl Into<String>, capacity: usize) -> Self {
        let (command_tx, command_rx) = bounded(capacity);
        let (event_tx, event_rx) = bounded(capacity);

        Self {
            base_url: base_url.into(),
            command_tx,
            command_rx,
            event_tx,
            event_rx,
        }
    }

    /// Get a sender for commands
    pub fn command_sender(&self) -> Sender<GatewayCommand> {
        self.command_tx.clone()
    }

    /// Get a receiver for events
    pub fn event_receiver(&self) -> Receiver<GatewayEvent> {
        self.event_rx.clone()
    }

    /// Start the worker thread
    pub fn start_worker(self) -> Result<()> {
        let base_url = self.base_url.clone();
        let command_rx = self.command_rx.clone();
        let event_tx = self.event_tx.clone();

        std::thread::spawn(move || {
            info!("Gateway worker starting");

            let runtime = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    error!("Failed to create tokio runtime: {}", e);
                    let _ = event_tx.send(GatewayEvent::Shutdown);
                    return;
                }
            };

            let client = GatewayClient::new(base_url);

            loop {
                match command_rx.recv() {
                    Ok(GatewayCommand::LoadContacts) => {
                        match runtime.block_on(client.list_contacts()) {
                            Ok(contacts) => {
                                let _ = event_tx.send(GatewayEvent::Contacts(contacts));
                            }
                            Err(e) => {
                                let _ = event_tx.send(GatewayEvent::Failed {
                                    op: GatewayOp::LoadContacts,
                                    error: e.to_string(),
                                });
                            }
                        }
                    }

                    Ok(GatewayCommand::LoadMessages { phone, generation }) => {
                        debug!("Loading messages for {} (generation {})", phone, generation);
                        match runtime.block_on(client.list_messages(&phone)) {
                            Ok(messages) => {
                                let _ = event_tx.send(GatewayEvent::Messages {
                                    phone,
                                    generation,
                                    messages,
                                });
                            }
                            Err(e) => {
                                let _ = event_tx.send(GatewayEvent::Failed {
                                    op: GatewayOp::LoadMessages,
                                    error: e.to_string(),
                                });
                            }
                        }
                    }

                    Ok(GatewayCommand::SendText { phone, text }) => {
                        match runtime.block_on(client.send_text(&phone, &text)) {
                            Ok(()) => {
                                let _ = event_tx.send(GatewayEvent::TextSent { phone, text });
                            }
                            Err(e) => {
                                let _ = event_tx.send(GatewayEvent::Failed {
                                    op: GatewayOp::SendText,
                                    error: e.to_string(),
                                });
                            }
                        }
                    }

                    Ok(GatewayCommand::SendAudio { phone, payload }) => {
                        let filename = payload.filename.clone();
                        debug!(
                            "Uploading {} ({} bytes) for {}",
                            filename,
                            payload.bytes.len(),
                            phone
                        );
                        match runtime.block_on(client.send_audio(&phone, payload)) {
                            Ok(()) => {
                                let _ = event_tx.send(GatewayEvent::AudioSent { phone, filename });
                            }
                            Err(e) => {
                                let _ = event_tx.send(GatewayEvent::Failed {
                                    op: GatewayOp::SendAudio,
                                    error: e.to_string(),
                                });
                            }
                        }
                    }

                    Ok(GatewayCommand::Shutdown) => {
                        info!("Gateway worker shutting down");
                        let _ = event_tx.send(GatewayEvent::Shutdown);
                        break;
                    }

                    Err(e) => {
                        error!("Command channel error: {}", e);
                        break;
                    }
                }
            }

            info!("Gateway worker stopped");
        });

        Ok(())
    }
}
