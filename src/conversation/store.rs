//! Conversation state store
//!
//! Single source of truth for the contact snapshot, the active selection
//! and the ordered message list of the active conversation. The store does
//! no I/O itself: selection changes are announced through a registered
//! observer so the loader can react declaratively.

use crate::gateway::models::{Contact, StoredMessage};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tracing::debug;

/// Callback invoked synchronously after every selection change, with the
/// newly selected phone and the generation assigned to it.
pub type SelectionObserver = Box<dyn Fn(&str, u64) + Send + Sync>;

#[derive(Default)]
struct StoreInner {
    contacts: Vec<Contact>,
    active_phone: Option<String>,
    messages: Vec<StoredMessage>,
    /// Bumped on every selection change; history fetches carry the value
    /// they were issued under and stale completions are dropped.
    generation: u64,
}

/// Thread-safe, cloneable conversation store
#[derive(Clone)]
pub struct ConversationStore {
    inner: Arc<RwLock<StoreInner>>,
    observer: Arc<Mutex<Option<SelectionObserver>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            observer: Arc::new(Mutex::new(None)),
        }
    }

    /// Register the selection observer. At most one is held; registering
    /// replaces any previous observer.
    pub fn set_selection_observer(&self, observer: SelectionObserver) {
        *self.observer.lock() = Some(observer);
    }

    /// Replace the contact snapshot
    pub fn set_contacts(&self, contacts: Vec<Contact>) {
        self.inner.write().contacts = contacts;
    }

    pub fn contacts(&self) -> Vec<Contact> {
        self.inner.read().contacts.clone()
    }

    /// Select the active contact. Re-selecting the current contact is a
    /// no-op; otherwise the generation is bumped and the observer is
    /// notified after the lock is released.
    pub fn select_contact(&self, phone: &str) {
        let generation = {
            let mut inner = self.inner.write();
            if inner.active_phone.as_deref() == Some(phone) {
                return;
            }
            inner.active_phone = Some(phone.to_string());
            inner.generation += 1;
            inner.generation
        };

        debug!("Selected contact {} (generation {})", phone, generation);
        if let Some(observer) = self.observer.lock().as_ref() {
            observer(phone, generation);
        }
    }

    pub fn active_phone(&self) -> Option<String> {
        self.inner.read().active_phone.clone()
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation
    }

    /// Append an optimistic echo, preserving arrival order
    pub fn append_message(&self, message: StoredMessage) {
        self.inner.write().messages.push(message);
    }

    /// Replace the message list with freshly fetched history. Applied only
    /// when `generation` is still current ("latest request wins"); returns
    /// whether the replace was applied. A replace loses optimistic echoes
    /// not yet persisted server-side (accepted limitation).
    pub fn replace_messages(&self, generation: u64, messages: Vec<StoredMessage>) -> bool {
        let mut inner = self.inner.write();
        if generation != inner.generation {
            debug!(
                "Dropping stale history (generation {} != {})",
                generation, inner.generation
            );
            return false;
        }
        inner.messages = messages;
        true
    }

    pub fn messages(&self) -> Vec<StoredMessage> {
        self.inner.read().messages.clone()
    }

    pub fn message_count(&self) -> usize {
        self.inner.read().messages.len()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new()
    }
}
