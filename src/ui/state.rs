//! UI-facing application state
//!
//! Pure presentation state next to a handle on the conversation store.
//! All network and device work lives behind the loader, composer and
//! recorder; this struct holds only what the widgets read and write.

use crate::conversation::ConversationStore;

pub struct AppState {
    /// Shared conversation store (contacts, selection, messages)
    pub store: ConversationStore,

    /// Current text input buffer
    pub input_text: String,

    /// Last surfaced error, shown in the status line
    pub last_error: Option<String>,

    /// Dark mode flag (header switch)
    pub dark_mode: bool,
}

impl AppState {
    pub fn new(store: ConversationStore) -> Self {
        Self {
            store,
            input_text: String::new(),
            last_error: None,
            dark_mode: true,
        }
    }
}
