pub mod composer;
pub mod loader;
pub mod store;

pub use composer::{ComposerOutcome, MessageComposer};
pub use loader::ConversationLoader;
pub use store::ConversationStore;
