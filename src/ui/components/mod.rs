mod contact_list;
mod input_bar;
mod message_list;

pub use contact_list::ContactList;
pub use input_bar::{InputAction, InputBar};
pub use message_list::MessageList;
