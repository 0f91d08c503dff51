//! Conversation module - canonical records for remote support threads.
//!
//! Raw JSON from the support API is normalized into [`Conversation`] and
//! [`Message`] at the system boundary.

mod conversation;
mod fields;
mod message;

pub use conversation::{Conversation, Party};
pub use message::{Author, Message, MessageKind};
