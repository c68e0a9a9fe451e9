//! Login messages: weekend notices, portfolio-change notices, and
//! dismissible one-time announcements, persisted as JSON on disk.

pub mod messages_model;
pub mod service;
pub mod store;


pub use messages_model::{Message, MessageKind, MessageSeverity, StoredMessage, UserMessages};
pub use service::MessageService;
pub use store::MessageStore;
