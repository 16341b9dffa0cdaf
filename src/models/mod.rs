//! Shared data models

pub mod account;
pub mod chat;
pub mod product;

pub use account::Account;
pub use chat::{ChatMessage, Conversation};
pub use product::{Product, Seller};
