//! API client module for the storefront backend

mod catalog;
mod chat;
pub mod client;
mod me;

pub use catalog::{category_products, seller_products};
pub use chat::{list_conversations, read_messages, send_message};
pub use me::whoami;
