//! Chat models

use serde::{Deserialize, Serialize};

/// Conversation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: String,
    pub title: Option<String>,
    pub last_message: Option<ChatMessage>,
    pub updated_at: Option<String>,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Option<String>,
    pub sender: Option<String>,
    pub body: Option<String>,
    pub created_at: Option<String>,
}
