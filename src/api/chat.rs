//! Buyer/seller chat endpoints

use anyhow::{Context, Result};
use chrono::DateTime;
use serde::Deserialize;
use serde_json::json;

use super::client::StorefrontClient;
use crate::models::{ChatMessage, Conversation};

#[derive(Debug, Deserialize)]
struct ConversationsResponse {
    conversations: Option<Vec<Conversation>>,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    messages: Option<Vec<ChatMessage>>,
}

/// Display name for a conversation.
fn conversation_name(conv: &Conversation) -> String {
    if let Some(ref title) = conv.title {
        if !title.is_empty() {
            return title.clone();
        }
    }
    // Fall back to the last message sender or the conversation ID
    if let Some(ref msg) = conv.last_message {
        if let Some(ref sender) = msg.sender {
            if !sender.is_empty() {
                return sender.clone();
            }
        }
    }
    conv.id.clone()
}

/// Render an RFC 3339 timestamp for display, passing through anything
/// that doesn't parse.
fn format_timestamp(raw: &str) -> String {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// List recent conversations (prints to stdout).
pub async fn list_conversations(client: &StorefrontClient, limit: usize) -> Result<()> {
    let resp = client.get("/chat/conversations").await?;
    let data: ConversationsResponse = resp
        .json()
        .await
        .context("Failed to parse conversations response")?;

    let conversations = data.conversations.unwrap_or_default();

    println!("\nConversations:");
    println!("{:-<60}", "");

    if conversations.is_empty() {
        println!("  (no conversations found)");
        return Ok(());
    }

    for conv in conversations.iter().take(limit) {
        println!("{}", conversation_name(conv));
        println!("  ID: {}", conv.id);
        if let Some(ref time) = conv.updated_at {
            println!("  Last: {}", format_timestamp(time));
        }
        if let Some(ref msg) = conv.last_message {
            if let Some(ref body) = msg.body {
                if !body.trim().is_empty() {
                    let sender = msg.sender.as_deref().unwrap_or("?");
                    println!("  [{}]: {}", sender, body.trim());
                }
            }
        }
        println!();
    }

    Ok(())
}

/// Read the most recent messages from a conversation, oldest first.
pub async fn read_messages(
    client: &StorefrontClient,
    conversation_id: &str,
    limit: usize,
) -> Result<()> {
    let resp = client
        .get(&format!("/chat/conversations/{}/messages", conversation_id))
        .await?;
    let data: MessagesResponse = resp
        .json()
        .await
        .context("Failed to parse messages response")?;

    let mut messages = data.messages.unwrap_or_default();
    messages.truncate(limit);
    // Backend returns newest first; display reads top to bottom
    messages.reverse();

    println!("\nMessages:");
    println!("{:-<60}", "");

    if messages.is_empty() {
        println!("  (no messages)");
        return Ok(());
    }

    for msg in &messages {
        let sender = msg.sender.as_deref().unwrap_or("?");
        let time = msg
            .created_at
            .as_deref()
            .map(format_timestamp)
            .unwrap_or_default();
        println!("[{}] {}:", time, sender);
        println!("  {}", msg.body.as_deref().unwrap_or("").trim());
    }

    Ok(())
}

/// Send a message to a conversation.
pub async fn send_message(
    client: &StorefrontClient,
    conversation_id: &str,
    message: &str,
) -> Result<()> {
    let body = json!({ "body": message });
    client
        .post(
            &format!("/chat/conversations/{}/messages", conversation_id),
            &body,
        )
        .await?;

    println!("Message sent to {}", conversation_id);
    Ok(())
}
