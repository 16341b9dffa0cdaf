//! Account endpoint (/me)

use anyhow::{Context, Result};

use super::client::StorefrontClient;
use crate::models::Account;

/// Fetch and display the signed-in account.
pub async fn whoami(client: &StorefrontClient) -> Result<()> {
    let resp = client.get("/me").await?;
    let me: Account = resp.json().await.context("Failed to parse /me response")?;

    println!();
    println!("Name:  {}", me.display_name.as_deref().unwrap_or("(none)"));
    println!("Email: {}", me.email.as_deref().unwrap_or("(none)"));
    println!("ID:    {}", me.id);

    Ok(())
}
