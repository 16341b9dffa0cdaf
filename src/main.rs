//! Storefront CLI - Lightweight marketplace client
//!
//! A terminal client for browsing the storefront and chatting with sellers.

mod api;
mod catalog;
mod config;
mod models;
mod session;
mod storage;

use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::client::StorefrontClient;
use crate::catalog::SortOrder;
use crate::session::SessionStore;

#[derive(Parser)]
#[command(name = "storefront-cli")]
#[command(about = "Lightweight CLI client for the marketplace storefront", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a session token (prompted for if not given)
    Login {
        /// Session token value
        token: Option<String>,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show current session status
    Status,

    /// Browse the product grid of a category
    Category {
        /// Category slug (e.g. "books")
        slug: String,

        /// Sort products by price
        #[arg(short, long, value_enum)]
        sort: Option<SortOrder>,

        /// Maximum number of products to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Browse the product grid of a seller
    Seller {
        /// Seller ID
        id: String,

        /// Sort products by price
        #[arg(short, long, value_enum)]
        sort: Option<SortOrder>,

        /// Maximum number of products to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// List recent conversations
    Chats {
        /// Maximum number of conversations to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Read messages from a conversation
    Read {
        /// Conversation ID (from `chats` output)
        conversation_id: String,

        /// Maximum number of messages to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Send a message
    Send {
        /// Conversation ID (from `chats` output)
        #[arg(short, long)]
        to: String,

        /// Message content
        message: String,
    },

    /// Show the signed-in account (verify the session works)
    Whoami,

    /// Show or change the storefront base URL
    Config {
        /// New base URL to save
        #[arg(long)]
        api_base: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    // One session store per process; every consumer shares this handle.
    let session = Arc::new(SessionStore::new(storage::resolve()));

    match cli.command {
        Commands::Login { token } => {
            login(&session, token)?;
        }
        Commands::Logout => {
            session.clear_token();
            println!("Signed out.");
        }
        Commands::Status => {
            status(&session);
        }
        Commands::Category { slug, sort, limit } => {
            let client = StorefrontClient::new(session.clone())?;
            api::category_products(&client, &slug, sort, limit).await?;
        }
        Commands::Seller { id, sort, limit } => {
            let client = StorefrontClient::new(session.clone())?;
            api::seller_products(&client, &id, sort, limit).await?;
        }
        Commands::Chats { limit } => {
            let client = StorefrontClient::new(session.clone())?;
            api::list_conversations(&client, limit).await?;
        }
        Commands::Read {
            conversation_id,
            limit,
        } => {
            let client = StorefrontClient::new(session.clone())?;
            api::read_messages(&client, &conversation_id, limit).await?;
        }
        Commands::Send { to, message } => {
            let client = StorefrontClient::new(session.clone())?;
            api::send_message(&client, &to, &message).await?;
        }
        Commands::Whoami => {
            let client = StorefrontClient::new(session.clone())?;
            api::whoami(&client).await?;
        }
        Commands::Config { api_base } => {
            configure(api_base)?;
        }
    }

    Ok(())
}

/// Store a session token, prompting on stdin when none was passed.
fn login(session: &SessionStore, token: Option<String>) -> Result<()> {
    let token = match token {
        Some(t) => t,
        None => {
            print!("Session token: ");
            io::stdout().flush()?;
            let mut line = String::new();
            io::stdin().read_line(&mut line)?;
            line.trim().to_string()
        }
    };

    if token.is_empty() {
        bail!("No token provided");
    }

    session.set_token(token);
    println!("Signed in.");
    Ok(())
}

/// Display current session status.
fn status(session: &SessionStore) {
    match session.token() {
        Some(token) => {
            println!("Session token: present ({} chars)", token.len());
        }
        None => {
            println!("Session token: none");
            println!("\nRun 'storefront-cli login' to authenticate.");
        }
    }
}

/// Show or update the configured base URL.
fn configure(api_base: Option<String>) -> Result<()> {
    let mut config = config::Config::load()?;

    match api_base {
        Some(base) => {
            config.api_base = Some(base);
            config.save()?;
            println!("Saved. api_base: {}", config.api_base());
        }
        None => {
            println!("api_base: {}", config.api_base());
        }
    }

    Ok(())
}
