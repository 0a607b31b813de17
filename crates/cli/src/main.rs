//! Optica CLI - command-line storefront client.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! optica catalog list
//! optica catalog search "aviator"
//! optica catalog show 12
//!
//! # Manage the cart
//! optica cart show
//! optica cart add 12 --lens 3 --quantity 2
//! optica cart set-quantity 7 1
//! optica cart clear
//!
//! # Place and track orders
//! optica checkout --name "Asha Rao" --street "4 Lake View" --city Pune \
//!     --state MH --pincode 411001 --phone 9000000000 --payment cod
//! optica track ORD-2026-042
//! optica orders
//! ```
//!
//! # Environment Variables
//!
//! - `OPTICA_API_BASE_URL` - base URL of the storefront API (required)
//! - `OPTICA_USER_ID` - acting user id (default 1)
//! - `OPTICA_SNAPSHOT_DIR` - local snapshot directory (default `.optica`)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};
use optica_storefront::config::StorefrontConfig;
use optica_storefront::session::Storefront;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{cart, catalog, checkout, track};

#[derive(Parser)]
#[command(name = "optica")]
#[command(author, version, about = "Optica storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse products and lenses
    Catalog {
        #[command(subcommand)]
        action: catalog::CatalogAction,
    },
    /// Inspect and edit the cart
    Cart {
        #[command(subcommand)]
        action: cart::CartAction,
    },
    /// Place an order for the current cart
    Checkout(checkout::CheckoutArgs),
    /// Track an order by its order number
    Track(track::TrackArgs),
    /// List your orders, newest first
    Orders,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("optica=info")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let session = Storefront::new(config)?;

    match cli.command {
        Commands::Catalog { action } => catalog::run(&session, action).await?,
        Commands::Cart { action } => cart::run(&session, action).await?,
        Commands::Checkout(args) => checkout::run(&session, args).await?,
        Commands::Track(args) => track::run(&session, args).await?,
        Commands::Orders => track::list_orders(&session).await?,
    }
    Ok(())
}
