//! Tucano CLI - drive a cart against the catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! tucano cart show
//!
//! # Add one unit of product 3
//! tucano cart add 3
//!
//! # Set product 3 to four units
//! tucano cart set 3 4
//!
//! # Remove product 3
//! tucano cart remove 3
//! ```
//!
//! The cart snapshot lives in the file named by `TUCANO_CART_FILE`, so
//! consecutive invocations act on the same cart.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tucano")]
#[command(author, version, about = "Tucano Shoes CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: i32,
    },
    /// Remove a product's line item
    Remove {
        /// Product id
        id: i32,
    },
    /// Set a line item's quantity
    Set {
        /// Product id
        id: i32,
        /// Target quantity
        amount: i32,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Cart { action } => {
            let store = commands::cart::open_store()?;
            match action {
                CartAction::Show => {}
                CartAction::Add { id } => commands::cart::add(&store, id).await,
                CartAction::Remove { id } => commands::cart::remove(&store, id).await,
                CartAction::Set { id, amount } => {
                    commands::cart::set_amount(&store, id, amount).await;
                }
            }
            commands::cart::render(&store).await;
        }
    }
    Ok(())
}
