//! Shreck CLI - Saved cart and catalog tools.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart saved in a storage directory
//! shreck-cli cart show --storage ./state
//!
//! # Delete the saved cart
//! shreck-cli cart clear --storage ./state
//!
//! # Run the product grid pipeline over a catalog file
//! shreck-cli catalog query --catalog web/catalog.json --category ropa --search sudadera --sort price-asc
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shreck-cli")]
#[command(author, version, about = "Shreck CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect or reset a saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Query the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the saved cart's lines and totals
    Show {
        /// Directory holding the saved cart
        #[arg(short, long)]
        storage: PathBuf,
    },
    /// Delete the saved cart
    Clear {
        /// Directory holding the saved cart
        #[arg(short, long)]
        storage: PathBuf,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print the catalog filtered and sorted like the product grid
    Query {
        /// Catalog JSON file
        #[arg(short, long, default_value = "web/catalog.json")]
        catalog: PathBuf,

        /// Category tag, or `all`
        #[arg(long)]
        category: Option<String>,

        /// Case-insensitive name search
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Sort mode (`popular`, `price-asc`, `price-desc`, `name`)
        #[arg(long, default_value = "popular")]
        sort: String,
    },
}

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shreck_cli=info,shreck_storefront=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show { storage } => commands::cart::show(&storage)?,
            CartAction::Clear { storage } => commands::cart::clear(&storage)?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Query {
                catalog,
                category,
                search,
                sort,
            } => commands::catalog::query(&catalog, category.as_deref(), search, &sort)?,
        },
    }
    Ok(())
}
