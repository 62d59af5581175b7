//! Pagecraft CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! pc-cli migrate
//!
//! # Create a store
//! pc-cli store create -n "Demo Store" -s demo-store
//!
//! # Print the default layout of a page
//! pc-cli defaults category
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `store create` / `store list` - Manage stores
//! - `defaults` - Print a page's built-in default layout as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pc-cli")]
#[command(author, version, about = "Pagecraft CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Manage stores
    Store {
        #[command(subcommand)]
        action: StoreAction,
    },
    /// Print the built-in default layout for a page type
    Defaults {
        /// Page type (category, product, cart, checkout, success, account, login, header)
        page_type: String,
    },
}

#[derive(Subcommand)]
enum StoreAction {
    /// Create a new store
    Create {
        /// Store display name
        #[arg(short, long)]
        name: String,

        /// URL-safe handle (lowercase letters, digits, hyphens)
        #[arg(short, long)]
        slug: String,
    },
    /// List all stores
    List,
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

#[allow(clippy::print_stdout)]
async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Store { action } => match action {
            StoreAction::Create { name, slug } => {
                let store = commands::store::create(&name, &slug).await?;
                println!("{}", store.id);
            }
            StoreAction::List => {
                for store in commands::store::list().await? {
                    println!("{}\t{}\t{}", store.id, store.slug, store.name);
                }
            }
        },
        Commands::Defaults { page_type } => {
            println!("{}", commands::defaults::render(&page_type)?);
        }
    }
    Ok(())
}
