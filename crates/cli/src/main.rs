//! Vitrine CLI - Database migrations and shop management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! vitrine migrate
//!
//! # Create a shop with default configuration
//! vitrine seed --tenant demo --alias demo-shop
//!
//! # Print a tenant's normalized configuration
//! vitrine show --tenant demo
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Insert a default shop document for a tenant
//! - `show` - Print a tenant's configuration after normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Insert a default shop document for a tenant
    Seed {
        /// Tenant key the document is stored under
        #[arg(short, long)]
        tenant: String,

        /// Public alias (subdomain / path segment) for the shop
        #[arg(short, long)]
        alias: String,
    },
    /// Print a tenant's configuration after normalization
    Show {
        /// Tenant key to look up
        #[arg(short, long)]
        tenant: String,
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
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { tenant, alias } => commands::seed::shop(&tenant, &alias).await?,
        Commands::Show { tenant } => commands::show::shop(&tenant).await?,
    }
    Ok(())
}
