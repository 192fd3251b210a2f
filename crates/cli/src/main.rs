//! Quarry CLI - Database migrations, seeding, and schema export.
//!
//! # Usage
//!
//! ```bash
//! # Create the documents table
//! quarry-cli migrate
//!
//! # Replace all users and orders with generated data
//! quarry-cli seed --users 20 --orders 50
//!
//! # Print the GraphQL schema
//! quarry-cli schema > schema.graphql
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with synthetic users and orders
//! - `schema` - Print the GraphQL SDL

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "quarry-cli")]
#[command(author, version, about = "Quarry CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Replace all users and orders with generated data
    Seed {
        /// Number of users to create
        #[arg(short, long, default_value_t = quarry_api::seed::DEFAULT_USER_COUNT)]
        users: i32,

        /// Number of orders to create
        #[arg(short, long, default_value_t = quarry_api::seed::DEFAULT_ORDER_COUNT)]
        orders: i32,
    },
    /// Print the GraphQL schema definition
    Schema,
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
        Commands::Seed { users, orders } => commands::seed::run(users, orders).await?,
        Commands::Schema => commands::schema::print(),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_seed_defaults() {
        let cli = Cli::try_parse_from(["quarry-cli", "seed"]).unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Commands::Seed { users: 5, orders: 10 }));
    }

    #[test]
    fn test_seed_counts() {
        let cli = Cli::try_parse_from(["quarry-cli", "seed", "--users", "20", "-o", "50"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Commands::Seed { users: 20, orders: 50 }));
    }
}
