pub mod client;
pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use client::ApiClient;

#[derive(Parser)]
#[command(name = "foodshare")]
#[command(about = "Foodshare CLI - Command-line client for the food sharing API")]
#[command(version)]
pub struct Cli {
    #[arg(
        long,
        global = true,
        env = "FOODSHARE_SERVER",
        default_value = "http://localhost:5000",
        help = "Base URL of the API server"
    )]
    pub server: String,

    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Check the server liveness endpoint")]
    Health,

    #[command(about = "List the featured listings (largest quantity first)")]
    Featured,

    #[command(about = "List available listings")]
    Available {
        #[arg(long, help = "Case-insensitive food name substring")]
        search: Option<String>,
        #[arg(long, help = "Expiry date order: asc or des")]
        sort: Option<String>,
    },

    #[command(about = "Show a single listing")]
    Details {
        #[arg(help = "Listing ID")]
        id: String,
    },

    #[command(about = "Create a listing from a JSON object")]
    Add {
        #[arg(help = "Listing JSON, or '-' to read from stdin")]
        json: String,
    },

    #[command(about = "Delete a listing")]
    Remove {
        #[arg(help = "Listing ID")]
        id: String,
    },

    #[command(about = "Obtain an access token for an email")]
    Token {
        #[arg(help = "Email to sign into the token")]
        email: String,
        #[arg(long, default_value = "token", help = "Name of the token cookie")]
        cookie_name: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// `--text` wins when both flags are given; text is the default
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json && !cli.text {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let client = ApiClient::new(&cli.server)?;

    match cli.command {
        Commands::Health => commands::server::health(&client, output_format).await,
        Commands::Featured => commands::foods::featured(&client, output_format).await,
        Commands::Available { search, sort } => {
            commands::foods::available(&client, search, sort, output_format).await
        }
        Commands::Details { id } => commands::foods::details(&client, &id, output_format).await,
        Commands::Add { json } => commands::foods::add(&client, &json, output_format).await,
        Commands::Remove { id } => commands::foods::remove(&client, &id, output_format).await,
        Commands::Token { email, cookie_name } => {
            commands::auth::token(&client, &email, &cookie_name, output_format).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format_for(args: &[&str]) -> OutputFormat {
        let cli = Cli::try_parse_from(args).unwrap();
        OutputFormat::from_cli(&cli)
    }

    #[test]
    fn output_format_flags() {
        assert!(matches!(format_for(&["foodshare", "featured"]), OutputFormat::Text));
        assert!(matches!(format_for(&["foodshare", "--json", "featured"]), OutputFormat::Json));
        assert!(matches!(format_for(&["foodshare", "--text", "featured"]), OutputFormat::Text));
        assert!(matches!(format_for(&["foodshare", "--json", "--text", "featured"]), OutputFormat::Text));
    }
}
