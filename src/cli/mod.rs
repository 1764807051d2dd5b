pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(name = "harbor")]
#[command(about = "Harbor CLI - inspect namespace resolution and route guard decisions")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Resolve the namespace for a tier, role and franchise")]
    Resolve(commands::resolve::ResolveArgs),

    #[command(about = "Normalize a franchise display name into its URL form")]
    Normalize {
        #[arg(help = "Franchise display name")]
        name: String,
    },

    #[command(about = "Evaluate the route guard for a path and session")]
    Check(commands::check::CheckArgs),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);

    match cli.command {
        Commands::Resolve(args) => commands::resolve::handle(args, output_format),
        Commands::Normalize { name } => commands::resolve::normalize(&name, output_format),
        Commands::Check(args) => commands::check::handle(args, output_format),
    }
}
