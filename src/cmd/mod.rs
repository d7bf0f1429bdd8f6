use crate::{
    pkg::{conf::settings, patch::Patcher, server::Server},
    prelude::Result,
};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(about = "utilities for the word practice site")]
struct Cmd {
    #[command(subcommand)]
    command: Option<SubCommandType>,
}

#[derive(Subcommand)]
enum SubCommandType {
    /// add the All Words button to the word-display section
    Patch,
    /// serve the site with CORS and cache-control headers
    Serve,
}

pub async fn run() -> Result<()> {
    let args = Cmd::parse();
    match args.command {
        Some(SubCommandType::Patch) => {
            Patcher::new(settings.target()).apply()?;
            println!("All Words button added successfully!");
        }
        Some(SubCommandType::Serve) => {
            let server = Server::bind(settings.port(), settings.root()).await?;
            server.start().await?;
        }
        None => {
            tracing::error!("no subcommand passed")
        }
    }
    Ok(())
}
