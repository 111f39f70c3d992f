#![forbid(unsafe_code)]

mod commands;
mod connection;
mod logger;

use clap::{Parser, Subcommand};

use crate::{
    commands::{
        certificates::CertificatesCommand, completions::CompletionsCommand,
        create::CreateCommand, delete::DeleteCommand, find::FindCommand, get::GetCommand,
        list::ListCommand, update::UpdateCommand,
    },
    connection::ConnectionArgs,
};

/// Manage destinations and certificates in the Destination Service.
#[derive(Parser)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,
    /// Print more to stderr; may be repeated.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn exec(self) -> anyhow::Result<()> {
        let Self {
            connection,
            verbose: _,
            command,
        } = self;
        let client = || connection.client();
        match command {
            Commands::Find(cmd) => cmd.exec(&client()?).await?,
            Commands::List(cmd) => cmd.exec(&client()?).await?,
            Commands::Get(cmd) => cmd.exec(&client()?).await?,
            Commands::Create(cmd) => cmd.exec(&client()?).await?,
            Commands::Update(cmd) => cmd.exec(&client()?).await?,
            Commands::Delete(cmd) => cmd.exec(&client()?).await?,
            Commands::Certificates(cmd) => cmd.exec(&client()?).await?,
            Commands::Completions(cmd) => cmd.exec::<Self>()?,
        }
        Ok(())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Find a destination on any level, instance level first
    Find(FindCommand),
    /// List destinations
    List(ListCommand),
    /// Print a destination
    Get(GetCommand),
    /// Create a destination from a flat JSON object on stdin
    Create(CreateCommand),
    /// Replace a destination with a flat JSON object on stdin
    Update(UpdateCommand),
    /// Delete a destination
    Delete(DeleteCommand),
    /// Manage certificates
    Certificates(CertificatesCommand),
    /// Print a completion file for the given shell.
    ///
    /// Example: `destinations completions zsh | source /dev/stdin`.
    Completions(CompletionsCommand),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init(cli.verbose, cli.connection.debug);
    cli.exec().await
}
