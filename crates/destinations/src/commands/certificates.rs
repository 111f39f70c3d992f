use std::{fs, path::PathBuf};

use anyhow::Context;
use base64::Engine;
use destination_client::{requests, responses::Certificate, Client, Level};
use log::info;

use crate::commands::{print_json, LevelArg};

#[derive(Clone, Debug, clap::Parser)]
pub struct CertificatesCommand {
    #[arg(long, value_enum, default_value_t, global = true)]
    level: LevelArg,
    #[command(subcommand)]
    command: CertificateCommands,
}

#[derive(Clone, Debug, clap::Subcommand)]
enum CertificateCommands {
    /// List the names and types of all certificates
    List,
    /// Print a certificate, or write its decoded content to a file
    Get {
        name: String,
        /// Write the decoded content here instead of printing the certificate.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Upload a keystore or certificate
    Create {
        /// Name of the certificate; defaults to the file name.
        #[arg(long)]
        name: Option<String>,
        #[arg(long, default_value = "CERTIFICATE")]
        r#type: String,
        /// File with the binary content, e.g. a `.p12` or `.jks` keystore.
        file: PathBuf,
    },
    /// Delete a certificate
    Delete { name: String },
}

impl CertificatesCommand {
    pub async fn exec(self, client: &Client) -> anyhow::Result<()> {
        let Self { level, command } = self;
        let level: Level = level.into();
        match command {
            CertificateCommands::List => {
                for c in requests::certificates(level).send(client).await? {
                    println!("{}({})", c.name, c.r#type);
                }
            }
            CertificateCommands::Get { name, output } => {
                let certificate = requests::certificate(level, name).send(client).await?;
                match output {
                    Some(path) => {
                        let content = base64::engine::general_purpose::STANDARD
                            .decode(&certificate.content)
                            .context("Certificate content is not valid base64")?;
                        fs::write(&path, content)
                            .with_context(|| format!("Could not write {path:?}"))?;
                        info!("Wrote {} to {path:?}", certificate.name);
                    }
                    None => print_json(&certificate)?,
                }
            }
            CertificateCommands::Create { name, r#type, file } => {
                let name = match name {
                    Some(n) => n,
                    None => file
                        .file_name()
                        .and_then(|n| n.to_str())
                        .context("Could not infer a name from the file")?
                        .to_string(),
                };
                let content =
                    fs::read(&file).with_context(|| format!("Could not read {file:?}"))?;
                let certificate = Certificate {
                    name,
                    r#type,
                    content: base64::engine::general_purpose::STANDARD.encode(content),
                };
                requests::create_certificate(level, certificate)
                    .send(client)
                    .await?;
            }
            CertificateCommands::Delete { name } => {
                let affected = requests::delete_certificate(level, name)
                    .send(client)
                    .await?;
                print_json(&affected)?;
            }
        }
        Ok(())
    }
}
