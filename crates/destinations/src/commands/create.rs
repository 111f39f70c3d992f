use destination_client::{requests, Client};
use log::info;

use crate::commands::{read_destination, LevelArg};

#[derive(Clone, Debug, clap::Parser)]
pub struct CreateCommand {
    #[arg(long, value_enum, default_value_t)]
    level: LevelArg,
}

impl CreateCommand {
    pub async fn exec(self, client: &Client) -> anyhow::Result<()> {
        let Self { level } = self;
        let destination = read_destination()?;
        let name = destination.name.clone();
        requests::create_destination(level.into(), destination)
            .send(client)
            .await?;
        info!("Created {name}");
        Ok(())
    }
}
