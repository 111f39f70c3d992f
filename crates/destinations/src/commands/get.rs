use destination_client::{requests, Client};

use crate::commands::{print_json, LevelArg};

#[derive(Clone, Debug, clap::Parser)]
pub struct GetCommand {
    /// Name of the destination.
    name: String,
    #[arg(long, value_enum, default_value_t)]
    level: LevelArg,
}

impl GetCommand {
    pub async fn exec(self, client: &Client) -> anyhow::Result<()> {
        let Self { name, level } = self;
        let destination = requests::destination(level.into(), name)
            .send(client)
            .await?;
        print_json(&destination)
    }
}
