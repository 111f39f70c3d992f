use destination_client::{requests, Client};

use crate::commands::{print_json, read_destination, LevelArg};

#[derive(Clone, Debug, clap::Parser)]
pub struct UpdateCommand {
    #[arg(long, value_enum, default_value_t)]
    level: LevelArg,
}

impl UpdateCommand {
    pub async fn exec(self, client: &Client) -> anyhow::Result<()> {
        let Self { level } = self;
        let destination = read_destination()?;
        let affected = requests::update_destination(level.into(), destination)
            .send(client)
            .await?;
        print_json(&affected)
    }
}
