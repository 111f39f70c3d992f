use destination_client::{requests, Client};

use crate::commands::{print_json, LevelArg};

#[derive(Clone, Debug, clap::Parser)]
pub struct DeleteCommand {
    /// Name of the destination.
    name: String,
    #[arg(long, value_enum, default_value_t)]
    level: LevelArg,
}

impl DeleteCommand {
    pub async fn exec(self, client: &Client) -> anyhow::Result<()> {
        let Self { name, level } = self;
        let affected = requests::delete_destination(level.into(), name)
            .send(client)
            .await?;
        print_json(&affected)
    }
}
