use destination_client::{requests, Client};

use crate::commands::{print_json, LevelArg};

#[derive(Clone, Debug, clap::Parser)]
pub struct ListCommand {
    #[arg(long, value_enum, default_value_t)]
    level: LevelArg,
    /// Print every destination in full instead of only name and type.
    #[arg(long)]
    json: bool,
}

impl ListCommand {
    pub async fn exec(self, client: &Client) -> anyhow::Result<()> {
        let Self { level, json } = self;
        let destinations = requests::destinations(level.into()).send(client).await?;
        if json {
            return print_json(&destinations);
        }
        for d in destinations {
            println!("{}({})", d.name, d.r#type);
        }
        Ok(())
    }
}
