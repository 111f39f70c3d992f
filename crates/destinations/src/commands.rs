pub mod certificates;
pub mod completions;
pub mod create;
pub mod delete;
pub mod find;
pub mod get;
pub mod list;
pub mod update;

use std::io::{self, IsTerminal, Read};

use anyhow::Context;
use destination_client::{codec, Destination, Level};

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum LevelArg {
    #[default]
    Subaccount,
    Instance,
}

impl From<LevelArg> for Level {
    fn from(level: LevelArg) -> Self {
        match level {
            LevelArg::Subaccount => Level::Subaccount,
            LevelArg::Instance => Level::Instance,
        }
    }
}

fn input(prompt: &str) -> anyhow::Result<String> {
    let mut buf = String::new();
    if io::stdin().is_terminal() {
        eprintln!("{prompt}");
        io::stdin()
            .read_line(&mut buf)
            .context("Failed to read from stdin")?;
    } else {
        io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read from stdin")?;
    }
    Ok(buf)
}

/// Read a destination in its flat form from stdin.
pub fn read_destination() -> anyhow::Result<Destination> {
    let text = input("Enter the destination as a flat JSON object:")?;
    codec::from_json(&text).context("Could not parse destination")
}

pub fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
