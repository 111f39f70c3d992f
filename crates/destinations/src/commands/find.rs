use destination_client::{requests, Client};

use crate::commands::print_json;

#[derive(Clone, Debug, clap::Parser)]
pub struct FindCommand {
    /// Name of the destination.
    name: String,
    /// Token of the end user, forwarded for destinations that propagate the principal.
    #[arg(long, env = "DESTINATION_USER_TOKEN", hide_env_values = true)]
    user_token: Option<String>,
}

impl FindCommand {
    pub async fn exec(self, client: &Client) -> anyhow::Result<()> {
        let Self { name, user_token } = self;
        let mut request = requests::find(name);
        if let Some(token) = user_token {
            request = request.user_token(token);
        }
        let result = request.send(client).await?;
        print_json(&result)
    }
}
