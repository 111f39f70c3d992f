use std::time::Duration;

use anyhow::{bail, Context};
use destination_client::{Client, ClientConfiguration};
use log::debug;

/// How to reach the Destination Service.
///
/// Either all of the explicit credentials must be given, or none of them in which case the first
/// destination binding in `VCAP_SERVICES` is used.
#[derive(Clone, Debug, clap::Args)]
pub struct ConnectionArgs {
    /// The `clientid` of the service binding.
    #[arg(long, env = "DESTINATION_CLIENT_ID")]
    client_id: Option<String>,
    /// The `clientsecret` of the service binding.
    #[arg(long, env = "DESTINATION_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,
    /// The `url` of the service binding, i.e. the authorization server.
    #[arg(long, env = "DESTINATION_TOKEN_URL")]
    token_url: Option<String>,
    /// The `uri` of the service binding.
    #[arg(long, env = "DESTINATION_SERVICE_URL")]
    service_url: Option<String>,
    #[arg(long, env = "VCAP_SERVICES", hide_env_values = true, hide = true)]
    vcap_services: Option<String>,
    /// Timeout for each request, in seconds.
    #[arg(long, default_value_t = 60)]
    timeout: u64,
    /// Log every request and response.
    #[arg(long)]
    pub debug: bool,
}

impl ConnectionArgs {
    fn configuration(self) -> anyhow::Result<ClientConfiguration> {
        let Self {
            client_id,
            client_secret,
            token_url,
            service_url,
            vcap_services,
            ..
        } = self;
        match (client_id, client_secret, token_url, service_url) {
            (Some(client_id), Some(client_secret), Some(token_url), Some(service_url)) => Ok(
                ClientConfiguration::new(client_id, client_secret, token_url, service_url),
            ),
            (None, None, None, None) => {
                let Some(text) = vcap_services else {
                    bail!("No credentials given and VCAP_SERVICES is not set");
                };
                debug!("Using credentials from VCAP_SERVICES");
                ClientConfiguration::from_vcap_services(&text)
            }
            _ => bail!(
                "--client-id, --client-secret, --token-url and --service-url must be given together"
            ),
        }
    }

    pub fn client(self) -> anyhow::Result<Client> {
        let timeout = Duration::from_secs(self.timeout);
        let debug = self.debug;
        let configuration = self.configuration()?;
        Client::builder(configuration)
            .timeout(timeout)
            .debug(debug)
            .build()
            .context("Could not create client")
    }
}
