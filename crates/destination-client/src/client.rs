//! Facilities for building an HTTP client authenticated against the Destination Service.
use std::{env, sync::Arc, time::Duration};

use anyhow::{anyhow, Context};
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Method,
};
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::{
    authentication::{ClientCredentials, TokenSource},
    psst::Secret,
};

const API_PATH: &str = "destination-configuration/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The values needed to reach and authenticate with a service instance.
///
/// All of them are found in the service binding of the destination service.
#[derive(Clone, Debug)]
pub struct ClientConfiguration {
    /// The `clientid` attribute of the binding.
    pub client_id: String,
    /// The `clientsecret` attribute of the binding.
    pub client_secret: Secret,
    /// The `url` attribute of the binding.
    pub token_url: String,
    /// The `uri` attribute of the binding.
    pub service_url: String,
}

#[derive(Deserialize)]
struct BindingCredentials {
    clientid: String,
    clientsecret: Secret,
    url: String,
    uri: String,
}

impl ClientConfiguration {
    pub fn new(
        client_id: impl ToString,
        client_secret: impl ToString,
        token_url: impl ToString,
        service_url: impl ToString,
    ) -> Self {
        Self {
            client_id: client_id.to_string(),
            client_secret: Secret::new(client_secret),
            token_url: token_url.to_string(),
            service_url: service_url.to_string(),
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let client_id = env::var("DESTINATION_CLIENT_ID").context("DESTINATION_CLIENT_ID")?;
        let client_secret =
            env::var("DESTINATION_CLIENT_SECRET").context("DESTINATION_CLIENT_SECRET")?;
        let token_url = env::var("DESTINATION_TOKEN_URL").context("DESTINATION_TOKEN_URL")?;
        let service_url =
            env::var("DESTINATION_SERVICE_URL").context("DESTINATION_SERVICE_URL")?;
        debug!("Read configuration for {client_id} from env");
        Ok(Self::new(client_id, client_secret, token_url, service_url))
    }

    /// Read the credentials of the first destination service binding in a `VCAP_SERVICES`
    /// document.
    pub fn from_vcap_services(text: &str) -> anyhow::Result<Self> {
        let services: Value =
            serde_json::from_str(text).context("VCAP_SERVICES is not valid JSON")?;
        let credentials = services
            .pointer("/destination/0/credentials")
            .context("VCAP_SERVICES has no destination binding")?;
        let BindingCredentials {
            clientid,
            clientsecret,
            url,
            uri,
        } = BindingCredentials::deserialize(credentials)
            .context("Destination binding has unexpected credentials")?;
        debug!("Read configuration for {clientid} from VCAP_SERVICES");
        Ok(Self {
            client_id: clientid,
            client_secret: clientsecret,
            token_url: url,
            service_url: uri,
        })
    }

    fn base_url(&self) -> anyhow::Result<Url> {
        let url = Url::parse(&format!(
            "{}/{API_PATH}",
            self.service_url.trim_end_matches('/')
        ))
        .with_context(|| format!("Invalid service URL {}", self.service_url))?;
        if url.cannot_be_a_base() {
            return Err(anyhow!("Service URL {} cannot be a base", self.service_url));
        }
        Ok(url)
    }
}

pub struct ClientBuilder {
    configuration: ClientConfiguration,
    timeout: Duration,
    debug: bool,
    inner: reqwest::ClientBuilder,
}

impl ClientBuilder {
    pub fn new(configuration: ClientConfiguration) -> Self {
        Self {
            configuration,
            timeout: DEFAULT_TIMEOUT,
            debug: false,
            inner: reqwest::Client::builder(),
        }
    }

    /// Sets the timeout for each request, including requests for access tokens.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Log requests and responses at the debug level.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_inner(
        mut self,
        f: impl FnOnce(reqwest::ClientBuilder) -> reqwest::ClientBuilder,
    ) -> Self {
        self.inner = f(self.inner);
        self
    }

    pub fn build(self) -> anyhow::Result<Client> {
        let Self {
            configuration,
            timeout,
            debug,
            inner,
        } = self;
        let base = configuration.base_url()?;
        let ClientConfiguration {
            client_id,
            client_secret,
            token_url,
            ..
        } = configuration;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        let client = inner
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("Failed to create reqwest client.")?;
        let tokens = TokenSource::new(
            client.clone(),
            ClientCredentials {
                client_id,
                client_secret,
                token_url,
            },
        );
        Ok(Client {
            base,
            client,
            tokens: Arc::new(tokens),
            debug,
        })
    }
}

/// An HTTP client that attaches a valid access token to every request.
///
/// Cloning is cheap and clones share the access token.
#[derive(Clone)]
pub struct Client {
    base: Url,
    client: reqwest::Client,
    tokens: Arc<TokenSource>,
    debug: bool,
}

impl Client {
    pub fn builder(configuration: ClientConfiguration) -> ClientBuilder {
        ClientBuilder::new(configuration)
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends each segment to the base URL, percent-encoding as needed.
    pub(crate) fn url(&self, segments: &[String]) -> anyhow::Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow!("{} cannot be a base", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) async fn request(
        &self,
        method: Method,
        url: Url,
    ) -> anyhow::Result<reqwest::RequestBuilder> {
        let token = self
            .tokens
            .access_token()
            .await
            .context("Could not obtain access token")?;
        Ok(self
            .client
            .request(method, url)
            .bearer_auth(token.dangerous_reveal()))
    }
}
