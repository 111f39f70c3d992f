//! Facilities for obtaining access tokens using the OAuth2 client credentials grant.
//!
//! Tokens are kept in memory and reused until they are about to expire.
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use log::{debug, trace};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::psst::Secret;

/// Tokens are refreshed this long before the service would consider them expired.
const EXPIRY_MARGIN: Duration = Duration::from_secs(10);

/// The credentials from a service binding.
#[derive(Clone, Debug)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: Secret,
    /// Base URL of the authorization server; the token endpoint is `oauth/token` below it.
    pub token_url: String,
}

impl ClientCredentials {
    pub fn token_endpoint(&self) -> String {
        format!("{}/oauth/token", self.token_url.trim_end_matches('/'))
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Secret,
    expires_in: Option<u64>,
}

struct AccessToken {
    value: Secret,
    expires_at: Option<Instant>,
}

impl AccessToken {
    fn from_response(response: TokenResponse, received_at: Instant) -> Self {
        let TokenResponse {
            access_token,
            expires_in,
        } = response;
        Self {
            value: access_token,
            // Lifetimes beyond what `Instant` can represent are treated as unlimited.
            expires_at: expires_in
                .and_then(|s| received_at.checked_add(Duration::from_secs(s))),
        }
    }

    fn is_fresh(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(t) => now + EXPIRY_MARGIN < t,
            None => true,
        }
    }
}

/// Hands out access tokens, fetching a new one only when the current one is stale.
pub(crate) struct TokenSource {
    client: reqwest::Client,
    credentials: ClientCredentials,
    current: Mutex<Option<AccessToken>>,
}

impl TokenSource {
    pub fn new(client: reqwest::Client, credentials: ClientCredentials) -> Self {
        Self {
            client,
            credentials,
            current: Mutex::new(None),
        }
    }

    pub async fn access_token(&self) -> anyhow::Result<Secret> {
        let mut current = self.current.lock().await;
        if let Some(token) = current.as_ref() {
            if token.is_fresh(Instant::now()) {
                trace!("Reusing access token");
                return Ok(token.value.clone());
            }
        }
        let token = self.fetch().await?;
        let value = token.value.clone();
        *current = Some(token);
        Ok(value)
    }

    async fn fetch(&self) -> anyhow::Result<AccessToken> {
        let ClientCredentials {
            client_id,
            client_secret,
            ..
        } = &self.credentials;
        let url = self.credentials.token_endpoint();
        debug!("Fetching access token for {client_id} from {url}");

        let response = self
            .client
            .post(&url)
            .basic_auth(client_id, Some(client_secret.dangerous_reveal()))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .with_context(|| format!("Send to {url}"))?;
        let received_at = Instant::now();
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Get text from {status} response"))?;
        if !status.is_success() {
            bail!("Could not obtain access token ({status}): {text}");
        }
        let response: TokenResponse = serde_json::from_str(&text)
            .with_context(|| format!("Could not parse token response, status was {status}"))?;
        Ok(AccessToken::from_response(response, received_at))
    }
}
