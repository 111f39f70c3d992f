//! Facilities for building and executing requests.
//!
//! Every operation of the service has a function here that returns a request. Nothing is sent
//! until [`GenericRequest::send`] is called.
use std::fmt::{Display, Formatter};

use anyhow::Context;
use log::{debug, trace};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client::Client,
    destination::Destination,
    error::{Error, ErrorMessage},
    responses::{AffectedRecords, Certificate, DestinationLookupResult},
};

/// Header used to forward the token of the end user when finding a destination.
pub const USER_TOKEN_HEADER: &str = "X-user-token";

/// The level on which destinations and certificates are managed.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Level {
    /// Shared by all applications in the subaccount.
    #[default]
    Subaccount,
    /// Specific to one service instance; takes priority when finding a destination by name.
    Instance,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Subaccount => "subaccount",
            Level::Instance => "instance",
        }
    }

    fn destinations(self) -> &'static str {
        match self {
            Level::Subaccount => "subaccountDestinations",
            Level::Instance => "instanceDestinations",
        }
    }

    fn certificates(self) -> &'static str {
        match self {
            Level::Subaccount => "subaccountCertificates",
            Level::Instance => "instanceCertificates",
        }
    }

    /// Single certificates live below a singular prefix, unlike destinations.
    fn certificate(self) -> &'static str {
        match self {
            Level::Subaccount => "subaccountCertificate",
            Level::Instance => "instanceCertificate",
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

fn json<T: DeserializeOwned>(text: &str) -> serde_json::Result<T> {
    serde_json::from_str(text)
}

fn nothing(_: &str) -> serde_json::Result<()> {
    Ok(())
}

pub struct GenericRequest<Rq, Rp> {
    method: Method,
    path: Vec<String>,
    body: Option<Rq>,
    headers: Vec<(&'static str, String)>,
    expected: StatusCode,
    decode: fn(&str) -> serde_json::Result<Rp>,
}

impl<Rq, Rp> GenericRequest<Rq, Rp> {
    fn new(
        method: Method,
        path: Vec<String>,
        expected: StatusCode,
        decode: fn(&str) -> serde_json::Result<Rp>,
    ) -> Self {
        Self {
            method,
            path,
            body: None,
            headers: Vec::new(),
            expected,
            decode,
        }
    }

    fn body(mut self, body: Rq) -> Self {
        self.body = Some(body);
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The path below the API root, with names not yet percent-encoded.
    pub fn path(&self) -> String {
        self.path.join("/")
    }

    /// Interpret a response to this request.
    ///
    /// Any status other than the one the operation is documented to return is an error, even if
    /// it signals success.
    pub fn parse(&self, status: StatusCode, text: &str) -> Result<Rp, Error> {
        if status != self.expected {
            return Err(ErrorMessage::from_response(status, text).into());
        }
        Ok((self.decode)(text)?)
    }
}

impl<Rq, Rp> GenericRequest<Rq, Rp>
where
    Rq: Serialize,
{
    pub async fn send(self, client: &Client) -> Result<Rp, Error> {
        let url = client.url(&self.path).map_err(Error::Transport)?;
        let mut request = client
            .request(self.method.clone(), url.clone())
            .await
            .map_err(Error::Transport)?;
        for (name, value) in &self.headers {
            request = request.header(*name, value);
        }
        if let Some(body) = &self.body {
            if client.debug() {
                debug!(
                    "Sending {} {url}: {}",
                    self.method,
                    serde_json::to_string(body)?
                );
            }
            request = request.json(body);
        } else if client.debug() {
            debug!("Sending {} {url}", self.method);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("Send to {url}"))
            .map_err(Error::Transport)?;
        let status = response.status();
        let text = response
            .text()
            .await
            .with_context(|| format!("Get text from {status} response"))
            .map_err(Error::Transport)?;

        if client.debug() {
            debug!("Received {status}: {text}");
        } else {
            trace!("Received {status}: {text}");
        }
        self.parse(status, &text)
    }
}

impl GenericRequest<(), DestinationLookupResult> {
    /// Forward the token of the end user, e.g. for destinations using principal propagation.
    pub fn user_token(mut self, token: impl ToString) -> Self {
        self.headers.push((USER_TOKEN_HEADER, token.to_string()));
        self
    }
}

/// Find a destination by name on all levels and return the first match.
///
/// Destinations on the instance level take priority over those on the subaccount level.
pub fn find(name: impl ToString) -> GenericRequest<(), DestinationLookupResult> {
    GenericRequest::new(
        Method::GET,
        vec!["destinations".to_string(), name.to_string()],
        StatusCode::OK,
        json,
    )
}

/// Fetch all destinations on a level.
pub fn destinations(level: Level) -> GenericRequest<(), Vec<Destination>> {
    GenericRequest::new(
        Method::GET,
        vec![level.destinations().to_string()],
        StatusCode::OK,
        json,
    )
}

pub fn destination(level: Level, name: impl ToString) -> GenericRequest<(), Destination> {
    GenericRequest::new(
        Method::GET,
        vec![level.destinations().to_string(), name.to_string()],
        StatusCode::OK,
        json,
    )
}

pub fn create_destination(
    level: Level,
    destination: Destination,
) -> GenericRequest<Destination, ()> {
    GenericRequest::new(
        Method::POST,
        vec![level.destinations().to_string()],
        StatusCode::CREATED,
        nothing,
    )
    .body(destination)
}

/// Replace the destination with the same name.
pub fn update_destination(
    level: Level,
    destination: Destination,
) -> GenericRequest<Destination, AffectedRecords> {
    GenericRequest::new(
        Method::PUT,
        vec![level.destinations().to_string()],
        StatusCode::OK,
        json,
    )
    .body(destination)
}

pub fn delete_destination(
    level: Level,
    name: impl ToString,
) -> GenericRequest<(), AffectedRecords> {
    GenericRequest::new(
        Method::DELETE,
        vec![level.destinations().to_string(), name.to_string()],
        StatusCode::OK,
        json,
    )
}

/// Fetch all certificates on a level.
pub fn certificates(level: Level) -> GenericRequest<(), Vec<Certificate>> {
    GenericRequest::new(
        Method::GET,
        vec![level.certificates().to_string()],
        StatusCode::OK,
        json,
    )
}

pub fn certificate(level: Level, name: impl ToString) -> GenericRequest<(), Certificate> {
    GenericRequest::new(
        Method::GET,
        vec![level.certificate().to_string(), name.to_string()],
        StatusCode::OK,
        json,
    )
}

pub fn create_certificate(
    level: Level,
    certificate: Certificate,
) -> GenericRequest<Certificate, ()> {
    GenericRequest::new(
        Method::POST,
        vec![level.certificates().to_string()],
        StatusCode::CREATED,
        nothing,
    )
    .body(certificate)
}

pub fn delete_certificate(
    level: Level,
    name: impl ToString,
) -> GenericRequest<(), AffectedRecords> {
    GenericRequest::new(
        Method::DELETE,
        vec![level.certificate().to_string(), name.to_string()],
        StatusCode::OK,
        json,
    )
}
