//! Errors returned when sending requests to the service.
use std::fmt::{Display, Formatter};

use reqwest::StatusCode;
use serde::Deserialize;

/// An error reported by the service.
///
/// The body only carries the message; the status code is attached from the HTTP response.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ErrorMessage {
    #[serde(rename = "ErrorMessage")]
    message: String,
    #[serde(skip)]
    status_code: u16,
}

impl ErrorMessage {
    /// Build an error from a response that did not have the expected status.
    ///
    /// Bodies that are not the usual error envelope are kept verbatim as the message.
    pub fn from_response(status: StatusCode, text: &str) -> Self {
        let message = match serde_json::from_str::<Self>(text) {
            Ok(Self { message, .. }) => message,
            Err(_) => text.trim().to_string(),
        };
        Self {
            message,
            status_code: status.as_u16(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl Display for ErrorMessage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self {
            message,
            status_code,
        } = self;
        write!(f, "({status_code}) {message}")
    }
}

impl std::error::Error for ErrorMessage {}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be completed, including failures to obtain an access token.
    #[error(transparent)]
    Transport(anyhow::Error),
    /// The service responded with an unexpected status.
    #[error(transparent)]
    Remote(#[from] ErrorMessage),
    /// The payload could not be decoded into the expected type.
    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

impl Error {
    pub fn remote(&self) -> Option<&ErrorMessage> {
        match self {
            Error::Remote(e) => Some(e),
            Error::Transport(_) | Error::MalformedPayload(_) => None,
        }
    }

    /// The HTTP status code, if the service responded.
    pub fn status_code(&self) -> Option<u16> {
        self.remote().map(ErrorMessage::status_code)
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Transport(e.into())
    }
}
