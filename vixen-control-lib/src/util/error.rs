use std::time::Duration;

pub use reqwest::StatusCode;
use thiserror::Error;

use crate::util::endpoint::Endpoint;

/// Why a single exchange with the Vixen web server failed.
///
/// The collapsed API ([`crate::session::Session::get`] and the plain
/// [`crate::control_interface::ControlInterface`] operations) only logs these.
/// The `try_` variants hand them back to the caller, which makes it possible to
/// tell "the device said no" apart from "the network was broken".
#[derive(Debug, Error)]
pub enum CallError {
    /// The session was handed an empty URL.
    #[error("Request URL is empty")]
    InvalidUrl,

    /// The number of values does not match the endpoint's parameter list.
    #[error("{endpoint:?} expects parameters {expected:?}, got {given} values")]
    InvalidParameters {
        endpoint: Endpoint,
        expected: &'static [&'static str],
        given: usize,
    },

    /// The device answered with something other than `200 OK`.
    #[error("Device responded with status {0}")]
    Status(StatusCode),

    /// Connection plus full response receipt did not finish within the deadline.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The device could not be reached (refused, unreachable, DNS).
    #[error("Connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    /// Any other client or network error.
    #[error("Transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The response declared `application/json` but the body did not parse.
    #[error("Response declared JSON but could not be decoded: {0}")]
    Decode(#[source] serde_json::Error),

    /// An action endpoint replied without a usable `Message` field.
    #[error("Malformed acknowledgment: {0}")]
    MalformedAcknowledgment(String),
}

impl CallError {
    /// True when the failure happened before a response was received.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CallError::Timeout(_) | CallError::Connect(_) | CallError::Transport(_)
        )
    }

    /// The HTTP status, if the device answered with a non-200 status.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            CallError::Status(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CallError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            CallError::Connect(err)
        } else {
            CallError::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_is_not_transport() {
        let err = CallError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_transport());
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_timeout_mentions_deadline() {
        let err = CallError::Timeout(Duration::from_secs(10));
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "Request timed out after 10s");
    }

    #[test]
    fn test_decode_error_keeps_cause() {
        let cause = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = CallError::Decode(cause);
        assert!(!err.is_transport());
        assert!(std::error::Error::source(&err).is_some());
    }
}
