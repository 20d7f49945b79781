use std::fmt::{Display, Formatter};

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::util::error::CallError;

/// A normalized response body.
///
/// The Vixen web server answers discovery and status requests with JSON, but
/// some actions come back as plain text. The content type of the response
/// decides which variant is produced; no schema is applied to either.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Builds a body from the raw response text.
    ///
    /// A body declared as JSON that fails to parse is an error, not text.
    pub fn decode(text: String, is_json: bool) -> Result<Self, CallError> {
        if is_json {
            serde_json::from_str(&text)
                .map(Body::Json)
                .map_err(CallError::Decode)
        } else {
            debug!("Response was not JSON, returning text.");
            Ok(Body::Text(text))
        }
    }

    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Body::Json(value) => Some(value),
            Body::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Json(_) => None,
            Body::Text(text) => Some(text),
        }
    }
}

impl Display for Body {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Json(value) => write!(f, "{}", value),
            Body::Text(text) => write!(f, "{}", text),
        }
    }
}
