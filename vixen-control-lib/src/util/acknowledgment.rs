use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::session::body::Body;
use crate::util::error::CallError;

/// The reply of an action endpoint (on, off, clear, play, ...).
///
/// The HTTP status only tells that the request was received. The device reports
/// what it actually did in the human-readable `Message` field.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Acknowledgment {
    #[serde(rename = "Message")]
    pub message: String,
}

impl Acknowledgment {
    /// Extracts the acknowledgment from a response body.
    ///
    /// A JSON body must be an object with a string `Message` field. A plain-text
    /// body is taken as the message itself, as long as it is not blank.
    pub fn from_body(body: &Body) -> Result<Self, CallError> {
        match body {
            Body::Json(value) => value
                .get("Message")
                .and_then(Value::as_str)
                .map(|message| Acknowledgment {
                    message: message.to_string(),
                })
                .ok_or_else(|| CallError::MalformedAcknowledgment(value.to_string())),
            Body::Text(text) if !text.trim().is_empty() => Ok(Acknowledgment {
                message: text.trim().to_string(),
            }),
            Body::Text(text) => Err(CallError::MalformedAcknowledgment(text.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_message_from_json() {
        let body = Body::Json(json!({"Message": "OK", "Extra": 1}));
        let ack = Acknowledgment::from_body(&body).unwrap();
        assert_eq!(ack.message, "OK");
    }

    #[test]
    fn test_missing_message_is_malformed() {
        let body = Body::Json(json!({"Status": "OK"}));
        assert!(matches!(
            Acknowledgment::from_body(&body),
            Err(CallError::MalformedAcknowledgment(_))
        ));
    }

    #[test]
    fn test_non_string_message_is_malformed() {
        let body = Body::Json(json!({"Message": 42}));
        assert!(Acknowledgment::from_body(&body).is_err());

        let body = Body::Json(json!(["Message"]));
        assert!(Acknowledgment::from_body(&body).is_err());

        let body = Body::Json(json!(["Sequence not found"]));
        assert!(matches!(
            Acknowledgment::from_body(&body),
            Err(CallError::MalformedAcknowledgment(_))
        ));

        let body = Body::Json(json!("OK"));
        assert!(Acknowledgment::from_body(&body).is_err());
    }

    #[test]
    fn test_plain_text_reply() {
        let body = Body::Text("Sequence paused.\r\n".to_string());
        assert_eq!(
            Acknowledgment::from_body(&body).unwrap().message,
            "Sequence paused."
        );

        let blank = Body::Text("  ".to_string());
        assert!(Acknowledgment::from_body(&blank).is_err());
    }
}
