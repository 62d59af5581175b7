//! Response envelope decoding.
//!
//! Servers answer either with a wrapped body
//! `{"success": bool, "data": ..., "message"|"error": ...}` or with the bare
//! payload. Both shapes are decoded once here so the rest of the client only
//! sees `Result<Option<T>, _>`.

use serde::Deserialize;

/// A decoded response body.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ApiEnvelope<T> {
    /// `{"success": ..., "data": ...}` form.
    Wrapped(Wrapped<T>),
    /// The payload without a wrapper.
    Raw(T),
}

/// The wrapped response form.
#[derive(Debug, Deserialize)]
pub struct Wrapped<T> {
    pub success: bool,
    #[serde(default = "none")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

const fn none<T>() -> Option<T> {
    None
}

impl<T> ApiEnvelope<T> {
    /// Unwrap into optional data, or the server's error message.
    ///
    /// `data: null` and a missing `data` both yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns the `error` (or `message`) text when `success` is false.
    pub fn into_data(self) -> Result<Option<T>, String> {
        match self {
            Self::Raw(data) => Ok(Some(data)),
            Self::Wrapped(Wrapped {
                success: true,
                data,
                ..
            }) => Ok(data),
            Self::Wrapped(Wrapped { error, message, .. }) => Err(error
                .or(message)
                .unwrap_or_else(|| "request failed".to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pagecraft_core::SlotConfiguration;
    use serde_json::json;

    use super::*;

    fn decode<T: serde::de::DeserializeOwned>(value: serde_json::Value) -> ApiEnvelope<T> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_wrapped_success() {
        let envelope: ApiEnvelope<SlotConfiguration> =
            decode(json!({"success": true, "data": {"slots": {}}}));
        assert!(envelope.into_data().unwrap().unwrap().slots.is_empty());
    }

    #[test]
    fn test_wrapped_null_data() {
        let envelope: ApiEnvelope<SlotConfiguration> =
            decode(json!({"success": true, "data": null}));
        assert!(envelope.into_data().unwrap().is_none());

        let envelope: ApiEnvelope<SlotConfiguration> =
            decode(json!({"success": true, "message": "Draft discarded"}));
        assert!(envelope.into_data().unwrap().is_none());
    }

    #[test]
    fn test_raw_document() {
        let envelope: ApiEnvelope<SlotConfiguration> =
            decode(json!({"slots": {"a": {"content": "x"}}}));
        assert!(matches!(envelope, ApiEnvelope::Raw(_)));
        let doc = envelope.into_data().unwrap().unwrap();
        assert_eq!(doc.slots["a"].content.as_deref(), Some("x"));
    }

    #[test]
    fn test_failure_prefers_error_then_message() {
        let envelope: ApiEnvelope<SlotConfiguration> =
            decode(json!({"success": false, "error": "no draft"}));
        assert_eq!(envelope.into_data().unwrap_err(), "no draft");

        let envelope: ApiEnvelope<SlotConfiguration> =
            decode(json!({"success": false, "message": "try later"}));
        assert_eq!(envelope.into_data().unwrap_err(), "try later");

        let envelope: ApiEnvelope<SlotConfiguration> = decode(json!({"success": false}));
        assert_eq!(envelope.into_data().unwrap_err(), "request failed");
    }
}
