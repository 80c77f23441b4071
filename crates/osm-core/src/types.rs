//! Request arguments shared by every orchestrator operation.

use crate::query::QueryParams;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Optional JSON body and query parameters supplied by the caller of an operation.
///
/// Deserializes from the adaptation layer's request envelope:
///
/// ```json
/// { "payload": { "nsName": "demo" }, "args": { "name": "demo" } }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RequestArgs {
    /// JSON body forwarded to POST operations
    #[serde(default)]
    pub payload: Option<Value>,

    /// Query parameters appended to the request URL
    #[serde(default, rename = "args", deserialize_with = "deserialize_query")]
    pub query: QueryParams,
}

impl RequestArgs {
    /// Create empty arguments (no body, no query).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the JSON body.
    #[must_use]
    pub fn with_payload(mut self, payload: Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push(key, value.into());
        self
    }

    /// Replace all query parameters.
    #[must_use]
    pub fn with_query_params(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }
}

fn deserialize_query<'de, D>(deserializer: D) -> Result<QueryParams, D::Error>
where
    D: Deserializer<'de>,
{
    let map = Option::<Map<String, Value>>::deserialize(deserializer)?.unwrap_or_default();
    let mut params = QueryParams::new();

    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::String(text) => params.push(key, text),
            other => params.push(key, other),
        }
    }

    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_args_builder() {
        let args = RequestArgs::new()
            .with_payload(json!({"nsName": "demo"}))
            .with_query("name", "demo");

        assert_eq!(args.payload, Some(json!({"nsName": "demo"})));
        assert_eq!(
            args.query.as_pairs(),
            &[("name".to_string(), "demo".to_string())]
        );
    }

    #[test]
    fn test_request_args_from_envelope() {
        let args: RequestArgs = serde_json::from_value(json!({
            "payload": {"vnfName": "fw"},
            "args": {"name": "fw", "limit": 5, "skip": null}
        }))
        .unwrap();

        assert_eq!(args.payload, Some(json!({"vnfName": "fw"})));
        // serde_json maps iterate in key order
        assert_eq!(
            args.query.as_pairs(),
            &[
                ("limit".to_string(), "5".to_string()),
                ("name".to_string(), "fw".to_string()),
            ]
        );
    }

    #[test]
    fn test_request_args_empty_envelope() {
        let args: RequestArgs = serde_json::from_value(json!({})).unwrap();
        assert_eq!(args, RequestArgs::default());

        let args: RequestArgs = serde_json::from_value(json!({"args": null})).unwrap();
        assert!(args.query.is_empty());
    }
}
