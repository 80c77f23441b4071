//! Response decoding and status classification.
//!
//! Every verb funnels its response through [`classify`], which decodes the body
//! according to its declared content type and sorts the status code into an
//! [`Outcome`].

use crate::error::{Error, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;

/// Media type substring selecting JSON decoding.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type substring selecting YAML decoding.
pub const YAML_MEDIA_TYPE: &str = "application/yaml";

/// Decoded response body.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// JSON body, or a YAML body normalised to JSON
    Json(Value),
    /// Body with any other content type
    Text(String),
    /// No body at all
    Empty,
}

impl Payload {
    /// Borrow the JSON value, if this is a structured payload.
    #[must_use]
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Convert into a JSON value. Text becomes a JSON string, an empty body becomes `null`.
    #[must_use]
    pub fn into_value(self) -> Value {
        match self {
            Self::Json(value) => value,
            Self::Text(text) => Value::String(text),
            Self::Empty => Value::Null,
        }
    }

    /// Deserialize the payload into a typed model.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the payload does not match `T`.
    pub fn deserialize<T>(self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_value(self.into_value()).map_err(Error::from)
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
            Self::Empty => Ok(()),
        }
    }
}

/// Classified response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// 200, 201, 202 or 204
    Success(Payload),
    /// 400
    BadRequest(Payload),
    /// 401
    Unauthorized(Payload),
    /// 404
    NotFound(Payload),
    /// Any other status
    ServerError {
        /// Status returned by the orchestrator
        status: StatusCode,
        /// Decoded error body, or raw text when it did not decode
        detail: Payload,
    },
}

impl Outcome {
    /// Convert the outcome into the payload or the matching [`Error`] variant.
    ///
    /// # Errors
    ///
    /// Returns the error corresponding to any non-success outcome.
    pub fn into_result(self) -> Result<Payload> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::BadRequest(payload) => Err(Error::BadRequest(payload.to_string())),
            Self::Unauthorized(payload) => Err(Error::Unauthorized(payload.to_string())),
            Self::NotFound(payload) => Err(Error::ResourceNotFound(payload.to_string())),
            Self::ServerError { status, detail } => Err(Error::ServerError {
                status: Some(status.as_u16()),
                detail: detail.into_value(),
            }),
        }
    }

    /// Returns true for the success outcome.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Decode a body according to its declared content type.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] when the body claims JSON or YAML but does not parse.
pub fn decode_body(content_type: Option<&str>, body: &str) -> Result<Payload> {
    let content_type = content_type.unwrap_or_default();

    if content_type.contains(JSON_MEDIA_TYPE) {
        if body.trim().is_empty() {
            return Ok(Payload::Empty);
        }
        return Ok(Payload::Json(serde_json::from_str(body)?));
    }

    if content_type.contains(YAML_MEDIA_TYPE) {
        if body.trim().is_empty() {
            return Ok(Payload::Empty);
        }
        let document: serde_yaml::Value = serde_yaml::from_str(body)?;
        return Ok(Payload::Json(serde_json::to_value(document)?));
    }

    if body.is_empty() {
        Ok(Payload::Empty)
    } else {
        Ok(Payload::Text(body.to_string()))
    }
}

/// Classify a response by status code and decode its body.
///
/// # Errors
///
/// Returns [`Error::DecodeError`] only for success statuses whose body fails to
/// decode; error bodies that fail to decode fall back to raw text.
pub fn classify(status: StatusCode, content_type: Option<&str>, body: &str) -> Result<Outcome> {
    if matches!(
        status,
        StatusCode::OK | StatusCode::CREATED | StatusCode::ACCEPTED | StatusCode::NO_CONTENT
    ) {
        return decode_body(content_type, body).map(Outcome::Success);
    }

    let detail = decode_body(content_type, body).unwrap_or_else(|_| Payload::Text(body.to_string()));

    Ok(match status {
        StatusCode::BAD_REQUEST => Outcome::BadRequest(detail),
        StatusCode::UNAUTHORIZED => Outcome::Unauthorized(detail),
        StatusCode::NOT_FOUND => Outcome::NotFound(detail),
        status => Outcome::ServerError { status, detail },
    })
}
