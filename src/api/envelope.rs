//! Response envelope
//!
//! Every API response (except `/health`) is wrapped as
//! `{code, message, data?, errors?}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::Event;
use crate::validation::ValidationErrors;

/// Short outcome tag carried in `code`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResponseCode {
    /// Success
    #[serde(rename = "OK")]
    Ok,
    /// Bad request: validation failure or unreadable body
    #[serde(rename = "BR")]
    BadRequest,
    /// Not found
    #[serde(rename = "NF")]
    NotFound,
    /// Missing parameter, also used by delete for an unknown id
    #[serde(rename = "PF")]
    PreconditionFailed,
}

/// The uniform response body
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T = ()> {
    pub code: ResponseCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl<T> Envelope<T> {
    /// Success carrying `data`
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            code: ResponseCode::Ok,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }
}

impl Envelope {
    /// Failure with a bare code and message
    pub fn failure(code: ResponseCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
            errors: None,
        }
    }

    /// `BR` failure listing every violation
    pub fn invalid(errors: ValidationErrors) -> Self {
        Self {
            code: ResponseCode::BadRequest,
            message: "Invalid Data".to_string(),
            data: None,
            errors: Some(errors),
        }
    }
}

/// An envelope paired with its HTTP status
#[derive(Debug)]
pub struct ApiResponse<T = ()> {
    pub status: StatusCode,
    pub envelope: Envelope<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, envelope: Envelope<T>) -> Self {
        Self { status, envelope }
    }

    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::OK, Envelope::ok(message, data))
    }

    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::new(StatusCode::CREATED, Envelope::ok(message, data))
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.envelope)).into_response()
    }
}

// =========================================================================
// Payloads
// =========================================================================

/// `data` of the full listing
#[derive(Debug, Clone, Serialize)]
pub struct EventsData {
    pub events: Vec<Event>,
    pub total: usize,
}

impl From<Vec<Event>> for EventsData {
    fn from(events: Vec<Event>) -> Self {
        let total = events.len();
        Self { events, total }
    }
}

/// `data` of single-event responses
#[derive(Debug, Clone, Serialize)]
pub struct EventData {
    pub event: Event,
}

impl From<Event> for EventData {
    fn from(event: Event) -> Self {
        Self { event }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{FieldError, Location};
    use serde_json::json;

    #[test]
    fn test_failure_omits_data_and_errors() {
        let envelope = Envelope::failure(ResponseCode::PreconditionFailed, "Event ID is required!");
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({ "code": "PF", "message": "Event ID is required!" })
        );
    }

    #[test]
    fn test_invalid_lists_errors() {
        let mut errors = ValidationErrors::new();
        errors.push(FieldError::new(Location::Query, "page", Some(&json!("0")), "Invalid value"));

        let json = serde_json::to_value(Envelope::invalid(errors)).unwrap();
        assert_eq!(json["code"], "BR");
        assert_eq!(json["message"], "Invalid Data");
        assert_eq!(json["errors"][0]["path"], "page");
        assert_eq!(json["errors"][0]["location"], "query");
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_ok_wraps_data() {
        let envelope = Envelope::ok("All events retrieved successfully!", EventsData::from(Vec::new()));
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "code": "OK",
                "message": "All events retrieved successfully!",
                "data": { "events": [], "total": 0 }
            })
        );
    }

    #[test]
    fn test_code_wire_names() {
        for (code, wire) in [
            (ResponseCode::Ok, "OK"),
            (ResponseCode::BadRequest, "BR"),
            (ResponseCode::NotFound, "NF"),
            (ResponseCode::PreconditionFailed, "PF"),
        ] {
            assert_eq!(serde_json::to_value(code).unwrap(), json!(wire));
        }
    }
}
