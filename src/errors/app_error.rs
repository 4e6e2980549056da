use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use std::fmt;

/// Gateway error type
///
/// Every failure a request can hit maps to exactly one variant, and every
/// variant maps to one caller-visible status and body. Raw upstream payloads
/// are only relayed when they decoded cleanly; credential values never
/// appear in any variant.
#[derive(Debug)]
pub enum GatewayError {
    /// The routed service id is not registered (client mistake)
    InvalidService,
    /// The TTS language label is not in the voice map (client mistake)
    UnsupportedLanguage(String),
    /// The inbound body is missing a required field (client mistake)
    MissingField(&'static str),
    /// A credential or endpoint value is absent from configuration (operator mistake)
    MissingCredential(&'static str),
    /// The upstream call exceeded its allotted time on a buffered mode
    UpstreamTimeout(&'static str),
    /// Upstream answered non-2xx with a JSON body worth relaying verbatim
    UpstreamJson(StatusCode, Value),
    /// Upstream answered non-2xx with an error payload that decoded as text
    UpstreamText(StatusCode, String),
    /// Upstream answered non-2xx with a payload that could not be decoded
    UpstreamUndecodable(StatusCode, &'static str),
    /// Transport-level or otherwise unexpected upstream failure
    Upstream(String),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            GatewayError::InvalidService => {
                tracing::warn!("Rejected request for unknown service");
                (StatusCode::BAD_REQUEST, json!({ "error": "Invalid service" }))
            }
            GatewayError::UnsupportedLanguage(label) => {
                tracing::warn!("Not supported language: {}", label);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Not supported language" }),
                )
            }
            GatewayError::MissingField(field) => {
                tracing::warn!("Request body missing required field: {}", field);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": format!("{field} is required") }),
                )
            }
            GatewayError::MissingCredential(service) => {
                tracing::error!("{} API key missing in configuration", service);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": format!("{service} API key missing") }),
                )
            }
            GatewayError::UpstreamTimeout(service) => {
                tracing::error!("Timeout in the request to {}", service);
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    json!({ "error": format!("Timeout in the request to {service}") }),
                )
            }
            GatewayError::UpstreamJson(status, body) => {
                tracing::error!("Upstream error ({}): {}", status, body);
                (status, body)
            }
            GatewayError::UpstreamText(status, message) => {
                tracing::error!("Upstream error ({}): {}", status, message);
                (status, json!({ "error": message }))
            }
            GatewayError::UpstreamUndecodable(status, service) => {
                tracing::error!("Upstream error ({}) with undecodable body from {}", status, service);
                (status, json!({ "error": format!("Unknown error with {service}") }))
            }
            GatewayError::Upstream(msg) => {
                tracing::error!("API request error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "API request error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::InvalidService => write!(f, "Invalid service"),
            GatewayError::UnsupportedLanguage(label) => {
                write!(f, "Not supported language: {label}")
            }
            GatewayError::MissingField(field) => write!(f, "{field} is required"),
            GatewayError::MissingCredential(service) => write!(f, "{service} API key missing"),
            GatewayError::UpstreamTimeout(service) => {
                write!(f, "Timeout in the request to {service}")
            }
            GatewayError::UpstreamJson(status, _) => write!(f, "Upstream error ({status})"),
            GatewayError::UpstreamText(status, message) => {
                write!(f, "Upstream error ({status}): {message}")
            }
            GatewayError::UpstreamUndecodable(status, service) => {
                write!(f, "Unknown error with {service} ({status})")
            }
            GatewayError::Upstream(msg) => write!(f, "API request error: {msg}"),
        }
    }
}

impl std::error::Error for GatewayError {}

// Result type alias for convenience
pub type GatewayResult<T> = Result<T, GatewayError>;
