//! Response relay strategies.
//!
//! One strategy per response mode. Each consumes the upstream response and
//! writes the caller-facing response in that provider's shape. Failures fall
//! through to the error normalizer as `GatewayError` values, except
//! mid-stream failures, which can only terminate the output.

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Json, Response};
use futures::{StreamExt, future};
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::app_error::{GatewayError, GatewayResult};

use super::registry::{ResponseMode, ServiceDescriptor};
use super::transport::{TransportError, UpstreamResponse};

/// Relay the upstream response in the mode registered for this service.
pub async fn relay(spec: &ServiceDescriptor, upstream: UpstreamResponse) -> GatewayResult<Response> {
    match spec.response_mode {
        ResponseMode::StreamText => relay_stream(spec, upstream).await,
        ResponseMode::Json => relay_json(spec, upstream).await,
        ResponseMode::BinaryAudio => relay_binary(spec, upstream).await,
    }
}

/// Map a transport failure to its caller-visible shape for this service.
///
/// Used both for the initial call and for failures while reading a buffered
/// body.
pub(crate) fn normalize_transport_error(
    spec: &ServiceDescriptor,
    err: TransportError,
) -> GatewayError {
    match (&err, spec.response_mode) {
        // A buffered chat call that ran out of time is reported as such
        (TransportError::Timeout(_), ResponseMode::Json) => {
            GatewayError::UpstreamTimeout(spec.display_name)
        }
        // The binary path never surfaces transport detail to the caller
        (_, ResponseMode::BinaryAudio) => {
            error!("{} request failed: {}", spec.display_name, err);
            GatewayError::UpstreamUndecodable(StatusCode::INTERNAL_SERVER_ERROR, spec.display_name)
        }
        _ => GatewayError::Upstream(err.to_string()),
    }
}

/// Stream relay: forward upstream chunks verbatim, in order, as they arrive.
async fn relay_stream(
    spec: &ServiceDescriptor,
    upstream: UpstreamResponse,
) -> GatewayResult<Response> {
    if !upstream.is_success() {
        let status = upstream.status();
        let detail = match upstream.bytes().await {
            Ok(payload) => String::from_utf8_lossy(&payload).into_owned(),
            Err(err) => err.to_string(),
        };
        error!(
            "{} stream request failed ({}): {}",
            spec.display_name, status, detail
        );
        return Err(GatewayError::Upstream(format!(
            "{} answered {status}",
            spec.display_name
        )));
    }

    // Once the first chunk is on the wire the 200 status cannot be taken
    // back; a mid-stream upstream error is logged and the caller-facing
    // stream is closed with no in-band error marker.
    let service = spec.display_name;
    let forwarded = upstream.into_byte_stream().scan((), move |_, chunk| {
        future::ready(match chunk {
            Ok(bytes) => Some(Ok::<_, std::convert::Infallible>(bytes)),
            Err(err) => {
                error!("Error in stream from {}: {}", service, err);
                None
            }
        })
    });

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/event-stream")
        .header(header::CACHE_CONTROL, "no-cache")
        .body(Body::from_stream(forwarded))
        .map_err(|err| GatewayError::Upstream(err.to_string()))
}

/// Buffered-JSON relay: wait for the complete document, relay it verbatim
/// with the upstream's status.
async fn relay_json(spec: &ServiceDescriptor, upstream: UpstreamResponse) -> GatewayResult<Response> {
    let status = upstream.status();
    let payload = upstream
        .bytes()
        .await
        .map_err(|err| normalize_transport_error(spec, err))?;

    match serde_json::from_slice::<Value>(&payload) {
        Ok(document) if status.is_success() => Ok((status, Json(document)).into_response()),
        Ok(document) => Err(GatewayError::UpstreamJson(status, document)),
        Err(err) => {
            error!(
                "Undecodable {} response ({}): {}",
                spec.display_name, status, err
            );
            Err(GatewayError::Upstream(format!(
                "{} returned an undecodable body",
                spec.display_name
            )))
        }
    }
}

/// Binary relay: wait for the complete payload, return it as audio.
async fn relay_binary(
    spec: &ServiceDescriptor,
    upstream: UpstreamResponse,
) -> GatewayResult<Response> {
    let status = upstream.status();

    if status.is_success() {
        let audio = upstream
            .bytes()
            .await
            .map_err(|err| normalize_transport_error(spec, err))?;
        debug!(
            "Audio received from {} ({} bytes)",
            spec.display_name,
            audio.len()
        );
        return Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "audio/mpeg")],
            audio,
        )
            .into_response());
    }

    // The upstream failed before any byte reached the caller. Decode the
    // error payload as text for diagnostics; an undecodable blob is replaced
    // with a fixed message and never relayed or logged as an error string.
    let payload = upstream
        .bytes()
        .await
        .map_err(|_| GatewayError::UpstreamUndecodable(status, spec.display_name))?;
    match String::from_utf8(payload.to_vec()) {
        Ok(message) => Err(GatewayError::UpstreamText(status, message)),
        Err(_) => Err(GatewayError::UpstreamUndecodable(status, spec.display_name)),
    }
}
