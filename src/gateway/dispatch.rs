//! Dispatcher: resolve the service, build the call, execute, relay.

use axum::response::Response;
use serde_json::Value;
use tracing::debug;

use crate::errors::app_error::{GatewayError, GatewayResult};
use crate::state::AppState;

use super::registry;
use super::relay::{self, normalize_transport_error};
use super::transform;
use super::transport::Transport as _;

/// Dispatch one inbound request to its provider.
///
/// Exactly one outcome reaches the caller: the relayed upstream result, a
/// pre-dispatch rejection, or a normalized upstream failure. Rejections
/// (unknown service, invalid input, incomplete configuration) never cost an
/// upstream call.
pub async fn dispatch(state: &AppState, service_id: &str, body: &Value) -> GatewayResult<Response> {
    let spec = registry::resolve(service_id).ok_or(GatewayError::InvalidService)?;

    let outbound = transform::build_outbound(spec, &state.config, body)?;
    debug!(service = spec.id, url = %outbound.url, "Dispatching upstream call");

    let upstream = state
        .transport
        .execute(outbound, spec.timeout)
        .await
        .map_err(|err| normalize_transport_error(spec, err))?;

    relay::relay(spec, upstream).await
}
