use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::Response,
};
use serde_json::Value;
use tracing::info;

use crate::errors::app_error::GatewayResult;
use crate::gateway::dispatch;
use crate::state::AppState;

/// Handler for the `POST /api/{service}` endpoint
///
/// Routes the inbound body to the named provider and relays the result in
/// that provider's response mode. All failure shaping happens in the
/// dispatch layer; this handler only logs the request and hands off.
pub async fn api_dispatch(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
    Json(body): Json<Value>,
) -> GatewayResult<Response> {
    info!("Service requested: {}", service);
    dispatch(&state, &service, &body).await
}
