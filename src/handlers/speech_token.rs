use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use tracing::error;

use crate::gateway::transform::OutboundRequest;
use crate::gateway::transport::Transport as _;
use crate::state::AppState;

/// Handler for the `GET /get-azure-token` endpoint
///
/// Exchanges the configured Azure Speech subscription key for a short-lived
/// token so the client can talk to the speech SDK without ever seeing the
/// key. Single pass-through call, no branching beyond credential presence.
pub async fn get_azure_token(State(state): State<Arc<AppState>>) -> Response {
    let (Some(api_key), Some(region)) = (
        state.config.azure_speech_api_key.as_ref(),
        state.config.azure_region.as_ref(),
    ) else {
        error!("Azure Speech credentials missing in configuration");
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Azure keys missing in the backend" })),
        )
            .into_response();
    };

    let request = OutboundRequest {
        url: format!("https://{region}.api.cognitive.microsoft.com/sts/v1.0/issueToken"),
        headers: vec![("Ocp-Apim-Subscription-Key", api_key.clone())],
        body: None,
    };

    let token = match state.transport.execute(request, None).await {
        Ok(response) if response.is_success() => match response.bytes().await {
            Ok(payload) => String::from_utf8_lossy(&payload).into_owned(),
            Err(err) => {
                error!("Failed to read Azure token response: {}", err);
                return token_failure();
            }
        },
        Ok(response) => {
            error!("Failed to generate Azure token: upstream answered {}", response.status());
            return token_failure();
        }
        Err(err) => {
            error!("Failed to generate Azure token: {}", err);
            return token_failure();
        }
    };

    Json(json!({
        "token": token,
        "region": region,
    }))
    .into_response()
}

fn token_failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to generate token" })),
    )
        .into_response()
}
