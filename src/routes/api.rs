use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{gateway, speech_token};
use crate::state::AppState;
use std::sync::Arc;

pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/{service}", post(gateway::api_dispatch))
        .route("/get-azure-token", get(speech_token::get_azure_token))
        .layer(TraceLayer::new_for_http())
}
