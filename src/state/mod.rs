use std::sync::Arc;

use crate::config::ServerConfig;
use crate::gateway::transport::{ReqwestTransport, Transport};

/// Application state that can be shared across handlers
///
/// Everything in here is read-only after startup; concurrent requests share
/// it without locking.
#[derive(Clone)]
pub struct AppState {
    pub config: ServerConfig,
    /// Transport used for every upstream call
    pub transport: Arc<dyn Transport>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Arc<Self> {
        Self::with_transport(config, Arc::new(ReqwestTransport::new()))
    }

    /// Build state around a specific transport. Tests use this to substitute
    /// a recording double for the real HTTP client.
    pub fn with_transport(config: ServerConfig, transport: Arc<dyn Transport>) -> Arc<Self> {
        Arc::new(Self { config, transport })
    }
}
