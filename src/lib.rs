pub mod config;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod routes;
pub mod state;

// Re-export commonly used items for convenience
pub use config::ServerConfig;
pub use errors::app_error::{GatewayError, GatewayResult};
pub use gateway::transport::{ReqwestTransport, Transport};
pub use state::AppState;
