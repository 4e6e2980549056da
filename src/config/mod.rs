//! Configuration module for the parlo gateway
//!
//! All configuration comes from environment variables (with `.env` support),
//! read once at process start. Provider credentials are optional on purpose:
//! a missing value only fails the requests that need it, at dispatch time,
//! so a deployment that never calls a given provider does not have to
//! configure it.

mod env;

/// Server configuration
///
/// Contains everything needed to run the gateway:
/// - Server settings (host, port)
/// - Azure OpenAI chat deployment settings
/// - ElevenLabs TTS API key
/// - Azure Speech token issuance settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    // Server settings
    pub host: String,
    pub port: u16,

    // Azure OpenAI chat deployment (shared by the streaming and buffered services)
    pub azure_openai_key: Option<String>,
    pub azure_openai_endpoint: Option<String>,
    pub azure_openai_deployment: Option<String>,
    pub azure_openai_api_version: Option<String>,

    // ElevenLabs TTS
    pub elevenlabs_api_key: Option<String>,

    // Azure Speech token issuance
    pub azure_speech_api_key: Option<String>,
    pub azure_region: Option<String>,
}

impl ServerConfig {
    /// Get the server address as a string suitable for binding
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
