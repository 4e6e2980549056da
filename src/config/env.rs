use std::env;

use super::ServerConfig;

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Reads configuration from environment variables, with sensible defaults
    /// for the server address. Also loads from a `.env` file if present using
    /// dotenvy.
    ///
    /// Provider values are deliberately not validated here: a missing
    /// credential is reported when a request actually selects that provider.
    ///
    /// # Errors
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        // Server configuration
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|e| format!("Invalid port number: {e}"))?;

        // Azure OpenAI chat deployment
        let azure_openai_key = env::var("AZURE_OPENAI_KEY_SIMULATEUR").ok();
        let azure_openai_endpoint = env::var("AZURE_OPENAI_ENDPOINT_SIMULATEUR").ok();
        let azure_openai_deployment = env::var("AZURE_OPENAI_DEPLOYMENT_SIMULATEUR").ok();
        let azure_openai_api_version = env::var("AZURE_OPENAI_API_VERSION").ok();

        // Provider API keys
        let elevenlabs_api_key = env::var("ELEVENLAB_API_KEY").ok();

        // Azure Speech token issuance
        let azure_speech_api_key = env::var("AZURE_SPEECH_API_KEY").ok();
        let azure_region = env::var("AZURE_REGION").ok();

        Ok(ServerConfig {
            host,
            port,
            azure_openai_key,
            azure_openai_endpoint,
            azure_openai_deployment,
            azure_openai_api_version,
            elevenlabs_api_key,
            azure_speech_api_key,
            azure_region,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    // Helper to clean up environment variables after tests
    fn cleanup_env_vars() {
        unsafe {
            env::remove_var("HOST");
            env::remove_var("PORT");
            env::remove_var("AZURE_OPENAI_KEY_SIMULATEUR");
            env::remove_var("AZURE_OPENAI_ENDPOINT_SIMULATEUR");
            env::remove_var("AZURE_OPENAI_DEPLOYMENT_SIMULATEUR");
            env::remove_var("AZURE_OPENAI_API_VERSION");
            env::remove_var("ELEVENLAB_API_KEY");
            env::remove_var("AZURE_SPEECH_API_KEY");
            env::remove_var("AZURE_REGION");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        cleanup_env_vars();

        let config = ServerConfig::from_env().expect("Should load config");
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert!(config.azure_openai_key.is_none());
        assert!(config.elevenlabs_api_key.is_none());
        assert!(config.azure_speech_api_key.is_none());
        assert!(config.azure_region.is_none());

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_reads_provider_values() {
        cleanup_env_vars();

        unsafe {
            env::set_var("HOST", "127.0.0.1");
            env::set_var("PORT", "8080");
            env::set_var("AZURE_OPENAI_KEY_SIMULATEUR", "azure-key");
            env::set_var("AZURE_OPENAI_ENDPOINT_SIMULATEUR", "https://example.openai.azure.com");
            env::set_var("AZURE_OPENAI_DEPLOYMENT_SIMULATEUR", "gpt-4o");
            env::set_var("AZURE_OPENAI_API_VERSION", "2024-06-01");
            env::set_var("ELEVENLAB_API_KEY", "el-key");
            env::set_var("AZURE_SPEECH_API_KEY", "speech-key");
            env::set_var("AZURE_REGION", "westeurope");
        }

        let config = ServerConfig::from_env().expect("Should load config");
        assert_eq!(config.address(), "127.0.0.1:8080");
        assert_eq!(config.azure_openai_key.as_deref(), Some("azure-key"));
        assert_eq!(
            config.azure_openai_endpoint.as_deref(),
            Some("https://example.openai.azure.com")
        );
        assert_eq!(config.azure_openai_deployment.as_deref(), Some("gpt-4o"));
        assert_eq!(config.azure_openai_api_version.as_deref(), Some("2024-06-01"));
        assert_eq!(config.elevenlabs_api_key.as_deref(), Some("el-key"));
        assert_eq!(config.azure_speech_api_key.as_deref(), Some("speech-key"));
        assert_eq!(config.azure_region.as_deref(), Some("westeurope"));

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_from_env_invalid_port() {
        cleanup_env_vars();

        unsafe {
            env::set_var("PORT", "not-a-port");
        }

        let result = ServerConfig::from_env();
        assert!(result.is_err());

        cleanup_env_vars();
    }
}
