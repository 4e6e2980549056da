//! Per-provider outbound request construction.
//!
//! Each transform derives the full upstream call (URL, credential header,
//! body) from the inbound body and the process configuration. Transforms are
//! deterministic, touch no shared state, and fail before any upstream call
//! on invalid input or incomplete configuration.

use serde_json::{Value, json};

use crate::config::ServerConfig;
use crate::errors::app_error::{GatewayError, GatewayResult};

use super::registry::{ProviderKind, ServiceDescriptor};
use super::voices::{normalize_language, resolve_voice};

const ELEVENLABS_TTS_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";

/// Rendering parameters for ElevenLabs synthesis. Fixed by the deployment,
/// not caller-controllable.
const ELEVENLABS_MODEL_ID: &str = "eleven_flash_v2_5";
const VOICE_STABILITY: f64 = 0.6;
const VOICE_SIMILARITY_BOOST: f64 = 0.7;
const VOICE_STYLE: f64 = 0.1;

/// A fully materialized upstream request.
///
/// Method is POST for every current provider. Headers carry the resolved
/// credential; the value is created per request and dropped with it.
#[derive(Debug)]
pub struct OutboundRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    /// JSON body, or `None` for an empty-bodied call.
    pub body: Option<Value>,
}

/// Build the outbound request for a resolved service.
pub fn build_outbound(
    spec: &ServiceDescriptor,
    config: &ServerConfig,
    inbound: &Value,
) -> GatewayResult<OutboundRequest> {
    match spec.kind {
        ProviderKind::AzureChat => build_azure_chat(spec, config, inbound),
        ProviderKind::ElevenLabsTts => build_elevenlabs_tts(spec, config, inbound),
    }
}

/// Azure OpenAI chat deployments take the inbound chat payload unchanged;
/// the gateway only supplies the deployment URL and the credential header.
fn build_azure_chat(
    spec: &ServiceDescriptor,
    config: &ServerConfig,
    inbound: &Value,
) -> GatewayResult<OutboundRequest> {
    let (Some(api_key), Some(endpoint), Some(deployment), Some(api_version)) = (
        config.azure_openai_key.as_ref(),
        config.azure_openai_endpoint.as_ref(),
        config.azure_openai_deployment.as_ref(),
        config.azure_openai_api_version.as_ref(),
    ) else {
        return Err(GatewayError::MissingCredential(spec.display_name));
    };

    let url = format!(
        "{endpoint}/openai/deployments/{deployment}/chat/completions?api-version={api_version}"
    );

    Ok(OutboundRequest {
        url,
        headers: vec![("api-key", api_key.clone())],
        body: Some(inbound.clone()),
    })
}

/// ElevenLabs synthesis: resolve the voice for the requested language, then
/// build the provider's fixed-shape request around it.
fn build_elevenlabs_tts(
    spec: &ServiceDescriptor,
    config: &ServerConfig,
    inbound: &Value,
) -> GatewayResult<OutboundRequest> {
    let Some(api_key) = config.elevenlabs_api_key.as_ref() else {
        return Err(GatewayError::MissingCredential(spec.display_name));
    };

    let text = inbound
        .get("text")
        .and_then(Value::as_str)
        .ok_or(GatewayError::MissingField("text"))?;
    let language = inbound
        .get("selectedLanguage")
        .and_then(Value::as_str)
        .ok_or(GatewayError::MissingField("selectedLanguage"))?;

    let Some(voice_id) = resolve_voice(language) else {
        return Err(GatewayError::UnsupportedLanguage(normalize_language(
            language,
        )));
    };
    tracing::debug!("Selected voice id: {}", voice_id);

    let body = json!({
        "text": text,
        "model_id": ELEVENLABS_MODEL_ID,
        "voice_settings": {
            "stability": VOICE_STABILITY,
            "similarity_boost": VOICE_SIMILARITY_BOOST,
            "style": VOICE_STYLE,
        }
    });

    Ok(OutboundRequest {
        url: format!("{ELEVENLABS_TTS_URL}/{voice_id}/stream"),
        headers: vec![("xi-api-key", api_key.clone())],
        body: Some(body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::registry::resolve;

    fn full_config() -> ServerConfig {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            azure_openai_key: Some("azure-key".to_string()),
            azure_openai_endpoint: Some("https://example.openai.azure.com".to_string()),
            azure_openai_deployment: Some("gpt-4o".to_string()),
            azure_openai_api_version: Some("2024-06-01".to_string()),
            elevenlabs_api_key: Some("el-key".to_string()),
            azure_speech_api_key: None,
            azure_region: None,
        }
    }

    #[test]
    fn test_azure_chat_passes_body_through() {
        let spec = resolve("openaiSimulateur").unwrap();
        let inbound = json!({
            "messages": [{ "role": "user", "content": "Bonjour" }],
            "stream": true
        });

        let request = build_outbound(spec, &full_config(), &inbound).unwrap();
        assert_eq!(
            request.url,
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2024-06-01"
        );
        assert_eq!(request.headers, vec![("api-key", "azure-key".to_string())]);
        assert_eq!(request.body, Some(inbound));
    }

    #[test]
    fn test_azure_chat_missing_any_value_is_config_error() {
        let spec = resolve("openaiAnalyse").unwrap();
        let mut config = full_config();
        config.azure_openai_deployment = None;

        let err = build_outbound(spec, &config, &json!({})).unwrap_err();
        assert!(matches!(
            err,
            GatewayError::MissingCredential("OpenAI Analyse")
        ));
    }

    #[test]
    fn test_elevenlabs_builds_fixed_shape_body() {
        let spec = resolve("elevenlabs").unwrap();
        let inbound = json!({ "text": "Bonjour tout le monde", "selectedLanguage": "français" });

        let request = build_outbound(spec, &full_config(), &inbound).unwrap();
        assert_eq!(
            request.url,
            "https://api.elevenlabs.io/v1/text-to-speech/1a3lMdKLUcfcMtvN772u/stream"
        );
        assert_eq!(request.headers, vec![("xi-api-key", "el-key".to_string())]);
        assert_eq!(
            request.body,
            Some(json!({
                "text": "Bonjour tout le monde",
                "model_id": "eleven_flash_v2_5",
                "voice_settings": {
                    "stability": 0.6,
                    "similarity_boost": 0.7,
                    "style": 0.1,
                }
            }))
        );
    }

    #[test]
    fn test_elevenlabs_language_is_normalized() {
        let spec = resolve("elevenlabs").unwrap();
        let inbound = json!({ "text": "Hello", "selectedLanguage": "  ANGLAIS " });

        let request = build_outbound(spec, &full_config(), &inbound).unwrap();
        assert!(request.url.contains("7tRwuZTD1EWi6nydVerp"));
    }

    #[test]
    fn test_elevenlabs_unknown_language_fails_before_dispatch() {
        let spec = resolve("elevenlabs").unwrap();
        let inbound = json!({ "text": "Hello", "selectedLanguage": "klingon" });

        let err = build_outbound(spec, &full_config(), &inbound).unwrap_err();
        assert!(matches!(err, GatewayError::UnsupportedLanguage(_)));
    }

    #[test]
    fn test_elevenlabs_missing_fields() {
        let spec = resolve("elevenlabs").unwrap();

        let err = build_outbound(spec, &full_config(), &json!({ "selectedLanguage": "anglais" }))
            .unwrap_err();
        assert!(matches!(err, GatewayError::MissingField("text")));

        let err = build_outbound(spec, &full_config(), &json!({ "text": "Hello" })).unwrap_err();
        assert!(matches!(err, GatewayError::MissingField("selectedLanguage")));
    }

    #[test]
    fn test_elevenlabs_missing_key_reported_before_validation() {
        let spec = resolve("elevenlabs").unwrap();
        let mut config = full_config();
        config.elevenlabs_api_key = None;

        // Credential presence is checked first; a misconfigured deployment is
        // an operator error even when the caller input is also bad
        let err = build_outbound(spec, &config, &json!({})).unwrap_err();
        assert!(matches!(err, GatewayError::MissingCredential("ElevenLabs")));
    }
}
