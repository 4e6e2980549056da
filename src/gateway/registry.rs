//! Service registry: static descriptors for every routed provider.
//!
//! Each `ServiceDescriptor` records how one logical service is reached and
//! relayed. Adding a provider means adding a row here plus, if its request
//! shape is new, a transform arm; the dispatcher itself never grows.

use std::time::Duration;

/// How the upstream's response is relayed to the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseMode {
    /// Forward the upstream byte stream to the caller as a live event stream.
    StreamText,
    /// Buffer the complete upstream response and relay its JSON body.
    Json,
    /// Buffer the complete upstream payload and relay it as binary audio.
    BinaryAudio,
}

/// Which request transform applies to a service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProviderKind {
    /// Azure OpenAI chat deployment; the inbound body passes through unchanged.
    AzureChat,
    /// ElevenLabs text-to-speech; the body is rebuilt around a resolved voice.
    ElevenLabsTts,
}

/// Static configuration record for one routed service.
///
/// Immutable for the process lifetime. Every request either maps to exactly
/// one descriptor or is rejected before any upstream call.
#[derive(Debug)]
pub struct ServiceDescriptor {
    /// Routed name, as it appears in `POST /api/{service}`.
    pub id: &'static str,
    /// Human-readable name used in caller-visible diagnostics.
    pub display_name: &'static str,
    /// Which transform builds the outbound request.
    pub kind: ProviderKind,
    /// Which relay strategy consumes the upstream response.
    pub response_mode: ResponseMode,
    /// Per-call timeout; `None` means the transport default.
    pub timeout: Option<Duration>,
}

/// Chat completions can take minutes to generate; both chat services wait
/// well past the transport default before giving up.
const CHAT_TIMEOUT: Duration = Duration::from_secs(320);

/// All routed services.
pub static SERVICES: &[ServiceDescriptor] = &[
    ServiceDescriptor {
        id: "openaiSimulateur",
        display_name: "OpenAI Simulateur",
        kind: ProviderKind::AzureChat,
        response_mode: ResponseMode::StreamText,
        timeout: Some(CHAT_TIMEOUT),
    },
    ServiceDescriptor {
        id: "openaiAnalyse",
        display_name: "OpenAI Analyse",
        kind: ProviderKind::AzureChat,
        response_mode: ResponseMode::Json,
        timeout: Some(CHAT_TIMEOUT),
    },
    ServiceDescriptor {
        id: "elevenlabs",
        display_name: "ElevenLabs",
        kind: ProviderKind::ElevenLabsTts,
        response_mode: ResponseMode::BinaryAudio,
        timeout: None,
    },
];

/// Look up a service descriptor by its routed id.
///
/// Pure lookup, no I/O. A miss means the route is invalid; it is distinct
/// from a resolved service whose configuration is incomplete.
pub fn resolve(service_id: &str) -> Option<&'static ServiceDescriptor> {
    SERVICES.iter().find(|spec| spec.id == service_id)
}
