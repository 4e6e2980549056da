//! Provider dispatch and response transcoding
//!
//! The heart of the gateway: given a routed service name, select the
//! provider's configuration, build the outbound call, execute it through the
//! transport, and relay the result in the shape that provider answers with.
//!
//! - `registry` - Static table of routed services and their response modes
//! - `voices` - Language label to ElevenLabs voice id mapping
//! - `transform` - Per-provider outbound request construction
//! - `transport` - HTTP transport seam (trait + reqwest implementation)
//! - `dispatch` - Resolve, transform, execute, relay orchestration
//! - `relay` - Stream, buffered-JSON and binary relay strategies

pub mod dispatch;
pub mod registry;
pub mod relay;
pub mod transform;
pub mod transport;
pub mod voices;

pub use dispatch::dispatch;
pub use registry::{ProviderKind, ResponseMode, ServiceDescriptor};
pub use transform::OutboundRequest;
pub use transport::{ReqwestTransport, Transport, TransportError, UpstreamResponse};
