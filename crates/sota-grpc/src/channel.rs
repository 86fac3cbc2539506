//! Plaintext channel to the robot.

use tonic::transport::{Channel, Endpoint};

/// Port the robot's gRPC server listens on unless told otherwise.
pub const DEFAULT_PORT: u16 = 8080;

/// Largest message either side will accept. Matches the robot server's inbound
/// limit; synthesized speech routinely exceeds tonic's 4 MiB default.
pub const MAX_MESSAGE_SIZE: usize = 512 * 1024 * 1024;

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("invalid endpoint {uri}: {reason}")]
    InvalidEndpoint { uri: String, reason: String },
}

/// `http://host:port`; the channel never negotiates TLS.
pub fn endpoint_uri(host: &str, port: u16) -> String {
    format!("http://{}:{}", host, port)
}

/// Build a lazily connecting channel: nothing is dialed until the first call,
/// so an unreachable robot surfaces as a per-call error.
///
/// Must be called from within a tokio runtime.
pub fn connect_lazy(host: &str, port: u16) -> Result<Channel, ConnectError> {
    let uri = endpoint_uri(host, port);
    let endpoint = Endpoint::from_shared(uri.clone()).map_err(|e| ConnectError::InvalidEndpoint {
        uri: uri.clone(),
        reason: e.to_string(),
    })?;
    tracing::debug!(%uri, "opening plaintext channel");
    Ok(endpoint.connect_lazy())
}
