//! `host[:port]` resolution.

use sota_grpc::DEFAULT_PORT;
use std::fmt;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TargetError {
    #[error("empty host")]
    EmptyHost,
    #[error("invalid port '{port}' in '{target}'")]
    InvalidPort { target: String, port: String },
}

/// Where the robot's gRPC server listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    pub port: u16,
}

impl Target {
    /// Split `target` into host and port.
    ///
    /// The host is everything before the first `:`. A non-zero `--port` flag
    /// wins and the embedded port is then not parsed at all; otherwise the
    /// segment after the first `:` is the port (later segments are ignored),
    /// and with neither the port is [`DEFAULT_PORT`].
    pub fn resolve(target: &str, port_flag: Option<u16>) -> Result<Self, TargetError> {
        let mut segments = target.split(':');
        let host = segments.next().unwrap_or_default();
        if host.is_empty() {
            return Err(TargetError::EmptyHost);
        }

        let port = match (port_flag.filter(|p| *p != 0), segments.next()) {
            (Some(port), _) => port,
            (None, Some(embedded)) => {
                embedded
                    .parse::<u16>()
                    .map_err(|_| TargetError::InvalidPort {
                        target: target.to_string(),
                        port: embedded.to_string(),
                    })?
            }
            (None, None) => DEFAULT_PORT,
        };
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
