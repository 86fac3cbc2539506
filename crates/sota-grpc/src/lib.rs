//! Plaintext tonic clients for the Sota robot services.
//!
//! Every client wraps a generated `sota-types` stub over the same lazily
//! connected [`tonic::transport::Channel`] and implements the matching
//! service trait.

mod channel;
#[cfg(feature = "test-util")]
pub mod mock;
mod motion;
mod playback;
mod speech;

pub use channel::{connect_lazy, endpoint_uri, ConnectError, DEFAULT_PORT, MAX_MESSAGE_SIZE};
pub use motion::MotionClient;
pub use playback::{PlaybackClient, RecordingClient};
pub use sota_types::RpcError;
pub use speech::{SpeechRecognitionClient, TextToSpeechClient};

#[cfg(feature = "test-util")]
pub use mock::{RobotCall, ScriptedRobot};

use tonic::transport::Channel;

/// One stub per remote service, all sharing a single channel.
#[derive(Debug, Clone)]
pub struct RobotClients {
    pub motion: MotionClient,
    pub playback: PlaybackClient,
    pub recording: RecordingClient,
    pub tts: TextToSpeechClient,
    pub recognition: SpeechRecognitionClient,
}

impl RobotClients {
    /// Open the plaintext channel to `host:port` and build every stub on it.
    pub fn connect(host: &str, port: u16) -> Result<Self, ConnectError> {
        Ok(Self::from_channel(connect_lazy(host, port)?))
    }

    pub fn from_channel(channel: Channel) -> Self {
        Self {
            motion: MotionClient::new(channel.clone()),
            playback: PlaybackClient::new(channel.clone()),
            recording: RecordingClient::new(channel.clone()),
            tts: TextToSpeechClient::new(channel.clone()),
            recognition: SpeechRecognitionClient::new(channel),
        }
    }
}
