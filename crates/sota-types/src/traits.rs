//! Service traits for the remote robot services.
//!
//! One trait per remote service. Implementations translate each method into a
//! single unary RPC; they never retry.

use crate::robotlib::{
    GetButtonStateResponse, GetPowerStatusResponse, PlayAudioResponse, Pose,
};
use crate::sotatalk::{RecognitionResult, SpeechConfig, YesNoAnswer};
use async_trait::async_trait;

/// Battery and charger state reported by the robot.
pub type PowerStatus = GetPowerStatusResponse;
/// Pressed state of the body buttons.
pub type ButtonState = GetButtonStateResponse;
/// Playback acknowledgment (success flag and playback id).
pub type PlaybackStarted = PlayAudioResponse;

/// Servo power, poses, and body status (`MotionService`).
#[async_trait]
pub trait MotionService: Send + Sync {
    /// Enable servo torque.
    async fn servo_on(&self) -> Result<(), RpcError>;

    /// Disable servo torque.
    async fn servo_off(&self) -> Result<(), RpcError>;

    /// Move to `pose` over `time_ms` milliseconds; returns the robot's success flag.
    async fn play_pose(&self, pose: &Pose, time_ms: i32) -> Result<bool, RpcError>;

    /// Read back the current servo angles.
    async fn current_pose(&self) -> Result<Pose, RpcError>;

    /// Whether every servo has finished interpolating to its target.
    async fn is_motion_complete(&self) -> Result<bool, RpcError>;

    async fn power_status(&self) -> Result<PowerStatus, RpcError>;

    async fn button_state(&self) -> Result<ButtonState, RpcError>;

    async fn set_collision_detection(&self, enabled: bool) -> Result<(), RpcError>;

    /// Toggle mouth LED flicker in sync with voice output.
    async fn set_mouth_led_voice_sync(&self, enabled: bool) -> Result<(), RpcError>;
}

/// Audio output on the robot speaker (`PlaybackService`).
#[async_trait]
pub trait PlaybackService: Send + Sync {
    /// Play WAV bytes.
    async fn play_audio(
        &self,
        audio: Vec<u8>,
        wait_for_completion: bool,
    ) -> Result<PlaybackStarted, RpcError>;

    /// Play a WAV file stored on the robot.
    async fn play_local_audio(
        &self,
        path: &str,
        wait_for_completion: bool,
    ) -> Result<PlaybackStarted, RpcError>;

    /// Stop one playback, or all playbacks when `playback_id` is `None`.
    async fn stop_audio(&self, playback_id: Option<&str>) -> Result<(), RpcError>;

    /// Whether one playback (or any, when `None`) is still playing.
    async fn is_audio_playing(&self, playback_id: Option<&str>) -> Result<bool, RpcError>;
}

/// Microphone capture (`RecordingService`).
#[async_trait]
pub trait RecordingService: Send + Sync {
    async fn start_recording(&self, duration_ms: i32) -> Result<bool, RpcError>;

    /// Stop capturing and return the recorded WAV bytes.
    async fn stop_recording(&self) -> Result<Vec<u8>, RpcError>;

    async fn is_recording(&self) -> Result<bool, RpcError>;
}

/// Speech synthesis (`TextToSpeechService`).
#[async_trait]
pub trait TextToSpeechService: Send + Sync {
    /// Synthesize `text`; `None` config leaves tone to the robot defaults.
    async fn synthesize(
        &self,
        text: &str,
        config: Option<SpeechConfig>,
    ) -> Result<Vec<u8>, RpcError>;
}

/// Speech recognition (`SpeechRecognitionService`). Every call listens on the
/// robot microphone, so it blocks until speech or `timeout_ms`.
#[async_trait]
pub trait SpeechRecognitionService: Send + Sync {
    async fn recognize(&self, timeout_ms: i32) -> Result<RecognitionResult, RpcError>;

    async fn recognize_yes_or_no(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<YesNoAnswer, RpcError>;

    async fn recognize_name(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Option<String>, RpcError>;

    async fn recognize_names(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Vec<String>, RpcError>;

    async fn recognize_general_response(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Option<String>, RpcError>;
}

/// Failure of one remote call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RpcError {
    /// The call reached the transport and came back with a non-OK status.
    #[error("rpc failed ({code}): {message}")]
    Status { code: String, message: String },
    /// The call never got a reply: the status was raised locally from a
    /// connection or protocol error.
    #[error("transport error: {0}")]
    Transport(String),
}

impl RpcError {
    pub fn status(code: impl Into<String>, message: impl Into<String>) -> Self {
        RpcError::Status {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Human-readable failure detail, without the status code.
    pub fn details(&self) -> &str {
        match self {
            RpcError::Status { message, .. } => message,
            RpcError::Transport(message) => message,
        }
    }
}

impl From<tonic::Status> for RpcError {
    fn from(status: tonic::Status) -> Self {
        if std::error::Error::source(&status).is_some() {
            return RpcError::Transport(status.message().to_string());
        }
        RpcError::status(format!("{:?}", status.code()), status.message())
    }
}
