//! What the connection test runs and how it waits.

use crate::choreography::{greeting_sequence, MotionStep};
use sota_types::SpeechConfig;
use std::time::Duration;

/// Server-side listening window for recognition calls.
pub const RECOGNITION_TIMEOUT_MS: i32 = 10_000;

/// How the motion step waits for a pose to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionWait {
    /// Sleep each step's fixed settle time.
    Sleep,
    /// Poll `IsEndInterAll` until the robot reports completion. Bounded by the
    /// settle time plus [`POLL_GRACE`]; falls back to sleeping if polling fails.
    PollCompletion { interval: Duration },
}

/// Extra time granted to completion polling beyond a step's settle time.
pub const POLL_GRACE: Duration = Duration::from_secs(5);

/// Which recognition RPC the recognition step calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionMode {
    /// Free-form sentence recognition (`Recognize`).
    Free,
    YesNo,
    Name,
    Names,
    /// Short conversational reply (`RecognizeGeneralResponse`).
    Response,
}

#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub choreography: Vec<MotionStep>,
    pub motion_wait: MotionWait,
    pub speech_text: String,
    pub speech_config: SpeechConfig,
    /// Read power, buttons, and current pose before moving.
    pub preflight: bool,
    /// Enable mouth LED voice sync before playing synthesized speech.
    pub mouth_led_voice_sync: bool,
    /// WAV file on the robot to play after synthesized speech.
    pub local_audio: Option<String>,
    /// Record this many milliseconds from the microphone and play it back.
    pub record_ms: Option<i32>,
    /// Recognition is off unless a mode is set.
    pub recognition: Option<RecognitionMode>,
    pub recognition_timeout_ms: i32,
    pub recognition_retries: i32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            choreography: greeting_sequence(),
            motion_wait: MotionWait::Sleep,
            speech_text: "こんにちは、ソータです。Rust gRPC経由で再生中。".to_string(),
            speech_config: SpeechConfig::new(8, 8, 8),
            preflight: false,
            mouth_led_voice_sync: false,
            local_audio: None,
            record_ms: None,
            recognition: None,
            recognition_timeout_ms: RECOGNITION_TIMEOUT_MS,
            recognition_retries: 1,
        }
    }
}
