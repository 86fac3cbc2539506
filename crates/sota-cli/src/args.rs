use clap::{Parser, ValueEnum};
use sota_driver::{DriverConfig, MotionWait, RecognitionMode};
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "sota-connection-test")]
#[command(about = "Exercise a Sota robot's motion, speech and playback services over gRPC", long_about = None)]
pub struct Cli {
    /// Robot IP address, optionally with a port (e.g. 192.168.11.30:8080)
    pub host: String,

    /// gRPC port; overrides a port given in HOST
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Read power, buttons and current pose before moving
    #[arg(long, default_value_t = false)]
    pub preflight: bool,

    /// Poll IsEndInterAll instead of sleeping a fixed time after each pose
    #[arg(long, default_value_t = false)]
    pub wait_for_motion: bool,

    /// Flicker the mouth LED with the synthesized voice
    #[arg(long, default_value_t = false)]
    pub mouth_sync: bool,

    /// WAV file on the robot to play after the synthesized speech
    #[arg(long, value_name = "PATH")]
    pub local_audio: Option<String>,

    /// Record this many milliseconds from the microphone and play it back
    #[arg(long, value_name = "MS")]
    pub record_ms: Option<i32>,

    /// Run speech recognition after playback
    #[arg(long, value_enum, value_name = "MODE")]
    pub recognize: Option<RecognizeArg>,

    /// Retries for the yes-no, name, names and response recognizers
    #[arg(long, default_value_t = 1)]
    pub recognize_retries: i32,

    /// Text to synthesize
    #[arg(long)]
    pub text: Option<String>,

    /// Print the run report as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RecognizeArg {
    Free,
    YesNo,
    Name,
    Names,
    Response,
}

impl From<RecognizeArg> for RecognitionMode {
    fn from(arg: RecognizeArg) -> Self {
        match arg {
            RecognizeArg::Free => RecognitionMode::Free,
            RecognizeArg::YesNo => RecognitionMode::YesNo,
            RecognizeArg::Name => RecognitionMode::Name,
            RecognizeArg::Names => RecognitionMode::Names,
            RecognizeArg::Response => RecognitionMode::Response,
        }
    }
}

impl Cli {
    pub fn driver_config(&self) -> DriverConfig {
        let mut config = DriverConfig::default();
        if self.wait_for_motion {
            config.motion_wait = MotionWait::PollCompletion {
                interval: Duration::from_millis(100),
            };
        }
        if let Some(text) = &self.text {
            config.speech_text = text.clone();
        }
        config.preflight = self.preflight;
        config.mouth_led_voice_sync = self.mouth_sync;
        config.local_audio = self.local_audio.clone();
        config.record_ms = self.record_ms;
        config.recognition = self.recognize.map(RecognitionMode::from);
        config.recognition_retries = self.recognize_retries;
        config
    }
}
