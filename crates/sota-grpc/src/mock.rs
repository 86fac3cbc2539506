//! Scripted in-process robot for tests: records every call, no network.

use async_trait::async_trait;
use sota_types::robotlib::{GetButtonStateResponse, GetPowerStatusResponse, PlayAudioResponse};
use sota_types::*;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// One recorded call, with the arguments that matter to assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RobotCall {
    ServoOn,
    ServoOff,
    PlayPose { pose: Pose, time_ms: i32 },
    CurrentPose,
    IsMotionComplete,
    PowerStatus,
    ButtonState,
    SetCollisionDetection(bool),
    SetMouthLedVoiceSync(bool),
    PlayAudio { bytes: usize, wait_for_completion: bool },
    PlayLocalAudio { path: String, wait_for_completion: bool },
    StopAudio(Option<String>),
    IsAudioPlaying(Option<String>),
    StartRecording(i32),
    StopRecording,
    IsRecording,
    Synthesize { text: String, config: Option<SpeechConfig> },
    Recognize { timeout_ms: i32 },
    RecognizeYesOrNo { timeout_ms: i32, retry_count: i32 },
    RecognizeName { timeout_ms: i32, retry_count: i32 },
    RecognizeNames { timeout_ms: i32, retry_count: i32 },
    RecognizeGeneralResponse { timeout_ms: i32, retry_count: i32 },
}

impl RobotCall {
    /// Wire name of the RPC this call maps to.
    pub fn rpc_name(&self) -> &'static str {
        match self {
            RobotCall::ServoOn => "ServoOn",
            RobotCall::ServoOff => "ServoOff",
            RobotCall::PlayPose { .. } => "PlayPose",
            RobotCall::CurrentPose => "GetCurrentPose",
            RobotCall::IsMotionComplete => "IsEndInterAll",
            RobotCall::PowerStatus => "GetPowerStatus",
            RobotCall::ButtonState => "GetButtonState",
            RobotCall::SetCollisionDetection(true) => "EnableCollisionDetection",
            RobotCall::SetCollisionDetection(false) => "DisableCollisionDetection",
            RobotCall::SetMouthLedVoiceSync(_) => "SetMouthLedVoiceSync",
            RobotCall::PlayAudio { .. } => "PlayAudio",
            RobotCall::PlayLocalAudio { .. } => "PlayLocalAudio",
            RobotCall::StopAudio(_) => "StopAudio",
            RobotCall::IsAudioPlaying(_) => "IsAudioPlaying",
            RobotCall::StartRecording(_) => "StartRecording",
            RobotCall::StopRecording => "StopRecording",
            RobotCall::IsRecording => "IsRecording",
            RobotCall::Synthesize { .. } => "GetTTSData",
            RobotCall::Recognize { .. } => "Recognize",
            RobotCall::RecognizeYesOrNo { .. } => "RecognizeYesOrNo",
            RobotCall::RecognizeName { .. } => "RecognizeName",
            RobotCall::RecognizeNames { .. } => "RecognizeNames",
            RobotCall::RecognizeGeneralResponse { .. } => "RecognizeGeneralResponse",
        }
    }
}

/// In-memory robot implementing every service trait.
///
/// Calls succeed with canned data unless their RPC name was passed to
/// [`ScriptedRobot::failing`], in which case they return an `Unavailable` status.
pub struct ScriptedRobot {
    calls: RwLock<Vec<RobotCall>>,
    failing: HashSet<&'static str>,
    tts_audio: Vec<u8>,
    recorded_audio: Vec<u8>,
    recognition: RecognitionResult,
    /// `IsEndInterAll` reports false this many times before reporting true.
    busy_polls: usize,
    polls_seen: AtomicUsize,
    audio_playing: bool,
}

impl ScriptedRobot {
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            failing: HashSet::new(),
            tts_audio: b"RIFF\x24\x00\x00\x00WAVEfmt ".to_vec(),
            recorded_audio: b"RIFF\x24\x00\x00\x00WAVEdata".to_vec(),
            recognition: RecognitionResult {
                recognized: true,
                basic_result: "こんにちは".to_string(),
                sentence_list: vec![Sentence {
                    word_list: vec![Word {
                        labels: vec!["こんにちは".to_string()],
                        types: vec![],
                    }],
                    score: 1.0,
                }],
            },
            busy_polls: 0,
            polls_seen: AtomicUsize::new(0),
            audio_playing: false,
        }
    }

    /// Make every call of the named RPC (e.g. `"PlayPose"`) fail.
    pub fn failing(mut self, rpc_name: &'static str) -> Self {
        self.failing.insert(rpc_name);
        self
    }

    pub fn with_tts_audio(mut self, audio: Vec<u8>) -> Self {
        self.tts_audio = audio;
        self
    }

    pub fn with_recorded_audio(mut self, audio: Vec<u8>) -> Self {
        self.recorded_audio = audio;
        self
    }

    pub fn with_recognition(mut self, result: RecognitionResult) -> Self {
        self.recognition = result;
        self
    }

    /// Report motion as still running for the next `polls` completion checks.
    pub fn with_busy_polls(mut self, polls: usize) -> Self {
        self.busy_polls = polls;
        self
    }

    /// Report every playback as still running.
    pub fn with_playing_audio(mut self) -> Self {
        self.audio_playing = true;
        self
    }

    /// Every call made so far, in order.
    pub async fn calls(&self) -> Vec<RobotCall> {
        self.calls.read().await.clone()
    }

    /// RPC names of every call made so far, in order.
    pub async fn rpc_names(&self) -> Vec<&'static str> {
        self.calls.read().await.iter().map(RobotCall::rpc_name).collect()
    }

    async fn record(&self, call: RobotCall) -> Result<(), RpcError> {
        let name = call.rpc_name();
        self.calls.write().await.push(call);
        if self.failing.contains(name) {
            return Err(RpcError::status(
                "Unavailable",
                format!("scripted failure in {}", name),
            ));
        }
        Ok(())
    }
}

impl Default for ScriptedRobot {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MotionService for ScriptedRobot {
    async fn servo_on(&self) -> Result<(), RpcError> {
        self.record(RobotCall::ServoOn).await
    }

    async fn servo_off(&self) -> Result<(), RpcError> {
        self.record(RobotCall::ServoOff).await
    }

    async fn play_pose(&self, pose: &Pose, time_ms: i32) -> Result<bool, RpcError> {
        self.record(RobotCall::PlayPose {
            pose: pose.clone(),
            time_ms,
        })
        .await?;
        Ok(true)
    }

    async fn current_pose(&self) -> Result<Pose, RpcError> {
        self.record(RobotCall::CurrentPose).await?;
        Ok(Pose::from_angles([
            (ServoId::BodyY, 0),
            (ServoId::LShoulder, -900),
            (ServoId::LElbow, 0),
            (ServoId::RShoulder, 900),
            (ServoId::RElbow, 0),
            (ServoId::HeadY, 0),
            (ServoId::HeadP, 0),
            (ServoId::HeadR, 0),
        ]))
    }

    async fn is_motion_complete(&self) -> Result<bool, RpcError> {
        self.record(RobotCall::IsMotionComplete).await?;
        let seen = self.polls_seen.fetch_add(1, Ordering::SeqCst);
        Ok(seen >= self.busy_polls)
    }

    async fn power_status(&self) -> Result<PowerStatus, RpcError> {
        self.record(RobotCall::PowerStatus).await?;
        Ok(GetPowerStatusResponse {
            battery_voltage_mv: 7400,
            is_charging: false,
        })
    }

    async fn button_state(&self) -> Result<ButtonState, RpcError> {
        self.record(RobotCall::ButtonState).await?;
        Ok(GetButtonStateResponse::default())
    }

    async fn set_collision_detection(&self, enabled: bool) -> Result<(), RpcError> {
        self.record(RobotCall::SetCollisionDetection(enabled)).await
    }

    async fn set_mouth_led_voice_sync(&self, enabled: bool) -> Result<(), RpcError> {
        self.record(RobotCall::SetMouthLedVoiceSync(enabled)).await
    }
}

#[async_trait]
impl PlaybackService for ScriptedRobot {
    async fn play_audio(
        &self,
        audio: Vec<u8>,
        wait_for_completion: bool,
    ) -> Result<PlaybackStarted, RpcError> {
        self.record(RobotCall::PlayAudio {
            bytes: audio.len(),
            wait_for_completion,
        })
        .await?;
        Ok(PlayAudioResponse {
            success: true,
            playback_id: "playback-1".to_string(),
        })
    }

    async fn play_local_audio(
        &self,
        path: &str,
        wait_for_completion: bool,
    ) -> Result<PlaybackStarted, RpcError> {
        self.record(RobotCall::PlayLocalAudio {
            path: path.to_string(),
            wait_for_completion,
        })
        .await?;
        Ok(PlayAudioResponse {
            success: true,
            playback_id: "playback-local".to_string(),
        })
    }

    async fn stop_audio(&self, playback_id: Option<&str>) -> Result<(), RpcError> {
        self.record(RobotCall::StopAudio(playback_id.map(str::to_string)))
            .await
    }

    async fn is_audio_playing(&self, playback_id: Option<&str>) -> Result<bool, RpcError> {
        self.record(RobotCall::IsAudioPlaying(playback_id.map(str::to_string)))
            .await?;
        Ok(self.audio_playing)
    }
}

#[async_trait]
impl RecordingService for ScriptedRobot {
    async fn start_recording(&self, duration_ms: i32) -> Result<bool, RpcError> {
        self.record(RobotCall::StartRecording(duration_ms)).await?;
        Ok(true)
    }

    async fn stop_recording(&self) -> Result<Vec<u8>, RpcError> {
        self.record(RobotCall::StopRecording).await?;
        Ok(self.recorded_audio.clone())
    }

    async fn is_recording(&self) -> Result<bool, RpcError> {
        self.record(RobotCall::IsRecording).await?;
        Ok(false)
    }
}

#[async_trait]
impl TextToSpeechService for ScriptedRobot {
    async fn synthesize(
        &self,
        text: &str,
        config: Option<SpeechConfig>,
    ) -> Result<Vec<u8>, RpcError> {
        self.record(RobotCall::Synthesize {
            text: text.to_string(),
            config,
        })
        .await?;
        Ok(self.tts_audio.clone())
    }
}

#[async_trait]
impl SpeechRecognitionService for ScriptedRobot {
    async fn recognize(&self, timeout_ms: i32) -> Result<RecognitionResult, RpcError> {
        self.record(RobotCall::Recognize { timeout_ms }).await?;
        Ok(self.recognition.clone())
    }

    async fn recognize_yes_or_no(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<YesNoAnswer, RpcError> {
        self.record(RobotCall::RecognizeYesOrNo {
            timeout_ms,
            retry_count,
        })
        .await?;
        Ok(YesNoAnswer::Yes)
    }

    async fn recognize_name(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Option<String>, RpcError> {
        self.record(RobotCall::RecognizeName {
            timeout_ms,
            retry_count,
        })
        .await?;
        Ok(Some("そーた".to_string()))
    }

    async fn recognize_names(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Vec<String>, RpcError> {
        self.record(RobotCall::RecognizeNames {
            timeout_ms,
            retry_count,
        })
        .await?;
        Ok(vec!["そーた".to_string(), "そうた".to_string()])
    }

    async fn recognize_general_response(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Option<String>, RpcError> {
        self.record(RobotCall::RecognizeGeneralResponse {
            timeout_ms,
            retry_count,
        })
        .await?;
        Ok(None)
    }
}
