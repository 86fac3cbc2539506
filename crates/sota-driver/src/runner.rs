//! The sequential connection test.

use crate::choreography::MotionStep;
use crate::config::{DriverConfig, MotionWait, RecognitionMode, POLL_GRACE};
use crate::report::{RunReport, Step, StepOutcome, StepReport};
use chrono::Utc;
use sota_types::*;
use std::sync::Arc;
use std::time::Duration;

/// The remote services one run talks to.
#[derive(Clone)]
pub struct RobotServices {
    pub motion: Arc<dyn MotionService>,
    pub playback: Arc<dyn PlaybackService>,
    pub recording: Arc<dyn RecordingService>,
    pub tts: Arc<dyn TextToSpeechService>,
    pub recognition: Arc<dyn SpeechRecognitionService>,
}

impl RobotServices {
    /// Use one object for every service (a client bundle or a test double).
    pub fn shared<R>(robot: Arc<R>) -> Self
    where
        R: MotionService
            + PlaybackService
            + RecordingService
            + TextToSpeechService
            + SpeechRecognitionService
            + 'static,
    {
        Self {
            motion: robot.clone(),
            playback: robot.clone(),
            recording: robot.clone(),
            tts: robot.clone(),
            recognition: robot,
        }
    }
}

/// Runs every step in a fixed order, one awaited call at a time.
///
/// A failed call ends only its own step. Steps that consume another step's
/// output (playback of synthesized audio) are skipped when that output is
/// missing or empty.
pub struct ConnectionTest {
    services: RobotServices,
    config: DriverConfig,
}

impl ConnectionTest {
    pub fn new(services: RobotServices, config: DriverConfig) -> Self {
        Self { services, config }
    }

    /// Run the whole sequence against `target` (used only for the report).
    pub async fn run(&self, target: &str) -> RunReport {
        let started_at = Utc::now().to_rfc3339();
        tracing::info!(%target, "starting connection test");
        let mut steps = Vec::new();

        if self.config.preflight {
            steps.extend(self.preflight().await);
        }

        steps.push(report(Step::Motion, self.motion_sequence().await));

        let (synthesis, audio) = self.synthesize().await;
        steps.push(report(Step::Synthesis, synthesis));
        steps.push(report(Step::Playback, self.play_synthesized(audio).await));

        if let Some(path) = &self.config.local_audio {
            steps.push(report(Step::LocalAudio, self.play_local_audio(path).await));
        }
        if let Some(duration_ms) = self.config.record_ms {
            steps.push(report(Step::Recording, self.record_and_play(duration_ms).await));
        }
        if let Some(mode) = self.config.recognition {
            steps.push(report(Step::Recognition, self.recognize(mode).await));
        }

        let report = RunReport {
            target: target.to_string(),
            started_at,
            finished_at: Utc::now().to_rfc3339(),
            steps,
        };
        tracing::info!(failures = report.failures(), "connection test finished");
        report
    }

    async fn preflight(&self) -> Vec<StepReport> {
        tracing::info!("--- Preflight: reading robot status ---");
        let motion = &self.services.motion;

        let power = match motion.power_status().await {
            Ok(status) => {
                tracing::info!(
                    battery_voltage_mv = status.battery_voltage_mv,
                    is_charging = status.is_charging,
                    "power status"
                );
                StepOutcome::passed(format!(
                    "battery {} mV, charging: {}",
                    status.battery_voltage_mv, status.is_charging
                ))
            }
            Err(e) => rpc_failure(Step::PowerStatus, e),
        };

        let buttons = match motion.button_state().await {
            Ok(state) => StepOutcome::passed(format!(
                "power: {}, vol+: {}, vol-: {}",
                state.is_power_pressed, state.is_vol_up_pressed, state.is_vol_down_pressed
            )),
            Err(e) => rpc_failure(Step::ButtonState, e),
        };

        let pose = match motion.current_pose().await {
            Ok(pose) => {
                let angles: Vec<String> = pose
                    .servos
                    .iter()
                    .map(|s| format!("{}={}", s.id().as_str_name(), s.angle))
                    .collect();
                StepOutcome::passed(angles.join(", "))
            }
            Err(e) => rpc_failure(Step::CurrentPose, e),
        };

        vec![
            report(Step::PowerStatus, power),
            report(Step::ButtonState, buttons),
            report(Step::CurrentPose, pose),
        ]
    }

    async fn motion_sequence(&self) -> StepOutcome {
        tracing::info!("--- Testing MotionService ---");
        match self.try_motion_sequence().await {
            Ok(played) => StepOutcome::passed(format!("{} poses played, servos off", played)),
            Err(e) => rpc_failure(Step::Motion, e),
        }
    }

    async fn try_motion_sequence(&self) -> Result<usize, RpcError> {
        let motion = &self.services.motion;

        tracing::info!("Calling ServoOn...");
        motion.servo_on().await?;
        tracing::info!("ServoOn successful.");

        for step in &self.config.choreography {
            tracing::info!(pose = step.label, time_ms = step.time_ms, "Calling PlayPose...");
            let success = motion.play_pose(&step.pose, step.time_ms).await?;
            if success {
                tracing::info!(pose = step.label, "PlayPose sent.");
            } else {
                tracing::warn!(pose = step.label, "robot rejected the pose");
            }
            self.settle(step).await;
        }

        tracing::info!("Calling ServoOff...");
        motion.servo_off().await?;
        tracing::info!("ServoOff successful.");
        Ok(self.config.choreography.len())
    }

    async fn settle(&self, step: &MotionStep) {
        match self.config.motion_wait {
            MotionWait::Sleep => tokio::time::sleep(step.settle).await,
            MotionWait::PollCompletion { interval } => {
                let limit = step.settle + POLL_GRACE;
                match tokio::time::timeout(limit, self.poll_until_complete(interval)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        tracing::warn!(
                            pose = step.label,
                            error = %e.details(),
                            "completion polling failed; waiting the fixed settle time"
                        );
                        tokio::time::sleep(step.settle).await;
                    }
                    Err(_) => {
                        tracing::warn!(pose = step.label, ?limit, "motion did not report completion");
                    }
                }
            }
        }
    }

    async fn poll_until_complete(&self, interval: Duration) -> Result<(), RpcError> {
        loop {
            if self.services.motion.is_motion_complete().await? {
                return Ok(());
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Returns the synthesized audio only when it is non-empty.
    async fn synthesize(&self) -> (StepOutcome, Option<Vec<u8>>) {
        tracing::info!("--- Testing TextToSpeechService ---");
        let text = &self.config.speech_text;
        tracing::info!(%text, "Calling GetTTSData...");
        match self
            .services
            .tts
            .synthesize(text, Some(self.config.speech_config.clone()))
            .await
        {
            Ok(audio) if !audio.is_empty() => {
                tracing::info!(bytes = audio.len(), "Synthesize successful.");
                let outcome =
                    StepOutcome::passed(format!("got {} bytes of audio data", audio.len()));
                (outcome, Some(audio))
            }
            Ok(_) => {
                tracing::warn!("Synthesize failed: no audio data returned");
                (StepOutcome::failed("synthesis returned no audio data"), None)
            }
            Err(e) => (rpc_failure(Step::Synthesis, e), None),
        }
    }

    async fn play_synthesized(&self, audio: Option<Vec<u8>>) -> StepOutcome {
        tracing::info!("--- Testing PlaybackService ---");
        let Some(audio) = audio else {
            tracing::warn!("No audio data received from TTS. Skipping playback.");
            return StepOutcome::skipped("no audio data received from TTS");
        };

        if self.config.mouth_led_voice_sync {
            if let Err(e) = self.services.motion.set_mouth_led_voice_sync(true).await {
                tracing::warn!(error = %e.details(), "could not enable mouth LED voice sync");
            }
        }

        tracing::info!(bytes = audio.len(), "Calling PlayAudio with synthesized data...");
        match self.services.playback.play_audio(audio, true).await {
            Ok(started) => playback_outcome(&started),
            Err(e) => rpc_failure(Step::Playback, e),
        }
    }

    async fn play_local_audio(&self, path: &str) -> StepOutcome {
        tracing::info!(%path, "Calling PlayLocalAudio...");
        match self.services.playback.play_local_audio(path, true).await {
            Ok(started) => {
                if started.success {
                    self.stop_if_still_playing(&started.playback_id).await;
                }
                playback_outcome(&started)
            }
            Err(e) => rpc_failure(Step::LocalAudio, e),
        }
    }

    /// A completed playback must not leave audio running into the next step.
    async fn stop_if_still_playing(&self, playback_id: &str) {
        let playback = &self.services.playback;
        match playback.is_audio_playing(Some(playback_id)).await {
            Ok(false) => {}
            Ok(true) => {
                tracing::warn!(%playback_id, "playback still running; stopping it");
                if let Err(e) = playback.stop_audio(Some(playback_id)).await {
                    tracing::warn!(%playback_id, error = %e.details(), "could not stop playback");
                }
            }
            Err(e) => {
                tracing::warn!(%playback_id, error = %e.details(), "could not query playback state");
            }
        }
    }

    async fn record_and_play(&self, duration_ms: i32) -> StepOutcome {
        tracing::info!("--- Testing RecordingService ---");
        match self.try_record_and_play(duration_ms).await {
            Ok(outcome) => outcome,
            Err(e) => rpc_failure(Step::Recording, e),
        }
    }

    async fn try_record_and_play(&self, duration_ms: i32) -> Result<StepOutcome, RpcError> {
        let recording = &self.services.recording;

        tracing::info!(duration_ms, "Calling StartRecording... please speak.");
        if !recording.start_recording(duration_ms).await? {
            return Ok(StepOutcome::failed("robot refused to start recording"));
        }
        let wait = Duration::from_millis(u64::try_from(duration_ms).unwrap_or(0));
        tokio::time::sleep(wait).await;

        match recording.is_recording().await {
            Ok(still_recording) => {
                tracing::info!(still_recording, "recording window elapsed; stopping");
            }
            Err(e) => tracing::warn!(error = %e.details(), "could not query recording state"),
        }
        let audio = recording.stop_recording().await?;
        if audio.is_empty() {
            tracing::warn!("No audio captured. Skipping playback of the recording.");
            return Ok(StepOutcome::failed("recording returned no audio data"));
        }
        tracing::info!(bytes = audio.len(), "Recording captured; playing it back...");
        let bytes = audio.len();
        let started = self.services.playback.play_audio(audio, true).await?;
        if started.success {
            Ok(StepOutcome::passed(format!(
                "captured {} bytes and played them back",
                bytes
            )))
        } else {
            Ok(StepOutcome::failed("robot reported playback failure"))
        }
    }

    async fn recognize(&self, mode: RecognitionMode) -> StepOutcome {
        tracing::info!("--- Testing SpeechRecognitionService ---");
        let recognition = &self.services.recognition;
        let timeout_ms = self.config.recognition_timeout_ms;
        let retries = self.config.recognition_retries;
        tracing::info!(?mode, timeout_ms, "Listening... please speak to the robot.");

        let result = match mode {
            RecognitionMode::Free => recognition.recognize(timeout_ms).await.map(|r| {
                format!(
                    "recognized={}, basic_result={:?}, sentences={:?}",
                    r.recognized,
                    r.basic_result,
                    r.candidates()
                )
            }),
            RecognitionMode::YesNo => recognition
                .recognize_yes_or_no(timeout_ms, retries)
                .await
                .map(|a| format!("answer={}", a.as_str_name())),
            RecognitionMode::Name => recognition
                .recognize_name(timeout_ms, retries)
                .await
                .map(|n| format!("name={:?}", n)),
            RecognitionMode::Names => recognition
                .recognize_names(timeout_ms, retries)
                .await
                .map(|n| format!("names={:?}", n)),
            RecognitionMode::Response => recognition
                .recognize_general_response(timeout_ms, retries)
                .await
                .map(|r| format!("response={:?}", r)),
        };

        match result {
            Ok(detail) => {
                tracing::info!(%detail, "recognition result");
                StepOutcome::passed(detail)
            }
            Err(e) => rpc_failure(Step::Recognition, e),
        }
    }
}

fn report(step: Step, outcome: StepOutcome) -> StepReport {
    StepReport { step, outcome }
}

fn rpc_failure(step: Step, err: RpcError) -> StepOutcome {
    tracing::error!(%step, details = %err.details(), "An RPC error occurred");
    err.into()
}

fn playback_outcome(started: &PlaybackStarted) -> StepOutcome {
    tracing::info!(
        success = started.success,
        playback_id = %started.playback_id,
        "PlayAudio returned"
    );
    if started.success {
        StepOutcome::passed(format!("playback {} finished", started.playback_id))
    } else {
        StepOutcome::failed("robot reported playback failure")
    }
}
