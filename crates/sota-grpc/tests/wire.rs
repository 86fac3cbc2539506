//! Clients against an in-process tonic server built from the same protos.

use sota_grpc::{connect_lazy, RobotClients, RpcError};
use sota_types::robotlib::motion_service_server::{self as motion, MotionServiceServer};
use sota_types::robotlib::playback_service_server::{self as playback, PlaybackServiceServer};
use sota_types::robotlib::recording_service_server::{self as recording, RecordingServiceServer};
use sota_types::robotlib::*;
use sota_types::sotatalk::speech_recognition_service_server::{
    self as recognition, SpeechRecognitionServiceServer,
};
use sota_types::sotatalk::text_to_speech_service_client::TextToSpeechServiceClient;
use sota_types::sotatalk::text_to_speech_service_server::{self as tts, TextToSpeechServiceServer};
use sota_types::sotatalk::*;
use sota_types::{
    MotionService, PlaybackService, RecordingService, SpeechRecognitionService,
    TextToSpeechService, MOUTH_FULL_BRIGHTNESS,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// Larger than tonic's 4 MiB default decode limit.
const TTS_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq)]
enum Received {
    Call(&'static str),
    PlayPose(PlayPoseRequest),
    MouthSync(bool),
    PlayAudio {
        bytes: usize,
        wait_for_completion: Option<bool>,
        save_file: Option<bool>,
    },
    PlayLocalAudio(PlayLocalAudioRequest),
    StopAudio(Option<String>),
    IsAudioPlaying(Option<String>),
    StartRecording(i32),
    Tts(TtsDataRequest),
    Recognition {
        rpc: &'static str,
        timeout_ms: i32,
        retry_count: i32,
    },
}

#[derive(Default)]
struct FakeRobot {
    received: Mutex<Vec<Received>>,
}

impl FakeRobot {
    async fn push(&self, received: Received) {
        self.received.lock().await.push(received);
    }

    async fn received(&self) -> Vec<Received> {
        self.received.lock().await.clone()
    }
}

#[tonic::async_trait]
impl motion::MotionService for FakeRobot {
    async fn servo_on(
        &self,
        _: Request<ServoOnRequest>,
    ) -> Result<Response<ServoOnResponse>, Status> {
        self.push(Received::Call("ServoOn")).await;
        Ok(Response::new(ServoOnResponse {}))
    }

    async fn servo_off(
        &self,
        _: Request<ServoOffRequest>,
    ) -> Result<Response<ServoOffResponse>, Status> {
        self.push(Received::Call("ServoOff")).await;
        Ok(Response::new(ServoOffResponse {}))
    }

    async fn play_pose(
        &self,
        request: Request<PlayPoseRequest>,
    ) -> Result<Response<PlayPoseResponse>, Status> {
        self.push(Received::PlayPose(request.into_inner())).await;
        Ok(Response::new(PlayPoseResponse { success: true }))
    }

    async fn get_current_pose(
        &self,
        _: Request<GetCurrentPoseRequest>,
    ) -> Result<Response<Pose>, Status> {
        self.push(Received::Call("GetCurrentPose")).await;
        Ok(Response::new(Pose::from_angles([(ServoId::HeadR, -200)])))
    }

    async fn is_end_inter_all(
        &self,
        _: Request<IsEndInterAllRequest>,
    ) -> Result<Response<IsEndInterAllResponse>, Status> {
        self.push(Received::Call("IsEndInterAll")).await;
        Ok(Response::new(IsEndInterAllResponse {
            is_end_inter_all: true,
        }))
    }

    async fn get_power_status(
        &self,
        _: Request<GetPowerStatusRequest>,
    ) -> Result<Response<GetPowerStatusResponse>, Status> {
        self.push(Received::Call("GetPowerStatus")).await;
        Ok(Response::new(GetPowerStatusResponse {
            battery_voltage_mv: 7250,
            is_charging: true,
        }))
    }

    async fn get_button_state(
        &self,
        _: Request<GetButtonStateRequest>,
    ) -> Result<Response<GetButtonStateResponse>, Status> {
        self.push(Received::Call("GetButtonState")).await;
        Err(Status::internal("Failed to read button state."))
    }

    async fn enable_collision_detection(
        &self,
        _: Request<EnableCollisionDetectionRequest>,
    ) -> Result<Response<EnableCollisionDetectionResponse>, Status> {
        self.push(Received::Call("EnableCollisionDetection")).await;
        Ok(Response::new(EnableCollisionDetectionResponse {}))
    }

    async fn disable_collision_detection(
        &self,
        _: Request<DisableCollisionDetectionRequest>,
    ) -> Result<Response<DisableCollisionDetectionResponse>, Status> {
        self.push(Received::Call("DisableCollisionDetection")).await;
        Ok(Response::new(DisableCollisionDetectionResponse {}))
    }

    async fn set_mouth_led_voice_sync(
        &self,
        request: Request<SetMouthLedVoiceSyncRequest>,
    ) -> Result<Response<SetMouthLedVoiceSyncResponse>, Status> {
        self.push(Received::MouthSync(request.into_inner().enabled))
            .await;
        Ok(Response::new(SetMouthLedVoiceSyncResponse {}))
    }
}

#[tonic::async_trait]
impl playback::PlaybackService for FakeRobot {
    async fn play_audio(
        &self,
        request: Request<PlayAudioRequest>,
    ) -> Result<Response<PlayAudioResponse>, Status> {
        let request = request.into_inner();
        self.push(Received::PlayAudio {
            bytes: request.audio_data.len(),
            wait_for_completion: request.wait_for_completion,
            save_file: request.save_file,
        })
        .await;
        Ok(Response::new(PlayAudioResponse {
            success: true,
            playback_id: "pb-1".to_string(),
        }))
    }

    async fn play_local_audio(
        &self,
        request: Request<PlayLocalAudioRequest>,
    ) -> Result<Response<PlayAudioResponse>, Status> {
        self.push(Received::PlayLocalAudio(request.into_inner())).await;
        Ok(Response::new(PlayAudioResponse {
            success: true,
            playback_id: "pb-2".to_string(),
        }))
    }

    async fn stop_audio(
        &self,
        request: Request<StopAudioRequest>,
    ) -> Result<Response<StopAudioResponse>, Status> {
        self.push(Received::StopAudio(request.into_inner().playback_id))
            .await;
        Ok(Response::new(StopAudioResponse {}))
    }

    async fn is_audio_playing(
        &self,
        request: Request<IsAudioPlayingRequest>,
    ) -> Result<Response<IsAudioPlayingResponse>, Status> {
        self.push(Received::IsAudioPlaying(request.into_inner().playback_id))
            .await;
        Ok(Response::new(IsAudioPlayingResponse { is_playing: true }))
    }
}

#[tonic::async_trait]
impl recording::RecordingService for FakeRobot {
    async fn start_recording(
        &self,
        request: Request<StartRecordingRequest>,
    ) -> Result<Response<StartRecordingResponse>, Status> {
        self.push(Received::StartRecording(request.into_inner().duration_ms))
            .await;
        Ok(Response::new(StartRecordingResponse { success: true }))
    }

    async fn stop_recording(
        &self,
        _: Request<StopRecordingRequest>,
    ) -> Result<Response<StopRecordingResponse>, Status> {
        self.push(Received::Call("StopRecording")).await;
        Ok(Response::new(StopRecordingResponse {
            audio_data: b"RIFF".to_vec(),
        }))
    }

    async fn is_recording(
        &self,
        _: Request<IsRecordingRequest>,
    ) -> Result<Response<IsRecordingResponse>, Status> {
        self.push(Received::Call("IsRecording")).await;
        Ok(Response::new(IsRecordingResponse { is_recording: true }))
    }
}

#[tonic::async_trait]
impl tts::TextToSpeechService for FakeRobot {
    async fn get_tts_data(
        &self,
        request: Request<TtsDataRequest>,
    ) -> Result<Response<GetTtsDataResponse>, Status> {
        self.push(Received::Tts(request.into_inner())).await;
        Ok(Response::new(GetTtsDataResponse {
            audio_data: vec![0x52; TTS_BYTES],
        }))
    }
}

#[tonic::async_trait]
impl recognition::SpeechRecognitionService for FakeRobot {
    async fn recognize(
        &self,
        request: Request<RecognizeRequest>,
    ) -> Result<Response<RecognitionResult>, Status> {
        self.push(Received::Recognition {
            rpc: "Recognize",
            timeout_ms: request.into_inner().timeout_ms,
            retry_count: 0,
        })
        .await;
        Ok(Response::new(RecognitionResult {
            recognized: false,
            basic_result: String::new(),
            sentence_list: vec![],
        }))
    }

    async fn recognize_yes_or_no(
        &self,
        request: Request<RecognizeYesOrNoRequest>,
    ) -> Result<Response<RecognizeYesOrNoResponse>, Status> {
        let request = request.into_inner();
        self.push(Received::Recognition {
            rpc: "RecognizeYesOrNo",
            timeout_ms: request.timeout_ms,
            retry_count: request.retry_count,
        })
        .await;
        Ok(Response::new(RecognizeYesOrNoResponse {
            answer: YesNoAnswer::No as i32,
        }))
    }

    async fn recognize_name(
        &self,
        request: Request<RecognizeNameRequest>,
    ) -> Result<Response<RecognizeNameResponse>, Status> {
        let request = request.into_inner();
        self.push(Received::Recognition {
            rpc: "RecognizeName",
            timeout_ms: request.timeout_ms,
            retry_count: request.retry_count,
        })
        .await;
        Ok(Response::new(RecognizeNameResponse { name: None }))
    }

    async fn recognize_names(
        &self,
        request: Request<RecognizeNamesRequest>,
    ) -> Result<Response<RecognizeNamesResponse>, Status> {
        let request = request.into_inner();
        self.push(Received::Recognition {
            rpc: "RecognizeNames",
            timeout_ms: request.timeout_ms,
            retry_count: request.retry_count,
        })
        .await;
        Ok(Response::new(RecognizeNamesResponse {
            names: vec!["たろう".to_string()],
        }))
    }

    async fn recognize_general_response(
        &self,
        request: Request<RecognizeGeneralResponseRequest>,
    ) -> Result<Response<RecognizeGeneralResponseResponse>, Status> {
        let request = request.into_inner();
        self.push(Received::Recognition {
            rpc: "RecognizeGeneralResponse",
            timeout_ms: request.timeout_ms,
            retry_count: request.retry_count,
        })
        .await;
        Ok(Response::new(RecognizeGeneralResponseResponse {
            response: Some("はい".to_string()),
        }))
    }
}

/// Serve `robot` on an ephemeral local port; returns the port.
async fn serve(robot: Arc<FakeRobot>) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(
        Server::builder()
            .add_service(MotionServiceServer::from_arc(robot.clone()))
            .add_service(PlaybackServiceServer::from_arc(robot.clone()))
            .add_service(RecordingServiceServer::from_arc(robot.clone()))
            .add_service(TextToSpeechServiceServer::from_arc(robot.clone()))
            .add_service(SpeechRecognitionServiceServer::from_arc(robot))
            .serve_with_incoming(TcpListenerStream::new(listener)),
    );
    port
}

async fn connect() -> (Arc<FakeRobot>, RobotClients) {
    let robot = Arc::new(FakeRobot::default());
    let port = serve(robot.clone()).await;
    (robot, RobotClients::connect("127.0.0.1", port).unwrap())
}

#[tokio::test]
async fn motion_requests_reach_the_robot() {
    let (robot, clients) = connect().await;
    let pose = Pose::from_angles([(ServoId::HeadR, 0)])
        .with_led(LedState::uniform(Color::WHITE, MOUTH_FULL_BRIGHTNESS));

    clients.motion.servo_on().await.unwrap();
    assert!(clients.motion.play_pose(&pose, 1000).await.unwrap());
    assert!(clients.motion.is_motion_complete().await.unwrap());
    clients.motion.set_collision_detection(true).await.unwrap();
    clients.motion.set_collision_detection(false).await.unwrap();
    clients.motion.set_mouth_led_voice_sync(true).await.unwrap();
    let current = clients.motion.current_pose().await.unwrap();
    let power = clients.motion.power_status().await.unwrap();
    clients.motion.servo_off().await.unwrap();

    assert_eq!(current.angle_of(ServoId::HeadR), Some(-200));
    assert_eq!(power.battery_voltage_mv, 7250);
    assert!(power.is_charging);
    assert_eq!(
        robot.received().await,
        vec![
            Received::Call("ServoOn"),
            Received::PlayPose(PlayPoseRequest {
                pose: Some(pose),
                time_ms: 1000,
            }),
            Received::Call("IsEndInterAll"),
            Received::Call("EnableCollisionDetection"),
            Received::Call("DisableCollisionDetection"),
            Received::MouthSync(true),
            Received::Call("GetCurrentPose"),
            Received::Call("GetPowerStatus"),
            Received::Call("ServoOff"),
        ]
    );
}

#[tokio::test]
async fn robot_status_errors_keep_code_and_message() {
    let (_, clients) = connect().await;
    let err = clients.motion.button_state().await.unwrap_err();
    assert_eq!(
        err,
        RpcError::status("Internal", "Failed to read button state.")
    );
}

#[tokio::test]
async fn playback_requests_carry_their_options() {
    let (robot, clients) = connect().await;

    let started = clients.playback.play_audio(vec![1, 2, 3], true).await.unwrap();
    assert!(started.success);
    assert_eq!(started.playback_id, "pb-1");
    let local = clients
        .playback
        .play_local_audio("/home/root/sound/hello.wav", true)
        .await
        .unwrap();
    assert_eq!(local.playback_id, "pb-2");
    assert!(clients.playback.is_audio_playing(Some("pb-2")).await.unwrap());
    clients.playback.stop_audio(Some("pb-2")).await.unwrap();
    clients.playback.stop_audio(None).await.unwrap();

    assert_eq!(
        robot.received().await,
        vec![
            Received::PlayAudio {
                bytes: 3,
                wait_for_completion: Some(true),
                save_file: None,
            },
            Received::PlayLocalAudio(PlayLocalAudioRequest {
                local_filepath: "/home/root/sound/hello.wav".to_string(),
                wait_for_completion: Some(true),
            }),
            Received::IsAudioPlaying(Some("pb-2".to_string())),
            Received::StopAudio(Some("pb-2".to_string())),
            Received::StopAudio(None),
        ]
    );
}

#[tokio::test]
async fn recording_round_trip() {
    let (robot, clients) = connect().await;

    assert!(clients.recording.start_recording(3000).await.unwrap());
    assert!(clients.recording.is_recording().await.unwrap());
    assert_eq!(clients.recording.stop_recording().await.unwrap(), b"RIFF".to_vec());

    assert_eq!(
        robot.received().await,
        vec![
            Received::StartRecording(3000),
            Received::Call("IsRecording"),
            Received::Call("StopRecording"),
        ]
    );
}

#[tokio::test]
async fn synthesized_audio_above_default_limit_is_received() {
    let (robot, clients) = connect().await;

    let audio = clients
        .tts
        .synthesize("こんにちは", Some(SpeechConfig::new(8, 8, 8)))
        .await
        .unwrap();
    assert_eq!(audio.len(), TTS_BYTES);
    assert_eq!(
        robot.received().await,
        vec![Received::Tts(TtsDataRequest {
            text: "こんにちは".to_string(),
            config: Some(SpeechConfig::new(8, 8, 8)),
        })]
    );
}

#[tokio::test]
async fn default_decode_limit_rejects_synthesized_audio() {
    let robot = Arc::new(FakeRobot::default());
    let port = serve(robot).await;
    let mut stock = TextToSpeechServiceClient::new(connect_lazy("127.0.0.1", port).unwrap());

    let status = stock
        .get_tts_data(TtsDataRequest {
            text: "こんにちは".to_string(),
            config: None,
        })
        .await
        .unwrap_err();
    assert_eq!(status.code(), tonic::Code::OutOfRange);
}

#[tokio::test]
async fn recognition_requests_and_answers() {
    let (robot, clients) = connect().await;
    let recognizer = &clients.recognition;

    let free = recognizer.recognize(10_000).await.unwrap();
    assert!(!free.recognized);
    assert!(free.candidates().is_empty());
    assert_eq!(
        recognizer.recognize_yes_or_no(10_000, 2).await.unwrap(),
        YesNoAnswer::No
    );
    assert_eq!(recognizer.recognize_name(10_000, 1).await.unwrap(), None);
    assert_eq!(
        recognizer.recognize_names(10_000, 1).await.unwrap(),
        vec!["たろう".to_string()]
    );
    assert_eq!(
        recognizer.recognize_general_response(5_000, 3).await.unwrap(),
        Some("はい".to_string())
    );

    let rpcs: Vec<_> = robot
        .received()
        .await
        .into_iter()
        .map(|r| match r {
            Received::Recognition {
                rpc,
                timeout_ms,
                retry_count,
            } => (rpc, timeout_ms, retry_count),
            other => panic!("unexpected call {:?}", other),
        })
        .collect();
    assert_eq!(
        rpcs,
        vec![
            ("Recognize", 10_000, 0),
            ("RecognizeYesOrNo", 10_000, 2),
            ("RecognizeName", 10_000, 1),
            ("RecognizeNames", 10_000, 1),
            ("RecognizeGeneralResponse", 5_000, 3),
        ]
    );
}
