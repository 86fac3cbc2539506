//! Clients for `PlaybackService` and `RecordingService` (package `sotagrpc.v1.robotlib`).

use crate::channel::MAX_MESSAGE_SIZE;
use async_trait::async_trait;
use sota_types::robotlib::playback_service_client::PlaybackServiceClient;
use sota_types::robotlib::recording_service_client::RecordingServiceClient;
use sota_types::robotlib::*;
use sota_types::{PlaybackService, PlaybackStarted, RecordingService, RpcError};
use tonic::transport::Channel;

#[derive(Debug, Clone)]
pub struct PlaybackClient {
    inner: PlaybackServiceClient<Channel>,
}

impl PlaybackClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: PlaybackServiceClient::new(channel)
                .max_decoding_message_size(MAX_MESSAGE_SIZE)
                .max_encoding_message_size(MAX_MESSAGE_SIZE),
        }
    }
}

#[async_trait]
impl PlaybackService for PlaybackClient {
    async fn play_audio(
        &self,
        audio: Vec<u8>,
        wait_for_completion: bool,
    ) -> Result<PlaybackStarted, RpcError> {
        let request = PlayAudioRequest {
            audio_data: audio,
            wait_for_completion: Some(wait_for_completion),
            save_file: None,
        };
        Ok(self.inner.clone().play_audio(request).await?.into_inner())
    }

    async fn play_local_audio(
        &self,
        path: &str,
        wait_for_completion: bool,
    ) -> Result<PlaybackStarted, RpcError> {
        let request = PlayLocalAudioRequest {
            local_filepath: path.to_string(),
            wait_for_completion: Some(wait_for_completion),
        };
        Ok(self.inner.clone().play_local_audio(request).await?.into_inner())
    }

    async fn stop_audio(&self, playback_id: Option<&str>) -> Result<(), RpcError> {
        let request = StopAudioRequest {
            playback_id: playback_id.map(str::to_string),
        };
        self.inner.clone().stop_audio(request).await?;
        Ok(())
    }

    async fn is_audio_playing(&self, playback_id: Option<&str>) -> Result<bool, RpcError> {
        let request = IsAudioPlayingRequest {
            playback_id: playback_id.map(str::to_string),
        };
        let response = self.inner.clone().is_audio_playing(request).await?;
        Ok(response.into_inner().is_playing)
    }
}

#[derive(Debug, Clone)]
pub struct RecordingClient {
    inner: RecordingServiceClient<Channel>,
}

impl RecordingClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: RecordingServiceClient::new(channel)
                .max_decoding_message_size(MAX_MESSAGE_SIZE)
                .max_encoding_message_size(MAX_MESSAGE_SIZE),
        }
    }
}

#[async_trait]
impl RecordingService for RecordingClient {
    async fn start_recording(&self, duration_ms: i32) -> Result<bool, RpcError> {
        let response = self
            .inner
            .clone()
            .start_recording(StartRecordingRequest { duration_ms })
            .await?;
        Ok(response.into_inner().success)
    }

    async fn stop_recording(&self) -> Result<Vec<u8>, RpcError> {
        let response = self
            .inner
            .clone()
            .stop_recording(StopRecordingRequest {})
            .await?;
        Ok(response.into_inner().audio_data)
    }

    async fn is_recording(&self) -> Result<bool, RpcError> {
        let response = self
            .inner
            .clone()
            .is_recording(IsRecordingRequest {})
            .await?;
        Ok(response.into_inner().is_recording)
    }
}
