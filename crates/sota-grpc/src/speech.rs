//! Clients for `TextToSpeechService` and `SpeechRecognitionService` (package `sotagrpc.v1.sotatalk`).

use crate::channel::MAX_MESSAGE_SIZE;
use async_trait::async_trait;
use sota_types::sotatalk::speech_recognition_service_client::SpeechRecognitionServiceClient;
use sota_types::sotatalk::text_to_speech_service_client::TextToSpeechServiceClient;
use sota_types::sotatalk::*;
use sota_types::{RpcError, SpeechRecognitionService, TextToSpeechService};
use tonic::transport::Channel;

#[derive(Debug, Clone)]
pub struct TextToSpeechClient {
    inner: TextToSpeechServiceClient<Channel>,
}

impl TextToSpeechClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: TextToSpeechServiceClient::new(channel)
                .max_decoding_message_size(MAX_MESSAGE_SIZE)
                .max_encoding_message_size(MAX_MESSAGE_SIZE),
        }
    }
}

#[async_trait]
impl TextToSpeechService for TextToSpeechClient {
    async fn synthesize(
        &self,
        text: &str,
        config: Option<SpeechConfig>,
    ) -> Result<Vec<u8>, RpcError> {
        let request = TtsDataRequest {
            text: text.to_string(),
            config,
        };
        let response = self.inner.clone().get_tts_data(request).await?;
        Ok(response.into_inner().audio_data)
    }
}

#[derive(Debug, Clone)]
pub struct SpeechRecognitionClient {
    inner: SpeechRecognitionServiceClient<Channel>,
}

impl SpeechRecognitionClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: SpeechRecognitionServiceClient::new(channel)
                .max_decoding_message_size(MAX_MESSAGE_SIZE)
                .max_encoding_message_size(MAX_MESSAGE_SIZE),
        }
    }
}

#[async_trait]
impl SpeechRecognitionService for SpeechRecognitionClient {
    async fn recognize(&self, timeout_ms: i32) -> Result<RecognitionResult, RpcError> {
        let response = self
            .inner
            .clone()
            .recognize(RecognizeRequest { timeout_ms })
            .await?;
        Ok(response.into_inner())
    }

    async fn recognize_yes_or_no(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<YesNoAnswer, RpcError> {
        let request = RecognizeYesOrNoRequest {
            timeout_ms,
            retry_count,
        };
        let response = self.inner.clone().recognize_yes_or_no(request).await?;
        // Unknown enum values read as UNSPECIFIED.
        Ok(response.into_inner().answer())
    }

    async fn recognize_name(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Option<String>, RpcError> {
        let request = RecognizeNameRequest {
            timeout_ms,
            retry_count,
        };
        let response = self.inner.clone().recognize_name(request).await?;
        Ok(response.into_inner().name)
    }

    async fn recognize_names(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Vec<String>, RpcError> {
        let request = RecognizeNamesRequest {
            timeout_ms,
            retry_count,
        };
        let response = self.inner.clone().recognize_names(request).await?;
        Ok(response.into_inner().names)
    }

    async fn recognize_general_response(
        &self,
        timeout_ms: i32,
        retry_count: i32,
    ) -> Result<Option<String>, RpcError> {
        let request = RecognizeGeneralResponseRequest {
            timeout_ms,
            retry_count,
        };
        let response = self
            .inner
            .clone()
            .recognize_general_response(request)
            .await?;
        Ok(response.into_inner().response)
    }
}
