//! Client for `sotagrpc.v1.robotlib.MotionService`.

use crate::channel::MAX_MESSAGE_SIZE;
use async_trait::async_trait;
use sota_types::robotlib::motion_service_client::MotionServiceClient;
use sota_types::robotlib::*;
use sota_types::{ButtonState, MotionService, PowerStatus, RpcError};
use tonic::transport::Channel;

/// Motion service stub over a shared channel. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct MotionClient {
    inner: MotionServiceClient<Channel>,
}

impl MotionClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: MotionServiceClient::new(channel)
                .max_decoding_message_size(MAX_MESSAGE_SIZE)
                .max_encoding_message_size(MAX_MESSAGE_SIZE),
        }
    }
}

#[async_trait]
impl MotionService for MotionClient {
    async fn servo_on(&self) -> Result<(), RpcError> {
        self.inner.clone().servo_on(ServoOnRequest {}).await?;
        Ok(())
    }

    async fn servo_off(&self) -> Result<(), RpcError> {
        self.inner.clone().servo_off(ServoOffRequest {}).await?;
        Ok(())
    }

    async fn play_pose(&self, pose: &Pose, time_ms: i32) -> Result<bool, RpcError> {
        let request = PlayPoseRequest {
            pose: Some(pose.clone()),
            time_ms,
        };
        let response = self.inner.clone().play_pose(request).await?;
        Ok(response.into_inner().success)
    }

    async fn current_pose(&self) -> Result<Pose, RpcError> {
        let response = self
            .inner
            .clone()
            .get_current_pose(GetCurrentPoseRequest {})
            .await?;
        Ok(response.into_inner())
    }

    async fn is_motion_complete(&self) -> Result<bool, RpcError> {
        let response = self
            .inner
            .clone()
            .is_end_inter_all(IsEndInterAllRequest {})
            .await?;
        Ok(response.into_inner().is_end_inter_all)
    }

    async fn power_status(&self) -> Result<PowerStatus, RpcError> {
        let response = self
            .inner
            .clone()
            .get_power_status(GetPowerStatusRequest {})
            .await?;
        Ok(response.into_inner())
    }

    async fn button_state(&self) -> Result<ButtonState, RpcError> {
        let response = self
            .inner
            .clone()
            .get_button_state(GetButtonStateRequest {})
            .await?;
        Ok(response.into_inner())
    }

    async fn set_collision_detection(&self, enabled: bool) -> Result<(), RpcError> {
        let mut client = self.inner.clone();
        if enabled {
            client
                .enable_collision_detection(EnableCollisionDetectionRequest {})
                .await?;
        } else {
            client
                .disable_collision_detection(DisableCollisionDetectionRequest {})
                .await?;
        }
        Ok(())
    }

    async fn set_mouth_led_voice_sync(&self, enabled: bool) -> Result<(), RpcError> {
        self.inner
            .clone()
            .set_mouth_led_voice_sync(SetMouthLedVoiceSyncRequest { enabled })
            .await?;
        Ok(())
    }
}
