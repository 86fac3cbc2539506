//! The pose sequence played by the motion step.

use sota_types::{Color, LedState, Pose, ServoId, MOUTH_FULL_BRIGHTNESS};
use std::time::Duration;

/// One `PlayPose` call and how long the body needs to finish it.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionStep {
    pub label: &'static str,
    pub pose: Pose,
    /// Interpolation time sent to the robot.
    pub time_ms: i32,
    /// Pause after the call before the next one is issued.
    pub settle: Duration,
}

/// Arms up, head reset with white LEDs, head tilt, head reset.
pub fn greeting_sequence() -> Vec<MotionStep> {
    vec![
        MotionStep {
            label: "banzai",
            pose: Pose::from_angles([
                (ServoId::BodyY, 0),
                (ServoId::LShoulder, -900),
                (ServoId::LElbow, 0),
                (ServoId::RShoulder, 900),
                (ServoId::RElbow, 0),
                (ServoId::HeadY, 0),
                (ServoId::HeadP, 0),
                (ServoId::HeadR, 0),
            ]),
            time_ms: 1000,
            settle: Duration::from_secs(1),
        },
        MotionStep {
            label: "reset",
            pose: Pose::from_angles([(ServoId::HeadR, 0)])
                .with_led(LedState::uniform(Color::WHITE, MOUTH_FULL_BRIGHTNESS)),
            time_ms: 1000,
            settle: Duration::from_secs(1),
        },
        MotionStep {
            label: "tilt",
            pose: Pose::from_angles([(ServoId::HeadR, -200)]),
            time_ms: 500,
            settle: Duration::from_millis(500),
        },
        MotionStep {
            label: "reset",
            pose: Pose::from_angles([(ServoId::HeadR, 0)]),
            time_ms: 1000,
            settle: Duration::from_secs(2),
        },
    ]
}
