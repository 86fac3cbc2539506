//! Sequential connection test for a Sota robot's gRPC services.
//!
//! Order: (preflight) → motion → synthesis → playback of the synthesized
//! audio → (local audio) → (recording) → (recognition). Parenthesized steps
//! are off by default.

mod choreography;
mod config;
mod report;
mod runner;

pub use choreography::{greeting_sequence, MotionStep};
pub use config::{DriverConfig, MotionWait, RecognitionMode, POLL_GRACE, RECOGNITION_TIMEOUT_MS};
pub use report::{RunReport, Step, StepOutcome, StepReport};
pub use runner::{ConnectionTest, RobotServices};
