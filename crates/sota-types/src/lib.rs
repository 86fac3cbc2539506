//! Message types and service traits for the Sota robot gRPC contract.
//!
//! `robotlib` and `sotatalk` are generated at build time from the proto
//! packages under `proto/sotagrpc/v1`.

pub mod robotlib {
    tonic::include_proto!("sotagrpc.v1.robotlib");
}

pub mod sotatalk {
    tonic::include_proto!("sotagrpc.v1.sotatalk");
}

mod pose;
mod traits;

pub use pose::MOUTH_FULL_BRIGHTNESS;
pub use robotlib::{Color, LedState, Pose, Servo, ServoId};
pub use sotatalk::{RecognitionResult, Sentence, SpeechConfig, Word, YesNoAnswer};
pub use traits::*;
