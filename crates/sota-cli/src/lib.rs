//! Argument parsing and target resolution for `sota-connection-test`.

pub mod args;
pub mod target;

pub use args::{Cli, RecognizeArg};
pub use target::{Target, TargetError};
