//! Per-step outcomes of one connection test run.

use serde::{Deserialize, Serialize};
use sota_types::RpcError;
use std::fmt;

/// Steps in the order the driver runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PowerStatus,
    ButtonState,
    CurrentPose,
    Motion,
    Synthesis,
    Playback,
    LocalAudio,
    Recording,
    Recognition,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::PowerStatus => "power_status",
            Step::ButtonState => "button_state",
            Step::CurrentPose => "current_pose",
            Step::Motion => "motion",
            Step::Synthesis => "synthesis",
            Step::Playback => "playback",
            Step::LocalAudio => "local_audio",
            Step::Recording => "recording",
            Step::Recognition => "recognition",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum StepOutcome {
    Passed { detail: String },
    Failed { error: String },
    /// Not attempted because an input it depends on is missing.
    Skipped { reason: String },
}

impl StepOutcome {
    pub fn passed(detail: impl Into<String>) -> Self {
        StepOutcome::Passed {
            detail: detail.into(),
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        StepOutcome::Failed {
            error: error.into(),
        }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        StepOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, StepOutcome::Passed { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, StepOutcome::Failed { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, StepOutcome::Skipped { .. })
    }
}

impl From<RpcError> for StepOutcome {
    fn from(err: RpcError) -> Self {
        StepOutcome::failed(err.to_string())
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Passed { detail } => write!(f, "passed: {}", detail),
            StepOutcome::Failed { error } => write!(f, "FAILED: {}", error),
            StepOutcome::Skipped { reason } => write!(f, "skipped: {}", reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    pub step: Step,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// `host:port` the run talked to.
    pub target: String,
    pub started_at: String,
    pub finished_at: String,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    /// Outcome of `step`, if it ran or was skipped.
    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|r| r.step == step)
            .map(|r| &r.outcome)
    }

    pub fn failures(&self) -> usize {
        self.steps.iter().filter(|r| r.outcome.is_failed()).count()
    }
}
