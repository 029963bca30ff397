//! Workflow checkpoints and their status.
//!
//! Both pipelines walk the same six steps. Each step's status is tracked on
//! its own, so a later success never hides an earlier error.

use serde::Serialize;

use crate::domain::error::WorkflowError;

/// Which pipeline is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Connect,
    Disconnect,
}

/// Named checkpoint of the connect/disconnect pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    CheckCredentials,
    CheckWorkstationData,
    CertificateRetrieval,
    Link,
    Register,
    Clean,
}

impl Step {
    /// All steps, in execution order.
    pub const ALL: [Step; 6] = [
        Step::CheckCredentials,
        Step::CheckWorkstationData,
        Step::CertificateRetrieval,
        Step::Link,
        Step::Register,
        Step::Clean,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Human-readable label. `Link` and `Register` depend on direction.
    #[must_use]
    pub fn label(self, direction: Direction) -> &'static str {
        match (self, direction) {
            (Step::CheckCredentials, _) => "Check GECOS credentials",
            (Step::CheckWorkstationData, _) => "Check workstation data",
            (Step::CertificateRetrieval, _) => "Retrieve Chef validation certificate",
            (Step::Link, Direction::Connect) => "Link to Chef",
            (Step::Link, Direction::Disconnect) => "Unlink from Chef",
            (Step::Register, Direction::Connect) => "Register in GECOS CC",
            (Step::Register, Direction::Disconnect) => "Unregister from GECOS CC",
            (Step::Clean, _) => "Clean setup files",
        }
    }
}

/// Status of one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    #[default]
    Pending,
    InProgress,
    Done,
    Error,
    Canceled,
}

/// Per-step status table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepBoard {
    statuses: [StepStatus; 6],
}

impl StepBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, step: Step, status: StepStatus) {
        self.statuses[step.index()] = status;
    }

    #[must_use]
    pub fn status(&self, step: Step) -> StepStatus {
        self.statuses[step.index()]
    }

    /// `(step, status)` pairs in execution order.
    pub fn entries(&self) -> impl Iterator<Item = (Step, StepStatus)> + '_ {
        Step::ALL.iter().map(|&s| (s, self.status(s)))
    }

    /// First step marked [`StepStatus::Error`], if any.
    #[must_use]
    pub fn first_error(&self) -> Option<Step> {
        self.entries()
            .find(|(_, st)| *st == StepStatus::Error)
            .map(|(s, _)| s)
    }

    /// `true` when every step finished with [`StepStatus::Done`].
    #[must_use]
    pub fn all_done(&self) -> bool {
        self.statuses.iter().all(|s| *s == StepStatus::Done)
    }
}

/// How a pipeline ended.
#[derive(Debug)]
pub enum Outcome {
    Success,
    Failed { step: Step, error: WorkflowError },
    Canceled { step: Step },
}

/// Final state of a connect/disconnect run.
#[derive(Debug)]
pub struct PipelineReport {
    pub direction: Direction,
    pub board: StepBoard,
    pub outcome: Outcome,
    /// Node name used (derived or supplied), when validation got that far.
    pub node_name: Option<String>,
}

impl PipelineReport {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }

    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self.outcome, Outcome::Canceled { .. })
    }

    /// Error of a failed run.
    #[must_use]
    pub fn error(&self) -> Option<&WorkflowError> {
        match &self.outcome {
            Outcome::Failed { error, .. } => Some(error),
            _ => None,
        }
    }
}
