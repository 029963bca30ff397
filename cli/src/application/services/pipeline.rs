//! Step bookkeeping shared by the connect and disconnect workflows.
//!
//! `StepTracker` is the only writer of step status: it updates the
//! [`StepBoard`] and forwards every transition to the [`ProgressReporter`].

use tracing::{error, info, warn};

use crate::application::ports::ProgressReporter;
use crate::domain::error::{ConfigError, TemplateError, ValidationError, WorkflowError};
use crate::domain::step::{Direction, Outcome, PipelineReport, Step, StepBoard, StepStatus};

/// Why a pipeline stopped before the last step.
#[derive(Debug)]
pub(crate) enum Halt {
    Failed(WorkflowError),
    Canceled,
}

impl From<WorkflowError> for Halt {
    fn from(err: WorkflowError) -> Self {
        Halt::Failed(err)
    }
}

impl From<ValidationError> for Halt {
    fn from(err: ValidationError) -> Self {
        Halt::Failed(err.into())
    }
}

impl From<TemplateError> for Halt {
    fn from(err: TemplateError) -> Self {
        Halt::Failed(err.into())
    }
}

impl From<ConfigError> for Halt {
    fn from(err: ConfigError) -> Self {
        Halt::Failed(err.into())
    }
}

pub(crate) struct StepTracker<'r, R: ProgressReporter> {
    reporter: &'r R,
    direction: Direction,
    board: StepBoard,
    current: Option<Step>,
}

impl<'r, R: ProgressReporter> StepTracker<'r, R> {
    /// Announces direction-dependent labels and every step as pending.
    pub(crate) fn new(reporter: &'r R, direction: Direction) -> Self {
        reporter.set_link_label(Step::Link.label(direction));
        reporter.set_register_label(Step::Register.label(direction));
        for step in Step::ALL {
            reporter.step_status(step, StepStatus::Pending);
        }
        Self {
            reporter,
            direction,
            board: StepBoard::new(),
            current: None,
        }
    }

    pub(crate) fn reporter(&self) -> &'r R {
        self.reporter
    }

    fn set(&mut self, step: Step, status: StepStatus) {
        self.board.set(step, status);
        self.reporter.step_status(step, status);
    }

    pub(crate) fn begin(&mut self, step: Step) {
        info!(step = step.label(self.direction), "step started");
        self.current = Some(step);
        self.set(step, StepStatus::InProgress);
    }

    pub(crate) fn complete(&mut self) {
        if let Some(step) = self.current.take() {
            info!(step = step.label(self.direction), "step done");
            self.set(step, StepStatus::Done);
        }
    }

    /// Closes the run: marks the interrupted step and builds the report.
    pub(crate) fn finish(
        mut self,
        result: Result<(), Halt>,
        node_name: Option<String>,
    ) -> PipelineReport {
        let outcome = match (result, self.current.take()) {
            (Ok(()), _) => Outcome::Success,
            (Err(Halt::Failed(error)), Some(step)) => {
                error!(
                    step = step.label(self.direction),
                    code = error.code(),
                    error = %error,
                    "step failed"
                );
                self.set(step, StepStatus::Error);
                Outcome::Failed { step, error }
            }
            (Err(Halt::Canceled), Some(step)) => {
                warn!(step = step.label(self.direction), "step canceled by user");
                self.set(step, StepStatus::Canceled);
                Outcome::Canceled { step }
            }
            // A halt always happens inside a step; fall back to the first one.
            (Err(Halt::Failed(error)), None) => {
                self.set(Step::CheckCredentials, StepStatus::Error);
                Outcome::Failed {
                    step: Step::CheckCredentials,
                    error,
                }
            }
            (Err(Halt::Canceled), None) => Outcome::Canceled {
                step: Step::CheckCredentials,
            },
        };
        self.reporter.finish();
        PipelineReport {
            direction: self.direction,
            board: self.board,
            outcome,
            node_name,
        }
    }
}
