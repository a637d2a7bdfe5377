//! Job composition for the migration pipeline.
//!
//! A job is an ordered sequence of steps run strictly one after another.
//! Each invocation is stamped with a fresh, strictly increasing run
//! identifier so that two executions are distinguishable in any execution
//! history even with identical inputs. The first failed step aborts the
//! sequence; no downstream step runs.
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::error;

use crate::events::{EventSink, MigrationEvent};
use crate::step::Step;

/// Terminal state of one job execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    Completed,
    Failed,
}

/// What the invoker reads back from one job execution: the run identifier
/// and the terminal status. The event stream carries everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobExecution {
    pub run_id: u64,
    pub status: JobStatus,
}

/// Hands out strictly increasing run identifiers, one per job invocation.
#[derive(Debug)]
pub struct RunIdSequence(AtomicU64);

impl RunIdSequence {
    pub fn new() -> Self {
        Self(AtomicU64::new(1))
    }

    pub fn next_id(&self) -> u64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

impl Default for RunIdSequence {
    fn default() -> Self {
        Self::new()
    }
}

/// An ordered composition of steps executed as one logical run.
pub struct Job {
    name: String,
    steps: Vec<Box<dyn Step>>,
    events: Arc<dyn EventSink>,
    run_ids: RunIdSequence,
}

impl Job {
    /// Creates a new `Job` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The job name used in log lines
    /// * `steps` - The steps to execute, in the given order
    /// * `events` - The sink every lifecycle event of this job is published to
    ///
    /// # Returns
    ///
    /// A new `Job` instance with a fresh run identifier sequence.
    pub fn new(name: impl Into<String>, steps: Vec<Box<dyn Step>>, events: Arc<dyn EventSink>) -> Self {
        Self {
            name: name.into(),
            steps,
            events,
            run_ids: RunIdSequence::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs every step in order, stopping at the first failure.
    ///
    /// Returns `Completed` only if all steps completed. A failed execution
    /// is a terminal status, not an error value: the invoker reads the
    /// status and run identifier, and the event stream plus the step's log
    /// output carry the failure detail.
    pub async fn run(&mut self) -> JobExecution {
        let run_id = self.run_ids.next_id();
        self.events.publish(MigrationEvent::JobStarted { run_id });
        let mut status = JobStatus::Completed;
        for step in &mut self.steps {
            if let Err(step_error) = step.execute(self.events.as_ref()).await {
                error!(
                    job = %self.name,
                    run_id,
                    step = step.name(),
                    error = %step_error,
                    "step failed; aborting job"
                );
                status = JobStatus::Failed;
                break;
            }
        }
        self.events.publish(MigrationEvent::JobFinished { run_id, status });
        JobExecution { run_id, status }
    }
}
