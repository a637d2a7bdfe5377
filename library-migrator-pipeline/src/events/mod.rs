//! Lifecycle event model for the migration pipeline.
//!
//! Every defined point of the read, process, write, chunk, step and job
//! phases emits one `MigrationEvent` through an `EventSink`. A single
//! structured event type replaces per-phase listener interfaces: observers
//! match on the variant they care about.
use library_migrator_shared::types::{DocumentId, EntityKind, SourceId};
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::job::JobStatus;
use crate::step::StepStatus;

/// A lifecycle notification emitted at a defined point of a migration run.
///
/// Events are observational: publishing one never influences pipeline
/// control flow. Record identifiers are carried where they are available at
/// the emission point; a read failure, for instance, has no identifier yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MigrationEvent {
    /// The job began a new execution with a fresh run identifier.
    JobStarted { run_id: u64 },
    /// The job reached its terminal status.
    JobFinished { run_id: u64, status: JobStatus },
    /// A step began executing.
    StepStarted { step: String, entity: EntityKind },
    /// A step reached its terminal status.
    StepFinished {
        step: String,
        entity: EntityKind,
        status: StepStatus,
    },
    /// A fully assembled chunk is about to be committed.
    ChunkStarted { entity: EntityKind, records: usize },
    /// The chunk was committed to the target store.
    ChunkFinished { entity: EntityKind, records: usize },
    /// The chunk could not be committed.
    ChunkFailed { entity: EntityKind },
    /// The reader is about to be asked for the next record.
    ReadStarted { entity: EntityKind },
    /// The reader returned a record.
    ReadFinished { entity: EntityKind, id: SourceId },
    /// The reader failed; the step terminates.
    ReadFailed { entity: EntityKind },
    /// A record is about to be transformed.
    ProcessStarted { entity: EntityKind, id: SourceId },
    /// A record was transformed into a target document.
    ProcessFinished { entity: EntityKind, id: DocumentId },
    /// A record could not be transformed; the step terminates.
    ProcessFailed { entity: EntityKind, id: SourceId },
    /// The writer is about to persist a batch.
    WriteStarted { entity: EntityKind, records: usize },
    /// The writer persisted the whole batch.
    WriteFinished { entity: EntityKind, records: usize },
    /// The writer failed partway through a batch; earlier documents of the
    /// batch stay persisted.
    WriteFailed { entity: EntityKind },
}

/// Receives lifecycle events from steps and jobs.
///
/// Publishing must not fail and must not block the pipeline; a sink that
/// loses its downstream simply drops events.
pub trait EventSink: Send + Sync {
    fn publish(&self, event: MigrationEvent);
}

/// An `EventSink` that renders each event as a structured log line.
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn publish(&self, event: MigrationEvent) {
        match event {
            MigrationEvent::JobStarted { run_id } => info!(run_id, "job started"),
            MigrationEvent::JobFinished { run_id, status } => {
                info!(run_id, ?status, "job finished")
            }
            MigrationEvent::StepStarted { step, entity } => {
                info!(step = %step, %entity, "step started")
            }
            MigrationEvent::StepFinished {
                step,
                entity,
                status,
            } => info!(step = %step, %entity, ?status, "step finished"),
            MigrationEvent::ChunkStarted { entity, records } => {
                info!(%entity, records, "chunk started")
            }
            MigrationEvent::ChunkFinished { entity, records } => {
                info!(%entity, records, "chunk finished")
            }
            MigrationEvent::ChunkFailed { entity } => error!(%entity, "chunk failed"),
            MigrationEvent::ReadStarted { entity } => info!(%entity, "read started"),
            MigrationEvent::ReadFinished { entity, id } => {
                info!(%entity, id, "read finished")
            }
            MigrationEvent::ReadFailed { entity } => error!(%entity, "read failed"),
            MigrationEvent::ProcessStarted { entity, id } => {
                info!(%entity, id, "process started")
            }
            MigrationEvent::ProcessFinished { entity, id } => {
                info!(%entity, %id, "process finished")
            }
            MigrationEvent::ProcessFailed { entity, id } => {
                error!(%entity, id, "process failed")
            }
            MigrationEvent::WriteStarted { entity, records } => {
                info!(%entity, records, "write started")
            }
            MigrationEvent::WriteFinished { entity, records } => {
                info!(%entity, records, "write finished")
            }
            MigrationEvent::WriteFailed { entity } => error!(%entity, "write failed"),
        }
    }
}

/// An `EventSink` that forwards events over an unbounded channel, for
/// embedding applications that want the event stream itself.
pub struct ChannelEventSink {
    sender: mpsc::UnboundedSender<MigrationEvent>,
}

impl ChannelEventSink {
    /// Creates the sink together with the receiving half of its channel.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<MigrationEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl EventSink for ChannelEventSink {
    fn publish(&self, event: MigrationEvent) {
        // A dropped receiver only means nobody is observing anymore.
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use library_migrator_shared::types::EntityKind;

    use super::*;

    #[tokio::test]
    async fn test_channel_sink_delivers_events_in_order() {
        let (sink, mut receiver) = ChannelEventSink::new();

        sink.publish(MigrationEvent::JobStarted { run_id: 1 });
        sink.publish(MigrationEvent::ReadStarted {
            entity: EntityKind::Genre,
        });

        assert_eq!(
            receiver.recv().await,
            Some(MigrationEvent::JobStarted { run_id: 1 })
        );
        assert_eq!(
            receiver.recv().await,
            Some(MigrationEvent::ReadStarted {
                entity: EntityKind::Genre
            })
        );
    }

    #[tokio::test]
    async fn test_channel_sink_survives_dropped_receiver() {
        let (sink, receiver) = ChannelEventSink::new();
        drop(receiver);

        sink.publish(MigrationEvent::JobStarted { run_id: 1 });
    }
}
