//! Chunk-oriented step orchestrator for the migration pipeline.
//!
//! A step drives one entity type's migration: it reads up to `chunk_size`
//! records through its reader, transforms each as it is read, commits the
//! assembled chunk through its writer, and repeats until the cursor is
//! exhausted, emitting a lifecycle event at every micro-step. The first
//! unrecovered error terminates the step; there is no retry and no
//! skip-and-continue policy.
use async_trait::async_trait;
use library_migrator_shared::types::EntityKind;

use crate::errors::StepError;
use crate::events::{EventSink, MigrationEvent};
use crate::processor::ItemProcessor;
use crate::reader::ItemReader;
use crate::records::{SourceRecord, TargetRecord};
use crate::writer::ItemWriter;

/// Chunk size used for every entity type unless overridden through
/// configuration. Bounds memory per batch; never adapted to data volume.
pub const DEFAULT_CHUNK_SIZE: usize = 5;

/// Terminal state of one step execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Completed,
    Failed,
}

/// A unit the job can sequence: one entity type's complete
/// read→transform→write pipeline.
#[async_trait]
pub trait Step: Send {
    fn name(&self) -> &str;

    fn entity(&self) -> EntityKind;

    /// Runs the step to completion or to its first unrecovered error.
    async fn execute(&mut self, events: &dyn EventSink) -> Result<(), StepError>;
}

/// The chunk orchestrator: a reader/processor/writer triple bound to one
/// entity type and a fixed chunk size.
pub struct ChunkStep<I, O> {
    name: String,
    entity: EntityKind,
    chunk_size: usize,
    reader: Box<dyn ItemReader<I>>,
    processor: Box<dyn ItemProcessor<I, O>>,
    writer: Box<dyn ItemWriter<O>>,
}

impl<I, O> ChunkStep<I, O>
where
    I: SourceRecord + Send + Sync,
    O: TargetRecord + Send + Sync,
{
    /// Creates a new `ChunkStep` instance.
    ///
    /// # Arguments
    ///
    /// * `name` - The step name used in lifecycle events and log lines
    /// * `entity` - The entity type this step migrates
    /// * `chunk_size` - Number of records per committed chunk; must be at least 1
    /// * `reader` - A boxed `ItemReader` over the entity's source cursor
    /// * `processor` - A boxed `ItemProcessor` for the entity's transform
    /// * `writer` - A boxed `ItemWriter` into the entity's target collection
    ///
    /// # Returns
    ///
    /// A new `ChunkStep` instance.
    pub fn new(
        name: impl Into<String>,
        entity: EntityKind,
        chunk_size: usize,
        reader: Box<dyn ItemReader<I>>,
        processor: Box<dyn ItemProcessor<I, O>>,
        writer: Box<dyn ItemWriter<O>>,
    ) -> Self {
        Self {
            name: name.into(),
            entity,
            chunk_size,
            reader,
            processor,
            writer,
        }
    }

    async fn drive(&mut self, events: &dyn EventSink) -> Result<(), StepError> {
        loop {
            let (chunk, reached_end) = self.assemble_chunk(events).await?;
            if !chunk.is_empty() {
                self.commit_chunk(&chunk, events).await?;
            }
            if reached_end || chunk.is_empty() {
                return Ok(());
            }
        }
    }

    /// Reads and transforms up to `chunk_size` records. Returns the chunk
    /// together with whether the cursor signalled end-of-stream while
    /// assembling it.
    async fn assemble_chunk(
        &mut self,
        events: &dyn EventSink,
    ) -> Result<(Vec<O>, bool), StepError> {
        let mut chunk = Vec::with_capacity(self.chunk_size);
        let mut reached_end = false;
        while chunk.len() < self.chunk_size {
            events.publish(MigrationEvent::ReadStarted {
                entity: self.entity,
            });
            match self.reader.next().await {
                Ok(Some(record)) => {
                    events.publish(MigrationEvent::ReadFinished {
                        entity: self.entity,
                        id: record.record_id(),
                    });
                    let document = self.process_record(&record, events)?;
                    chunk.push(document);
                }
                Ok(None) => {
                    reached_end = true;
                    break;
                }
                Err(error) => {
                    events.publish(MigrationEvent::ReadFailed {
                        entity: self.entity,
                    });
                    return Err(StepError::Read(error));
                }
            }
        }
        Ok((chunk, reached_end))
    }

    fn process_record(&self, record: &I, events: &dyn EventSink) -> Result<O, StepError> {
        events.publish(MigrationEvent::ProcessStarted {
            entity: self.entity,
            id: record.record_id(),
        });
        match self.processor.process(record) {
            Ok(document) => {
                events.publish(MigrationEvent::ProcessFinished {
                    entity: self.entity,
                    id: document.document_id().to_string(),
                });
                Ok(document)
            }
            Err(error) => {
                events.publish(MigrationEvent::ProcessFailed {
                    entity: self.entity,
                    id: record.record_id(),
                });
                Err(StepError::Process(error))
            }
        }
    }

    async fn commit_chunk(&mut self, chunk: &[O], events: &dyn EventSink) -> Result<(), StepError> {
        events.publish(MigrationEvent::ChunkStarted {
            entity: self.entity,
            records: chunk.len(),
        });
        events.publish(MigrationEvent::WriteStarted {
            entity: self.entity,
            records: chunk.len(),
        });
        match self.writer.write(chunk).await {
            Ok(()) => {
                events.publish(MigrationEvent::WriteFinished {
                    entity: self.entity,
                    records: chunk.len(),
                });
                events.publish(MigrationEvent::ChunkFinished {
                    entity: self.entity,
                    records: chunk.len(),
                });
                Ok(())
            }
            Err(error) => {
                events.publish(MigrationEvent::WriteFailed {
                    entity: self.entity,
                });
                events.publish(MigrationEvent::ChunkFailed {
                    entity: self.entity,
                });
                Err(StepError::Write(error))
            }
        }
    }
}

#[async_trait]
impl<I, O> Step for ChunkStep<I, O>
where
    I: SourceRecord + Send + Sync,
    O: TargetRecord + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn entity(&self) -> EntityKind {
        self.entity
    }

    async fn execute(&mut self, events: &dyn EventSink) -> Result<(), StepError> {
        events.publish(MigrationEvent::StepStarted {
            step: self.name.clone(),
            entity: self.entity,
        });
        let outcome = match self.reader.open().await {
            Ok(()) => {
                let driven = self.drive(events).await;
                // The cursor is released on every exit path, success or
                // failure, before the step reports its terminal state.
                let closed = self.reader.close().await;
                match (driven, closed) {
                    (Ok(()), Ok(())) => Ok(()),
                    (Ok(()), Err(error)) => Err(StepError::Read(error)),
                    (Err(error), _) => Err(error),
                }
            }
            Err(error) => Err(StepError::Read(error)),
        };
        let status = if outcome.is_ok() {
            StepStatus::Completed
        } else {
            StepStatus::Failed
        };
        events.publish(MigrationEvent::StepFinished {
            step: self.name.clone(),
            entity: self.entity,
            status,
        });
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};

    use library_migrator_repository::TargetRepositoryError;
    use library_migrator_shared::types::{GenreDocument, SourceGenre};

    use super::*;
    use crate::errors::{ProcessError, ReadError, WriteError};
    use crate::processor::GenreProcessor;

    struct StubReader {
        items: VecDeque<Result<SourceGenre, ReadError>>,
        open: bool,
        closed: Arc<AtomicBool>,
    }

    impl StubReader {
        fn new(items: Vec<Result<SourceGenre, ReadError>>) -> (Self, Arc<AtomicBool>) {
            let closed = Arc::new(AtomicBool::new(false));
            (
                Self {
                    items: items.into(),
                    open: false,
                    closed: closed.clone(),
                },
                closed,
            )
        }
    }

    #[async_trait]
    impl ItemReader<SourceGenre> for StubReader {
        async fn open(&mut self) -> Result<(), ReadError> {
            self.open = true;
            Ok(())
        }

        async fn next(&mut self) -> Result<Option<SourceGenre>, ReadError> {
            if !self.open {
                return Err(ReadError::CursorClosed);
            }
            match self.items.pop_front() {
                Some(Ok(record)) => Ok(Some(record)),
                Some(Err(error)) => Err(error),
                None => Ok(None),
            }
        }

        async fn close(&mut self) -> Result<(), ReadError> {
            self.open = false;
            self.closed.store(true, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingWriter {
        batches: Arc<Mutex<Vec<Vec<GenreDocument>>>>,
        fail_on_batch: Option<usize>,
    }

    #[async_trait]
    impl ItemWriter<GenreDocument> for RecordingWriter {
        async fn write(&self, documents: &[GenreDocument]) -> Result<(), WriteError> {
            let mut batches = self.batches.lock().unwrap();
            if self.fail_on_batch == Some(batches.len()) {
                return Err(WriteError::Repository(TargetRepositoryError::Database(
                    mongodb::error::Error::custom("save rejected"),
                )));
            }
            batches.push(documents.to_vec());
            Ok(())
        }
    }

    struct FailingProcessor;

    impl ItemProcessor<SourceGenre, GenreDocument> for FailingProcessor {
        fn process(&self, genre: &SourceGenre) -> Result<GenreDocument, ProcessError> {
            Err(ProcessError::Unprocessable {
                entity: EntityKind::Genre,
                id: genre.id,
                reason: "rejected by test".to_string(),
            })
        }
    }

    #[derive(Default)]
    struct CollectingSink {
        events: Mutex<Vec<MigrationEvent>>,
    }

    impl EventSink for CollectingSink {
        fn publish(&self, event: MigrationEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    impl CollectingSink {
        fn count(&self, matcher: impl Fn(&MigrationEvent) -> bool) -> usize {
            self.events.lock().unwrap().iter().filter(|e| matcher(e)).count()
        }
    }

    fn genres(count: usize) -> Vec<Result<SourceGenre, ReadError>> {
        (1..=count as i64)
            .map(|id| {
                Ok(SourceGenre {
                    id,
                    name: format!("genre {id}"),
                })
            })
            .collect()
    }

    fn step_over(
        items: Vec<Result<SourceGenre, ReadError>>,
        writer: RecordingWriter,
    ) -> (ChunkStep<SourceGenre, GenreDocument>, Arc<AtomicBool>) {
        let (reader, closed) = StubReader::new(items);
        let step = ChunkStep::new(
            "migrate-genres",
            EntityKind::Genre,
            DEFAULT_CHUNK_SIZE,
            Box::new(reader),
            Box::new(GenreProcessor),
            Box::new(writer),
        );
        (step, closed)
    }

    #[tokio::test]
    async fn test_chunks_of_five_with_remainder() {
        let batches = Arc::new(Mutex::new(Vec::new()));
        let writer = RecordingWriter {
            batches: batches.clone(),
            fail_on_batch: None,
        };
        let (mut step, _) = step_over(genres(12), writer);
        let sink = CollectingSink::default();

        step.execute(&sink).await.unwrap();

        let batches = batches.lock().unwrap();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].len(), 5);
        assert_eq!(batches[1].len(), 5);
        assert_eq!(batches[2].len(), 2);
        // Reader order is preserved across chunk boundaries.
        assert_eq!(batches[0][0].id, "1");
        assert_eq!(batches[1][0].id, "6");
        assert_eq!(batches[2][1].id, "12");
    }

    #[tokio::test]
    async fn test_evenly_divisible_input_has_no_trailing_chunk() {
        let batches = Arc::new(Mutex::new(Vec::new()));
        let writer = RecordingWriter {
            batches: batches.clone(),
            fail_on_batch: None,
        };
        let (mut step, _) = step_over(genres(10), writer);
        let sink = CollectingSink::default();

        step.execute(&sink).await.unwrap();

        assert_eq!(batches.lock().unwrap().len(), 2);
        assert_eq!(
            sink.count(|e| matches!(e, MigrationEvent::ChunkStarted { .. })),
            2
        );
        assert_eq!(
            sink.count(|e| matches!(e, MigrationEvent::ChunkFinished { .. })),
            2
        );
    }

    #[tokio::test]
    async fn test_empty_source_completes_without_chunks() {
        let batches = Arc::new(Mutex::new(Vec::new()));
        let writer = RecordingWriter {
            batches: batches.clone(),
            fail_on_batch: None,
        };
        let (mut step, closed) = step_over(genres(0), writer);
        let sink = CollectingSink::default();

        step.execute(&sink).await.unwrap();

        assert!(batches.lock().unwrap().is_empty());
        assert_eq!(
            sink.count(|e| matches!(e, MigrationEvent::ChunkStarted { .. })),
            0
        );
        assert_eq!(
            sink.count(|e| matches!(
                e,
                MigrationEvent::StepFinished {
                    status: StepStatus::Completed,
                    ..
                }
            )),
            1
        );
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_read_error_fails_step_and_releases_cursor() {
        let mut items = genres(2);
        items.push(Err(ReadError::CursorClosed));
        let batches = Arc::new(Mutex::new(Vec::new()));
        let writer = RecordingWriter {
            batches: batches.clone(),
            fail_on_batch: None,
        };
        let (mut step, closed) = step_over(items, writer);
        let sink = CollectingSink::default();

        let result = step.execute(&sink).await;

        assert!(matches!(result, Err(StepError::Read(_))));
        assert!(batches.lock().unwrap().is_empty());
        assert_eq!(
            sink.count(|e| matches!(e, MigrationEvent::ReadFailed { .. })),
            1
        );
        assert_eq!(
            sink.count(|e| matches!(
                e,
                MigrationEvent::StepFinished {
                    status: StepStatus::Failed,
                    ..
                }
            )),
            1
        );
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_process_error_fails_step_before_any_write() {
        let (reader, _) = StubReader::new(genres(3));
        let batches = Arc::new(Mutex::new(Vec::new()));
        let writer = RecordingWriter {
            batches: batches.clone(),
            fail_on_batch: None,
        };
        let mut step = ChunkStep::new(
            "migrate-genres",
            EntityKind::Genre,
            DEFAULT_CHUNK_SIZE,
            Box::new(reader),
            Box::new(FailingProcessor),
            Box::new(writer),
        );
        let sink = CollectingSink::default();

        let result = step.execute(&sink).await;

        assert!(matches!(result, Err(StepError::Process(_))));
        assert!(batches.lock().unwrap().is_empty());
        assert_eq!(
            sink.count(|e| matches!(e, MigrationEvent::ProcessFailed { id: 1, .. })),
            1
        );
    }

    #[tokio::test]
    async fn test_write_error_fails_step_and_chunk() {
        let batches = Arc::new(Mutex::new(Vec::new()));
        let writer = RecordingWriter {
            batches: batches.clone(),
            fail_on_batch: Some(1),
        };
        let (mut step, closed) = step_over(genres(8), writer);
        let sink = CollectingSink::default();

        let result = step.execute(&sink).await;

        assert!(matches!(result, Err(StepError::Write(_))));
        // The first chunk committed; the second failed and nothing after it
        // was attempted.
        assert_eq!(batches.lock().unwrap().len(), 1);
        assert_eq!(
            sink.count(|e| matches!(e, MigrationEvent::WriteFailed { .. })),
            1
        );
        assert_eq!(
            sink.count(|e| matches!(e, MigrationEvent::ChunkFailed { .. })),
            1
        );
        assert!(closed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_event_sequence_for_one_short_chunk() {
        let batches = Arc::new(Mutex::new(Vec::new()));
        let writer = RecordingWriter {
            batches: batches.clone(),
            fail_on_batch: None,
        };
        let (mut step, _) = step_over(genres(2), writer);
        let sink = CollectingSink::default();

        step.execute(&sink).await.unwrap();

        let entity = EntityKind::Genre;
        let expected = vec![
            MigrationEvent::StepStarted {
                step: "migrate-genres".to_string(),
                entity,
            },
            MigrationEvent::ReadStarted { entity },
            MigrationEvent::ReadFinished { entity, id: 1 },
            MigrationEvent::ProcessStarted { entity, id: 1 },
            MigrationEvent::ProcessFinished {
                entity,
                id: "1".to_string(),
            },
            MigrationEvent::ReadStarted { entity },
            MigrationEvent::ReadFinished { entity, id: 2 },
            MigrationEvent::ProcessStarted { entity, id: 2 },
            MigrationEvent::ProcessFinished {
                entity,
                id: "2".to_string(),
            },
            MigrationEvent::ReadStarted { entity },
            MigrationEvent::ChunkStarted { entity, records: 2 },
            MigrationEvent::WriteStarted { entity, records: 2 },
            MigrationEvent::WriteFinished { entity, records: 2 },
            MigrationEvent::ChunkFinished { entity, records: 2 },
            MigrationEvent::StepFinished {
                step: "migrate-genres".to_string(),
                entity,
                status: StepStatus::Completed,
            },
        ];
        assert_eq!(*sink.events.lock().unwrap(), expected);
    }
}
