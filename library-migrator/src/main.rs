use dotenv::dotenv;
use library_migrator::{Dependencies, MigrationError};
use library_migrator_pipeline::job::JobStatus;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the library migrator application.
///
/// Initializes dotenv and tracing, wires the application dependencies, and
/// runs the migration job once, mapping its terminal status to the process
/// result.
#[tokio::main]
async fn main() -> Result<(), MigrationError> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let dependencies = Dependencies::new().await?;
    let mut job = dependencies.job;

    let execution = job.run().await;
    match execution.status {
        JobStatus::Completed => {
            info!(run_id = execution.run_id, "migration completed");
            Ok(())
        }
        JobStatus::Failed => {
            error!(run_id = execution.run_id, "migration failed");
            Err(MigrationError::JobFailed {
                run_id: execution.run_id,
            })
        }
    }
}
