mod process;
mod read;
mod step;
mod write;

pub use process::ProcessError;
pub use read::ReadError;
pub use step::StepError;
pub use write::WriteError;
