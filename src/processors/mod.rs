//! Pipeline stages.

pub mod batch;

// Re-export key types for convenience
pub use batch::{
    convert_directory, plan_directory, process_file, run_tasks, BatchError, BatchFailure,
    BatchSummary, FileReport, FileTask,
};
