pub mod batch;
pub mod job;
pub mod pool;
pub mod scanner;

pub use batch::{validate_jobs, validate_paths, BatchReport};
pub use job::{validate_document, JobResult, Outcome, ValidationJob, STDIN_LABEL};
pub use pool::ValidationPool;
pub use scanner::DirectoryScanner;
