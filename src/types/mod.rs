pub mod errors;
pub mod progress;
pub mod report;

pub use errors::{IngestError, IngestResult};
pub use progress::IngestProgress;
pub use report::ExportReport;
