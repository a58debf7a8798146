pub mod services;
pub mod types;
#[cfg(test)]
pub mod test_utils;

pub use services::analyzer::ExportAnalyzer;
pub use services::config::IngestConfig;
pub use services::ingest::{ArchiveFormat, SelectedFile, Vfc};
pub use services::orchestrator::{IngestState, Stage};
pub use types::{ExportReport, IngestError, IngestProgress, IngestResult};
