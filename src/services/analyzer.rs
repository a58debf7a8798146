//! Public entry point: one input surface in, one [`ExportReport`] out.

use crate::services::config::IngestConfig;
use crate::services::ingest::{
    read_archive_bytes, read_archive_file, read_directory, read_selected_files, SelectedFile, Vfc,
};
use crate::services::orchestrator::{run_extraction, IngestState};
use crate::types::errors::{IngestError, IngestResult};
use crate::types::progress::IngestProgress;
use crate::types::report::ExportReport;
use std::path::Path;
use std::sync::Arc;

/// Reads an export and analyzes it. Runs are independent; only the
/// cancellation flag is shared with callers through [`ExportAnalyzer::state`].
pub struct ExportAnalyzer {
    config: IngestConfig,
    state: Arc<IngestState>,
}

impl Default for ExportAnalyzer {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

impl ExportAnalyzer {
    pub fn new(config: IngestConfig) -> Self {
        Self {
            config,
            state: Arc::new(IngestState::new()),
        }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Handle for cancelling a run from another thread.
    pub fn state(&self) -> Arc<IngestState> {
        Arc::clone(&self.state)
    }

    pub fn analyze_archive_bytes<F>(&self, bytes: &[u8], mut on_progress: F) -> IngestResult<ExportReport>
    where
        F: FnMut(IngestProgress),
    {
        self.ensure_not_cancelled()?;
        let vfc = read_archive_bytes(bytes, &self.config, &mut on_progress)?;
        self.analyze_vfc(&vfc, on_progress)
    }

    pub fn analyze_archive_file<F>(&self, path: &Path, mut on_progress: F) -> IngestResult<ExportReport>
    where
        F: FnMut(IngestProgress),
    {
        self.ensure_not_cancelled()?;
        let vfc = read_archive_file(path, &self.config, &mut on_progress)?;
        self.analyze_vfc(&vfc, on_progress)
    }

    pub fn analyze_directory<F>(&self, root: &Path, mut on_progress: F) -> IngestResult<ExportReport>
    where
        F: FnMut(IngestProgress),
    {
        self.ensure_not_cancelled()?;
        let vfc = read_directory(root, &self.config, &mut on_progress)?;
        self.analyze_vfc(&vfc, on_progress)
    }

    pub fn analyze_selected_files<F>(
        &self,
        files: Vec<SelectedFile>,
        mut on_progress: F,
    ) -> IngestResult<ExportReport>
    where
        F: FnMut(IngestProgress),
    {
        self.ensure_not_cancelled()?;
        let vfc = read_selected_files(files, &self.config, &mut on_progress);
        self.analyze_vfc(&vfc, on_progress)
    }

    /// Analyze an already built collection.
    pub fn analyze_vfc<F>(&self, vfc: &Vfc, mut on_progress: F) -> IngestResult<ExportReport>
    where
        F: FnMut(IngestProgress),
    {
        log::info!("Analyzing export with {} documents", vfc.len());
        run_extraction(vfc, &self.config, &self.state, &mut on_progress)
    }

    fn ensure_not_cancelled(&self) -> IngestResult<()> {
        if self.state.is_cancelled() {
            return Err(IngestError::Cancelled);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/analyzer_tests.rs"]
mod tests;
