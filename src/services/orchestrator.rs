//! Runs the extraction routines over a finished [`Vfc`] in their fixed order.

use crate::services::config::IngestConfig;
use crate::services::extract::{
    activity, advertising, connections, insights, logged_info, messaging, profile, security,
    ExtractContext,
};
use crate::services::ingest::vfc::Vfc;
use crate::types::errors::{IngestError, IngestResult};
use crate::types::progress::IngestProgress;
use crate::types::report::ExportReport;
use std::sync::atomic::{AtomicBool, Ordering};

// ─── State Management ──────────────────────────────────────────────

/// Cooperative cancellation shared between a run and whoever started it.
pub struct IngestState {
    pub is_cancelled: AtomicBool,
}

impl IngestState {
    pub fn new() -> Self {
        Self {
            is_cancelled: AtomicBool::new(false),
        }
    }
}

impl Default for IngestState {
    fn default() -> Self {
        Self::new()
    }
}

impl IngestState {
    pub fn cancel(&self) {
        self.is_cancelled.store(true, Ordering::SeqCst);
    }
    pub fn reset(&self) {
        self.is_cancelled.store(false, Ordering::SeqCst);
    }
    pub fn is_cancelled(&self) -> bool {
        self.is_cancelled.load(Ordering::SeqCst)
    }
}

// ─── Stages ────────────────────────────────────────────────────────

/// One routine group. Later stages read what earlier ones wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Profile,
    Connections,
    Activity,
    Advertising,
    Security,
    Messaging,
    Insights,
    LoggedInformation,
}

impl Stage {
    pub const ORDER: [Stage; 8] = [
        Stage::Profile,
        Stage::Connections,
        Stage::Activity,
        Stage::Advertising,
        Stage::Security,
        Stage::Messaging,
        Stage::Insights,
        Stage::LoggedInformation,
    ];

    pub fn message(self) -> &'static str {
        match self {
            Stage::Profile => "Reading profile",
            Stage::Connections => "Analyzing followers and following",
            Stage::Activity => "Analyzing likes, comments and content",
            Stage::Advertising => "Analyzing ads and advertisers",
            Stage::Security => "Analyzing login activity",
            Stage::Messaging => "Analyzing messages",
            Stage::Insights => "Analyzing insights, topics, devices and apps",
            Stage::LoggedInformation => "Analyzing link history and searches",
        }
    }

    fn run(self, ctx: &ExtractContext, report: &mut ExportReport) {
        match self {
            Stage::Profile => profile::extract_profile(ctx, report),
            Stage::Connections => connections::extract_connections(ctx, report),
            Stage::Activity => activity::extract_activity(ctx, report),
            Stage::Advertising => advertising::extract_advertising(ctx, report),
            Stage::Security => security::extract_security(ctx, report),
            Stage::Messaging => messaging::extract_messaging(ctx, report),
            Stage::Insights => insights::extract_insights(ctx, report),
            Stage::LoggedInformation => logged_info::extract_logged_information(ctx, report),
        }
    }
}

// ─── Run ───────────────────────────────────────────────────────────

/// Build a fresh report from `vfc`.
///
/// Cancellation is checked before every stage; a cancelled run yields no report.
pub fn run_extraction<F>(
    vfc: &Vfc,
    config: &IngestConfig,
    state: &IngestState,
    on_progress: &mut F,
) -> IngestResult<ExportReport>
where
    F: FnMut(IngestProgress),
{
    let ctx = ExtractContext::new(vfc, config);
    let mut report = ExportReport::template();

    for stage in Stage::ORDER {
        if state.is_cancelled() {
            log::info!("Analysis cancelled before {stage:?}");
            return Err(IngestError::Cancelled);
        }
        on_progress(IngestProgress::stage(stage.message()));
        log::debug!("Stage {stage:?} started");
        stage.run(&ctx, &mut report);
    }

    log::info!("Analysis complete over {} documents", vfc.len());
    on_progress(IngestProgress::done("Analysis complete"));
    Ok(report)
}

#[cfg(test)]
#[path = "tests/orchestrator_tests.rs"]
mod tests;
