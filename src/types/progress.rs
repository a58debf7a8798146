use serde::{Deserialize, Serialize};

/// Progress signal delivered to the caller during one ingestion run.
///
/// `fraction` is `None` for coarse "entering stage" notifications and
/// `Some(0.0..=1.0)` for per-entry progress while the input is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngestProgress {
    pub fraction: Option<f64>,
    pub message: String,
}

impl IngestProgress {
    pub fn stage(message: impl Into<String>) -> Self {
        Self {
            fraction: None,
            message: message.into(),
        }
    }

    pub fn entries(processed: usize, total: usize, message: impl Into<String>) -> Self {
        let fraction = if total == 0 {
            1.0
        } else {
            (processed as f64 / total as f64).min(1.0)
        };
        Self {
            fraction: Some(fraction),
            message: message.into(),
        }
    }

    pub fn done(message: impl Into<String>) -> Self {
        Self {
            fraction: Some(1.0),
            message: message.into(),
        }
    }
}
