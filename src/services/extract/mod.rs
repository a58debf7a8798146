//! Extraction routines: each one reads its documents from the [`Vfc`] and
//! fills one section of the [`ExportReport`].
//!
//! A missing document leaves the section at its template default, a
//! malformed one is parsed as an empty object.

pub mod activity;
pub mod advertising;
pub mod connections;
pub mod insights;
pub mod logged_info;
pub mod messaging;
pub mod profile;
pub mod security;

use crate::services::config::IngestConfig;
use crate::services::ingest::vfc::Vfc;
use crate::services::utils::json::{into_records, parse_document, Shape};
use serde_json::Value;

/// Where to find one logical document and the array inside it.
///
/// `suffixes` are tried in order, the first one that resolves wins. `shapes`
/// are then evaluated in order against the parsed document.
#[derive(Debug, Clone, Copy)]
pub struct DocSpec {
    pub suffixes: &'static [&'static str],
    pub shapes: &'static [Shape],
}

impl DocSpec {
    pub const fn new(suffixes: &'static [&'static str], shapes: &'static [Shape]) -> Self {
        Self { suffixes, shapes }
    }
}

/// Read-only inputs shared by every routine of one run.
pub struct ExtractContext<'a> {
    pub vfc: &'a Vfc,
    pub config: &'a IngestConfig,
}

impl<'a> ExtractContext<'a> {
    pub fn new(vfc: &'a Vfc, config: &'a IngestConfig) -> Self {
        Self { vfc, config }
    }

    /// Raw text of the first resolvable suffix.
    pub fn text(&self, suffixes: &[&str]) -> Option<&'a str> {
        suffixes.iter().find_map(|suffix| self.vfc.resolve(suffix))
    }

    /// Parsed document, `None` when no suffix resolves.
    pub fn document(&self, spec: &DocSpec) -> Option<Value> {
        self.text(spec.suffixes)
            .map(|text| parse_document(Some(text)))
    }

    /// Record array of `spec`, empty when absent or no shape matches.
    pub fn records(&self, spec: &DocSpec) -> Vec<Value> {
        match self.document(spec) {
            Some(doc) => into_records(doc, spec.shapes),
            None => Vec::new(),
        }
    }

    /// Records of every page `<stem>_N.json`, concatenated in page order.
    ///
    /// Falls back to the unpaged `<stem>.json` when no page exists.
    pub fn paged_records(&self, stem: &str, shapes: &[Shape]) -> Vec<Value> {
        let pages = self.vfc.resolve_pages(stem);
        if pages.is_empty() {
            let single = format!("{stem}.json");
            return match self.vfc.resolve(&single) {
                Some(text) => into_records(parse_document(Some(text)), shapes),
                None => Vec::new(),
            };
        }

        pages
            .into_iter()
            .flat_map(|text| into_records(parse_document(Some(text)), shapes))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/extract_tests.rs"]
mod tests;
