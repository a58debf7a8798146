//! Virtual file collection: normalized path → document text.
//!
//! Built once by a reader, then read-only while the extraction routines run.

use indexmap::IndexMap;
use std::collections::HashMap;

/// Lower-case and unify separators to `/`.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/").to_lowercase()
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

#[derive(Debug, Clone, Default)]
pub struct Vfc {
    entries: IndexMap<String, String>,
    /// Final path segment → entry positions, ascending.
    by_file_name: HashMap<String, Vec<usize>>,
}

impl Vfc {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a document. A colliding normalized path replaces the earlier text
    /// and keeps the earlier position.
    pub fn insert(&mut self, path: &str, text: String) {
        let normalized = normalize_path(path);
        let file_name = last_segment(&normalized).to_string();
        let (index, previous) = self.entries.insert_full(normalized, text);
        if previous.is_some() {
            log::debug!("Duplicate normalized path replaced: {path}");
            return;
        }
        self.by_file_name.entry(file_name).or_default().push(index);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text stored under an exact path (normalized before lookup).
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(&normalize_path(path)).map(String::as_str)
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// First document, in insertion order, whose path ends with `suffix`.
    ///
    /// When the suffix spans a directory, only entries with the same final
    /// segment can match, so only that bucket is scanned.
    pub fn resolve(&self, suffix: &str) -> Option<&str> {
        let suffix = normalize_path(suffix);
        if suffix.is_empty() {
            return None;
        }

        if suffix.contains('/') {
            let bucket = self.by_file_name.get(last_segment(&suffix))?;
            return bucket.iter().find_map(|&index| {
                let (path, text) = self.entries.get_index(index)?;
                path.ends_with(&suffix).then_some(text.as_str())
            });
        }

        self.entries
            .iter()
            .find(|(path, _)| path.ends_with(&suffix))
            .map(|(_, text)| text.as_str())
    }

    /// Paginated documents `<stem>_1.json`, `<stem>_2.json`, ... up to the first gap.
    pub fn resolve_pages(&self, stem: &str) -> Vec<&str> {
        (1..)
            .map(|page| self.resolve(&format!("{stem}_{page}.json")))
            .take_while(Option::is_some)
            .flatten()
            .collect()
    }

    /// Every `(path, text)` whose path contains the directory `fragment`.
    pub fn entries_under(&self, fragment: &str) -> Vec<(&str, &str)> {
        let fragment = normalize_path(fragment);
        let nested = format!("/{fragment}");
        self.entries
            .iter()
            .filter(|(path, _)| path.starts_with(&fragment) || path.contains(&nested))
            .map(|(path, text)| (path.as_str(), text.as_str()))
            .collect()
    }
}

#[cfg(test)]
#[path = "tests/vfc_tests.rs"]
mod tests;
