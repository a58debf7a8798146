//! Directory reader: an already-extracted export or a set of selected files → [`Vfc`].

use super::decode::decode_entry;
use super::vfc::Vfc;
use crate::services::config::IngestConfig;
use crate::types::errors::{IngestError, IngestResult};
use crate::types::progress::IngestProgress;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One individually selected file with its path relative to the export root.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub relative_path: String,
    pub contents: Vec<u8>,
}

enum EntrySource {
    Disk(PathBuf),
    Memory(Vec<u8>),
}

struct FileEntry {
    relative_path: String,
    source: EntrySource,
}

/// Walk `root` and read every JSON file below it.
///
/// Symlinks are not followed; entries are visited sorted by file name.
pub fn read_directory<F>(
    root: &Path,
    config: &IngestConfig,
    on_progress: &mut F,
) -> IngestResult<Vfc>
where
    F: FnMut(IngestProgress),
{
    if !root.is_dir() {
        return Err(IngestError::Io(format!(
            "Export directory does not exist: {}",
            root.display()
        )));
    }

    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    let mut entries = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = match entry.path().strip_prefix(root) {
            Ok(rel) => rel.to_string_lossy().to_string(),
            Err(_) => continue,
        };
        entries.push(FileEntry {
            relative_path: relative,
            source: EntrySource::Disk(entry.path().to_path_buf()),
        });
    }

    Ok(read_entries(entries, config, on_progress))
}

/// Read a flat collection of selected files. Never fails as a whole.
pub fn read_selected_files<F>(
    files: Vec<SelectedFile>,
    config: &IngestConfig,
    on_progress: &mut F,
) -> Vfc
where
    F: FnMut(IngestProgress),
{
    let entries = files
        .into_iter()
        .map(|file| FileEntry {
            relative_path: file.relative_path,
            source: EntrySource::Memory(file.contents),
        })
        .collect();
    read_entries(entries, config, on_progress)
}

fn read_entries<F>(entries: Vec<FileEntry>, config: &IngestConfig, on_progress: &mut F) -> Vfc
where
    F: FnMut(IngestProgress),
{
    let total = entries.len();
    let mut vfc = Vfc::new();

    for (index, entry) in entries.into_iter().enumerate() {
        let processed = index + 1;
        let path = entry.relative_path;

        if !config.is_json_path(&path) {
            on_progress(IngestProgress::entries(
                processed,
                total,
                format!("Skipping {path}"),
            ));
            continue;
        }

        if let Some(bytes) = load_bytes(&path, entry.source, config) {
            if let Some(text) = decode_entry(&path, &bytes) {
                vfc.insert(&path, text);
            }
        }

        on_progress(IngestProgress::entries(
            processed,
            total,
            format!("Reading {path}"),
        ));
    }

    log::info!(
        "Directory loaded: {} of {} files retained",
        vfc.len(),
        total
    );
    on_progress(IngestProgress::done(format!(
        "Loaded {} documents",
        vfc.len()
    )));
    vfc
}

fn load_bytes(path: &str, source: EntrySource, config: &IngestConfig) -> Option<Vec<u8>> {
    let bytes = match source {
        EntrySource::Memory(bytes) => bytes,
        EntrySource::Disk(disk_path) => {
            match fs::metadata(&disk_path) {
                Ok(meta) if meta.len() > config.max_entry_bytes => {
                    log::warn!("Skipping oversized file {path} ({} bytes)", meta.len());
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    log::warn!("Skipping unreadable file {path}: {e}");
                    return None;
                }
            }
            match fs::read(&disk_path) {
                Ok(bytes) => bytes,
                Err(e) => {
                    log::warn!("Skipping unreadable file {path}: {e}");
                    return None;
                }
            }
        }
    };

    if bytes.len() as u64 > config.max_entry_bytes {
        log::warn!("Skipping oversized file {path} ({} bytes)", bytes.len());
        return None;
    }
    Some(bytes)
}

#[cfg(test)]
#[path = "tests/directory_reader_tests.rs"]
mod tests;
