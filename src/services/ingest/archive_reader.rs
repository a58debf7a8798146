//! Archive reader: ZIP or 7z container → [`Vfc`].
//!
//! Only JSON entries are decoded and kept. Media and directory markers are
//! counted toward progress and dropped.

use super::decode::decode_entry;
use super::vfc::Vfc;
use crate::services::config::IngestConfig;
use crate::types::errors::{IngestError, IngestResult};
use crate::types::progress::IngestProgress;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::path::Path;

const ZIP_MAGIC: &[&[u8]] = &[b"PK\x03\x04", b"PK\x05\x06"];
const SEVEN_Z_MAGIC: &[u8] = b"7z\xBC\xAF\x27\x1C";

/// Supported container format.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ArchiveFormat {
    Zip,
    SevenZ,
}

impl ArchiveFormat {
    /// Detect format from the leading magic bytes.
    pub fn sniff(header: &[u8]) -> Option<Self> {
        if ZIP_MAGIC.iter().any(|magic| header.starts_with(magic)) {
            Some(Self::Zip)
        } else if header.starts_with(SEVEN_Z_MAGIC) {
            Some(Self::SevenZ)
        } else {
            None
        }
    }
}

/// Running counters shared by both container walkers.
struct EntryProgress<'a, F: FnMut(IngestProgress)> {
    total: usize,
    processed: usize,
    skipped: usize,
    interval: usize,
    on_progress: &'a mut F,
}

impl<'a, F: FnMut(IngestProgress)> EntryProgress<'a, F> {
    fn new(total: usize, config: &IngestConfig, on_progress: &'a mut F) -> Self {
        Self {
            total,
            processed: 0,
            skipped: 0,
            interval: config.skip_progress_interval.max(1),
            on_progress,
        }
    }

    fn skipped(&mut self) {
        self.processed += 1;
        self.skipped += 1;
        if self.skipped % self.interval == 0 {
            (self.on_progress)(IngestProgress::entries(
                self.processed,
                self.total,
                format!("Scanning archive ({}/{})", self.processed, self.total),
            ));
        }
    }

    fn read(&mut self, name: &str) {
        self.processed += 1;
        (self.on_progress)(IngestProgress::entries(
            self.processed,
            self.total,
            format!("Reading {name}"),
        ));
    }
}

/// Read an archive held in memory.
pub fn read_archive_bytes<F>(
    bytes: &[u8],
    config: &IngestConfig,
    on_progress: &mut F,
) -> IngestResult<Vfc>
where
    F: FnMut(IngestProgress),
{
    let format = ArchiveFormat::sniff(bytes).ok_or_else(|| {
        IngestError::UnsupportedFormat("input is not a ZIP or 7z archive".to_string())
    })?;
    read_archive(Cursor::new(bytes), format, config, on_progress)
}

/// Read an archive from disk.
pub fn read_archive_file<F>(
    archive_path: &Path,
    config: &IngestConfig,
    on_progress: &mut F,
) -> IngestResult<Vfc>
where
    F: FnMut(IngestProgress),
{
    let mut file = fs::File::open(archive_path).map_err(|e| {
        IngestError::Io(format!(
            "Failed to open archive {}: {e}",
            archive_path.display()
        ))
    })?;

    let mut header = Vec::with_capacity(SEVEN_Z_MAGIC.len());
    (&mut file)
        .take(SEVEN_Z_MAGIC.len() as u64)
        .read_to_end(&mut header)?;
    file.seek(SeekFrom::Start(0))?;

    let format = ArchiveFormat::sniff(&header).ok_or_else(|| {
        IngestError::UnsupportedFormat(format!("{} is not a ZIP or 7z archive", archive_path.display()))
    })?;
    read_archive(file, format, config, on_progress)
}

fn read_archive<R, F>(
    reader: R,
    format: ArchiveFormat,
    config: &IngestConfig,
    on_progress: &mut F,
) -> IngestResult<Vfc>
where
    R: Read + Seek,
    F: FnMut(IngestProgress),
{
    let vfc = match format {
        ArchiveFormat::Zip => read_zip(reader, config, on_progress)?,
        ArchiveFormat::SevenZ => read_7z(reader, config, on_progress)?,
    };

    log::info!("Archive loaded: {} JSON documents retained", vfc.len());
    on_progress(IngestProgress::done(format!(
        "Loaded {} documents",
        vfc.len()
    )));
    Ok(vfc)
}

fn read_zip<R, F>(reader: R, config: &IngestConfig, on_progress: &mut F) -> IngestResult<Vfc>
where
    R: Read + Seek,
    F: FnMut(IngestProgress),
{
    let mut archive = zip::ZipArchive::new(reader)
        .map_err(|e| IngestError::Archive(format!("Invalid or corrupt ZIP: {e}")))?;

    let mut vfc = Vfc::new();
    let mut progress = EntryProgress::new(archive.len(), config, on_progress);

    for i in 0..archive.len() {
        let mut entry = match archive.by_index(i) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable ZIP entry {i}: {e}");
                progress.skipped();
                continue;
            }
        };

        let name = entry.name().to_string();
        if entry.is_dir() || !config.is_json_path(&name) {
            progress.skipped();
            continue;
        }

        if entry.size() > config.max_entry_bytes {
            log::warn!("Skipping oversized entry {name} ({} bytes)", entry.size());
            progress.skipped();
            continue;
        }

        match read_bounded(&mut entry, config.max_entry_bytes) {
            Ok(Some(bytes)) => {
                if let Some(text) = decode_entry(&name, &bytes) {
                    vfc.insert(&name, text);
                }
            }
            Ok(None) => log::warn!("Skipping entry {name}: larger than its declared size"),
            Err(e) => log::warn!("Skipping entry {name}: {e}"),
        }
        progress.read(&name);
    }

    Ok(vfc)
}

fn read_7z<R, F>(mut reader: R, config: &IngestConfig, on_progress: &mut F) -> IngestResult<Vfc>
where
    R: Read + Seek,
    F: FnMut(IngestProgress),
{
    // Headers only, gives progress a denominator without decoding any block.
    let len = reader.seek(SeekFrom::End(0))?;
    reader.seek(SeekFrom::Start(0))?;
    let total = sevenz_rust::Archive::read(&mut reader, len, &[])
        .map_err(|e| IngestError::Archive(format!("Failed to read 7z: {e}")))?
        .files
        .len();
    reader.seek(SeekFrom::Start(0))?;

    let mut vfc = Vfc::new();
    let mut progress = EntryProgress::new(total, config, on_progress);

    sevenz_rust::decompress_with_extract_fn(&mut reader, ".", |entry, entry_reader, _| {
        let name = entry.name().to_string();
        if entry.is_directory() || !config.is_json_path(&name) {
            drain(entry_reader, &name);
            progress.skipped();
            return Ok(true);
        }

        if entry.size() > config.max_entry_bytes {
            log::warn!("Skipping oversized entry {name} ({} bytes)", entry.size());
            drain(entry_reader, &name);
            progress.skipped();
            return Ok(true);
        }

        match read_bounded(&mut *entry_reader, config.max_entry_bytes) {
            Ok(Some(bytes)) => {
                if let Some(text) = decode_entry(&name, &bytes) {
                    vfc.insert(&name, text);
                }
            }
            Ok(None) => log::warn!("Skipping entry {name}: larger than its declared size"),
            Err(e) => log::warn!("Skipping entry {name}: {e}"),
        }
        drain(entry_reader, &name);
        progress.read(&name);
        Ok(true)
    })
    .map_err(|e| IngestError::Archive(format!("Failed to read 7z: {e}")))?;

    Ok(vfc)
}

/// Read at most `limit` bytes, `None` when the entry holds more.
fn read_bounded<R: Read + ?Sized>(reader: &mut R, limit: u64) -> io::Result<Option<Vec<u8>>> {
    let mut bytes = Vec::new();
    (&mut *reader)
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)?;
    Ok((bytes.len() as u64 <= limit).then_some(bytes))
}

/// Consume the rest of a 7z entry. Entries of a solid block share one
/// decoder, unread bytes would shift every entry after it.
fn drain(reader: &mut dyn Read, name: &str) {
    if let Err(e) = io::copy(reader, &mut io::sink()) {
        log::warn!("Failed to skip past entry {name}: {e}");
    }
}

#[cfg(test)]
#[path = "tests/archive_reader_tests.rs"]
mod tests;
