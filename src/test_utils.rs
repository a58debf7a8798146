use crate::services::ingest::vfc::Vfc;
use std::io::{Cursor, Write};
use std::sync::Once;
use zip::write::SimpleFileOptions;

static INIT: Once = Once::new();

pub fn init_test_logger() {
    INIT.call_once(|| {
        // Initialize logger only once
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Build an in-memory ZIP. Names ending in `/` become directory markers.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for (name, contents) in entries {
        if name.ends_with('/') {
            writer
                .add_directory(name.trim_end_matches('/'), options)
                .expect("add directory");
        } else {
            writer.start_file(*name, options).expect("start file");
            writer.write_all(contents).expect("write entry");
        }
    }

    writer.finish().expect("finish zip").into_inner()
}

/// Build a collection straight from `(path, json)` pairs.
pub fn vfc_from(entries: &[(&str, &str)]) -> Vfc {
    let mut vfc = Vfc::new();
    for (path, text) in entries {
        vfc.insert(path, text.to_string());
    }
    vfc
}

/// Build an in-memory 7z. Names ending in `/` become directory entries, all
/// files share one solid block in the given order.
pub fn sevenz_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    use sevenz_rust::{SeqReader, SevenZArchiveEntry, SevenZWriter, SourceReader};

    let mut writer = SevenZWriter::new(Cursor::new(Vec::new())).expect("create 7z writer");
    let mut files = Vec::new();
    let mut readers: Vec<SourceReader<&[u8]>> = Vec::new();

    for (name, contents) in entries {
        let mut entry = SevenZArchiveEntry::new();
        entry.name = name.trim_end_matches('/').to_string();
        if name.ends_with('/') {
            entry.is_directory = true;
            writer
                .push_archive_entry::<&[u8]>(entry, None)
                .expect("add directory");
        } else {
            entry.has_stream = true;
            files.push(entry);
            readers.push(SourceReader::from(*contents));
        }
    }

    writer
        .push_archive_entries(files, SeqReader::from(readers))
        .expect("write solid block");
    writer.finish().expect("finish 7z").into_inner()
}
