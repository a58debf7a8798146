//! Input readers and the virtual file collection they build.

pub mod archive_reader;
mod decode;
pub mod directory_reader;
pub mod vfc;

pub use archive_reader::{read_archive_bytes, read_archive_file, ArchiveFormat};
pub use directory_reader::{read_directory, read_selected_files, SelectedFile};
pub use vfc::Vfc;
