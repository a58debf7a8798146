pub mod analyzer;
pub mod config;
pub mod extract;
pub mod ingest;
pub mod orchestrator;
pub mod utils;
