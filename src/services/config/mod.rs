pub mod models;

pub use models::*;

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
