//! Shared helpers used by every extraction routine.

pub mod domain;
pub mod json;
pub mod numbers;
pub mod ranking;
pub mod time;

pub use domain::to_domain;
pub use json::{locate_array, records, safe_parse, Shape};
pub use numbers::safe_parse_int;
pub use ranking::{top_n, Tally};
