//! Domain building blocks shared by the database and API crates.
//!
//! Nothing in here performs I/O.

pub mod catalog;
pub mod error;
pub mod json_check;
pub mod types;
