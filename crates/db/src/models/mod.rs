//! Row types and repository input DTOs.

pub mod actor;
pub mod credential;
pub mod film;
