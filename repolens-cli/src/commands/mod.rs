//! CLI command implementations.

pub mod repos;
pub mod serve;
pub mod vitals;
