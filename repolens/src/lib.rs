//! RepoLens - cached GitHub showcase client with web-vitals telemetry.
//!
//! This library provides the data-access core for a repository showcase
//! application: an HTTP client that serves repository listings through a
//! TTL-bounded response cache, a set of pure analysis utilities over the
//! fetched repositories, and a performance-telemetry collector that
//! aggregates timing samples into a running quality score.
//!
//! The components are independent: the API client owns its cache, the
//! telemetry collector owns its sample history, and nothing is shared
//! between them. Both are explicitly constructed values; wire them into
//! your composition root and drop them to tear everything down.

pub mod analysis;
pub mod api;
pub mod cache;
pub mod config;
pub mod health;
pub mod telemetry;
