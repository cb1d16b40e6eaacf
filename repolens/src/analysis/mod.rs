//! Pure analysis utilities over fetched repositories.
//!
//! Everything in this module is a stateless function of its inputs:
//! health classification, activity scoring, display formatting, language
//! colors, and filtering/sorting. None of it touches the cache or the
//! network.

mod activity;
mod colors;
mod format;
mod health;
mod sort;

pub use activity::{activity_score, RECENCY_BONUS_MAX};
pub use colors::{language_color, DEFAULT_LANGUAGE_COLOR};
pub use format::{format_relative_time, format_size};
pub use health::{classify, health_score, HealthLabel, RECENT_UPDATE_WINDOW_DAYS};
pub use sort::{filter_repositories, sort_repositories, RepoFilter, SortDirection, SortKey};
