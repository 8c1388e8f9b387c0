//! statcard - GitHub activity stats card
//!
//! Collects a user's repository and commit activity from the GitHub GraphQL
//! API, keeps per-repository results in an incremental cache, and renders a
//! console-themed SVG card with a language pie chart.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod render;
pub mod stats;
pub mod ui;

pub use error::{CacheFormatError, StatcardError, StatcardResult};
