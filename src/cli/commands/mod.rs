//! CLI command implementations

pub mod cache;
pub mod config;
pub mod generate;

pub use cache::execute as cache;
pub use config::execute as config;
pub use generate::execute as generate;
