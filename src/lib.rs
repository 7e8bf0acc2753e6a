//! GitHub repository traffic analytics.
//!
//! Fetches views, clones, referrers, popular paths and repository metadata
//! from the GitHub REST API, summarizes the 14-day window, renders a text
//! report and saves the full report as JSON.

pub mod config;
pub mod data;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod render;
pub mod summary;

pub use config::{Config, Credentials};
pub use error::TrafficError;
pub use fetcher::TrafficReportBuilder;
pub use models::Report;
