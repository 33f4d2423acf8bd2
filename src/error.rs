use std::time::Duration;

use thiserror::Error;

/// Failures of the page session. Any of these aborts the whole scrape.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Failed to open page session: {0}")]
    Launch(String),

    #[error("Request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Page {url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{stage} timed out after {after:?}")]
    Timeout { stage: &'static str, after: Duration },

    #[error("Invalid selector `{0}`")]
    Selector(String),

    #[error("Navigation to week {week} failed: {reason}")]
    Navigation { week: usize, reason: String },

    #[error("No page content loaded")]
    NotLoaded,
}

/// A single event whose date or time text cannot be turned into a calendar entry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventFormatError {
    #[error("Unparseable date `{0}`")]
    Date(String),

    #[error("Unparseable time `{0}`")]
    Time(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config line {line}: {content}")]
    Line { line: usize, content: String },

    #[error("Invalid value for {key}: {value}")]
    Value { key: String, value: String },
}
