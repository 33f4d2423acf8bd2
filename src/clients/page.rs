use async_trait::async_trait;

use crate::error::ScrapeError;

/// A rendered view of the schedule page. It holds one week at a time, so
/// callers must not navigate concurrently.
#[async_trait]
pub trait SchedulePage: Send {
    /// Opens the default (current) week and waits until it is ready.
    async fn load_initial(&mut self) -> Result<(), ScrapeError>;

    /// Filters the view to the week containing `week_filter` (`D.M.YYYY`).
    async fn navigate_to_week(&mut self, week_filter: &str) -> Result<(), ScrapeError>;

    /// HTML of the week currently shown.
    async fn content(&mut self) -> Result<String, ScrapeError>;

    async fn close(&mut self);
}

/// Opens a fresh page session per scrape.
#[async_trait]
pub trait PageLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn SchedulePage>, ScrapeError>;
}
