use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Europe::Prague;
use tracing::info;

use crate::clients::page::PageLauncher;
use crate::config::ScrapeWindow;
use crate::error::ScrapeError;
use crate::models::event::filter_target_activity;
use crate::service::aggregator::ScheduleSnapshot;
use crate::service::ics::render_calendar;
use crate::service::orchestrator::scrape_schedule;

/// The served feed plus the counts logged for each request.
#[derive(Debug, Clone)]
pub struct FeedDocument {
    pub ics: String,
    pub matched: usize,
    pub total: usize,
    pub entries: usize,
}

/// Scrapes, filters and renders the public skating feed. Holds no state
/// between calls; every call starts a new page session.
#[derive(Clone)]
pub struct CalendarFeed {
    launcher: Arc<dyn PageLauncher>,
    window: ScrapeWindow,
}

impl CalendarFeed {
    pub fn new(launcher: Arc<dyn PageLauncher>, window: ScrapeWindow) -> Self {
        Self { launcher, window }
    }

    pub async fn snapshot(&self, now: DateTime<Utc>) -> Result<ScheduleSnapshot, ScrapeError> {
        scrape_schedule(self.launcher.as_ref(), &self.window, local_today(now)).await
    }

    pub async fn build(&self, now: DateTime<Utc>) -> Result<FeedDocument, ScrapeError> {
        let snapshot = self.snapshot(now).await?;
        let matched = filter_target_activity(&snapshot.events);
        let document = render_calendar(&matched, now);
        info!(
            matched = matched.len(),
            total = snapshot.events.len(),
            entries = document.entries,
            "Built public skating feed"
        );
        Ok(FeedDocument {
            ics: document.content,
            matched: matched.len(),
            total: snapshot.events.len(),
            entries: document.entries,
        })
    }
}

/// Today's date at the rink.
pub fn local_today(now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&Prague).date_naive()
}
