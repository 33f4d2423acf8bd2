use chrono::NaiveDate;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::clients::page::{PageLauncher, SchedulePage};
use crate::config::ScrapeWindow;
use crate::error::ScrapeError;
use crate::models::event::WeekPayload;
use crate::service::aggregator::{EventAggregator, ScheduleSnapshot};
use crate::service::extractor::extract_week;
use crate::tasks::week_plan::{WeekPlan, WeekTask};

/// Walks the window one week at a time. The first failure aborts the walk.
pub async fn extract_weeks(
    page: &mut dyn SchedulePage,
    window: &ScrapeWindow,
    today: NaiveDate,
) -> Result<Vec<WeekPayload>, ScrapeError> {
    let plan = WeekPlan::for_window(today, window.weeks);
    let mut payloads = Vec::with_capacity(plan.len());

    for task in plan.into_tasks() {
        match task {
            WeekTask::Initial => {
                page.load_initial().await?;
            }
            WeekTask::Navigate { week, filter } => {
                debug!(week, filter = %filter, "Navigating to week");
                match timeout(window.page_load_timeout, page.navigate_to_week(&filter)).await {
                    Ok(result) => result?,
                    Err(_) => {
                        return Err(ScrapeError::Timeout {
                            stage: "week navigation",
                            after: window.page_load_timeout,
                        });
                    }
                }
            }
        }
        if !window.settle_delay.is_zero() {
            sleep(window.settle_delay).await;
        }

        let html = page.content().await?;
        let payload = extract_week(&html);
        debug!(
            events = payload.events.len(),
            dates = payload.week_dates.len(),
            "Extracted week"
        );
        payloads.push(payload);
    }

    Ok(payloads)
}

/// Runs one full scrape on a fresh page session. The session is closed
/// whether or not the scrape succeeds.
pub async fn scrape_schedule(
    launcher: &dyn PageLauncher,
    window: &ScrapeWindow,
    today: NaiveDate,
) -> Result<ScheduleSnapshot, ScrapeError> {
    let mut page = launcher.launch().await?;
    let result = extract_weeks(page.as_mut(), window, today).await;
    page.close().await;

    let payloads = result.inspect_err(|e| warn!(error = %e, "Scrape aborted"))?;
    let mut aggregator = EventAggregator::new();
    for payload in payloads {
        aggregator.fold(payload);
    }
    info!(events = aggregator.len(), weeks = window.weeks, "Scraped schedule");
    Ok(aggregator.finish())
}
