#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use rinkFeed::clients::page::{PageLauncher, SchedulePage};
use rinkFeed::config::ScrapeWindow;
use rinkFeed::error::ScrapeError;

/// One schedule item: (data-event, data-start, data-end, text). Empty strings
/// leave the attribute out.
pub type Item<'a> = (&'a str, &'a str, &'a str, &'a str);

/// Renders a week the way the schedule page does: a header per column
/// (column 0 is the label column) and one `.tbl-data-cell` per day.
pub fn week_html(dates: &[&str], days: &[&[Item<'_>]]) -> String {
    let mut html = String::from("<html><body><div id=\"publish\">");
    html.push_str("<div class=\"calendar-date-header\"></div>");
    for date in dates {
        html.push_str(&format!(
            "<div class=\"calendar-date-header\"><span class=\"calendar-header-date\">{}</span></div>",
            date
        ));
    }
    html.push_str("<div class=\"data-row tyden\"><div class=\"tbl-data-cell\">Čas</div>");
    for day in days {
        html.push_str("<div class=\"tbl-data-cell\">");
        for (id, start, end, text) in day.iter() {
            let mut attrs = String::new();
            if !id.is_empty() {
                attrs.push_str(&format!(" data-event=\"{}\"", id));
            }
            if !start.is_empty() {
                attrs.push_str(&format!(" data-start=\"{}\"", start));
            }
            if !end.is_empty() {
                attrs.push_str(&format!(" data-end=\"{}\"", end));
            }
            html.push_str(&format!("<div class=\"event\"{}>{}</div>", attrs, text));
        }
        html.push_str("</div>");
    }
    html.push_str("</div></div></body></html>");
    html
}

pub fn skating_text(start: &str, end: &str) -> String {
    format!(
        "{} - {}- Správa sportovišť města Žamberk-Veřejné bruslení",
        start, end
    )
}

#[derive(Debug, Default)]
pub struct PageLog {
    pub calls: Vec<String>,
    pub launches: usize,
    pub closed: usize,
}

#[derive(Clone)]
pub struct FakeLauncher {
    pub weeks: Vec<String>,
    pub fail_navigation_at: Option<usize>,
    pub navigation_delay: Option<Duration>,
    pub log: Arc<Mutex<PageLog>>,
}

impl FakeLauncher {
    pub fn new(weeks: Vec<String>) -> Self {
        Self {
            weeks,
            fail_navigation_at: None,
            navigation_delay: None,
            log: Arc::new(Mutex::new(PageLog::default())),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().calls.clone()
    }

    pub fn closed(&self) -> usize {
        self.log.lock().unwrap().closed
    }

    pub fn launches(&self) -> usize {
        self.log.lock().unwrap().launches
    }
}

#[async_trait]
impl PageLauncher for FakeLauncher {
    async fn launch(&self) -> Result<Box<dyn SchedulePage>, ScrapeError> {
        self.log.lock().unwrap().launches += 1;
        Ok(Box::new(FakePage {
            launcher: self.clone(),
            current: None,
            navigations: 0,
        }))
    }
}

pub struct FakePage {
    launcher: FakeLauncher,
    current: Option<usize>,
    navigations: usize,
}

impl FakePage {
    fn record(&self, call: String) {
        self.launcher.log.lock().unwrap().calls.push(call);
    }
}

#[async_trait]
impl SchedulePage for FakePage {
    async fn load_initial(&mut self) -> Result<(), ScrapeError> {
        self.record("load".to_string());
        self.current = Some(0);
        Ok(())
    }

    async fn navigate_to_week(&mut self, week_filter: &str) -> Result<(), ScrapeError> {
        self.record(format!("navigate:{}", week_filter));
        self.navigations += 1;
        if let Some(delay) = self.launcher.navigation_delay {
            tokio::time::sleep(delay).await;
        }
        if self.launcher.fail_navigation_at == Some(self.navigations) {
            return Err(ScrapeError::Navigation {
                week: self.navigations,
                reason: "filter form missing".to_string(),
            });
        }
        self.current = Some(self.navigations);
        Ok(())
    }

    async fn content(&mut self) -> Result<String, ScrapeError> {
        self.record("content".to_string());
        let index = self.current.ok_or(ScrapeError::NotLoaded)?;
        Ok(self.launcher.weeks.get(index).cloned().unwrap_or_default())
    }

    async fn close(&mut self) {
        self.launcher.log.lock().unwrap().closed += 1;
    }
}

pub fn window(weeks: usize) -> ScrapeWindow {
    ScrapeWindow {
        weeks,
        settle_delay: Duration::ZERO,
        ..ScrapeWindow::default()
    }
}
