use std::time::Duration;

use async_trait::async_trait;
use scraper::{Html, Selector};
use tokio::time::{sleep, timeout};
use tracing::{debug, info};

use crate::clients::page::{PageLauncher, SchedulePage};
use crate::config::ScrapeWindow;
use crate::error::ScrapeError;

const READY_POLL: Duration = Duration::from_millis(500);
const USER_AGENT: &str = concat!("rinkFeed/", env!("CARGO_PKG_VERSION"));

/// Launches [`HttpSchedulePage`] sessions that fetch the server-rendered page.
pub struct HttpPageLauncher {
    window: ScrapeWindow,
}

impl HttpPageLauncher {
    pub fn new(window: ScrapeWindow) -> Self {
        Self { window }
    }
}

#[async_trait]
impl PageLauncher for HttpPageLauncher {
    async fn launch(&self) -> Result<Box<dyn SchedulePage>, ScrapeError> {
        if Selector::parse(&self.window.ready_selector).is_err() {
            return Err(ScrapeError::Selector(self.window.ready_selector.clone()));
        }
        let client = reqwest::Client::builder()
            .timeout(self.window.page_load_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| ScrapeError::Launch(e.to_string()))?;
        Ok(Box::new(HttpSchedulePage {
            client: Some(client),
            url: self.window.schedule_url.clone(),
            week_param: self.window.week_param.clone(),
            ready_selector: self.window.ready_selector.clone(),
            page_load_timeout: self.window.page_load_timeout,
            ready_timeout: self.window.ready_timeout,
            html: None,
        }))
    }
}

/// Schedule page backed by plain HTTP requests. The week filter travels as a
/// query parameter; readiness means the ready selector is present in the body.
pub struct HttpSchedulePage {
    client: Option<reqwest::Client>,
    url: String,
    week_param: String,
    ready_selector: String,
    page_load_timeout: Duration,
    ready_timeout: Duration,
    html: Option<String>,
}

impl HttpSchedulePage {
    async fn fetch(&self, week_filter: Option<&str>) -> Result<String, ScrapeError> {
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| ScrapeError::Launch("page session already closed".to_string()))?;
        let mut request = client.get(&self.url);
        if let Some(filter) = week_filter {
            request = request.query(&[(self.week_param.as_str(), filter)]);
        }

        let response = request.send().await.map_err(|e| self.request_error(e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }
        response.text().await.map_err(|e| self.request_error(e))
    }

    fn request_error(&self, source: reqwest::Error) -> ScrapeError {
        if source.is_timeout() {
            ScrapeError::Timeout {
                stage: "page load",
                after: self.page_load_timeout,
            }
        } else {
            ScrapeError::Http {
                url: self.url.clone(),
                source,
            }
        }
    }

    async fn load_ready(&mut self, week_filter: Option<&str>) -> Result<(), ScrapeError> {
        let this = &*self;
        let body = load_until_ready(&this.ready_selector, this.ready_timeout, move || {
            this.fetch(week_filter)
        })
        .await?;
        self.html = Some(body);
        Ok(())
    }
}

/// Fetches once, then refetches until the ready marker shows up. The first
/// fetch is bounded by the client's page-load timeout; only the polling after
/// it counts against `ready_timeout`.
async fn load_until_ready<F, Fut>(
    css: &str,
    ready_timeout: Duration,
    mut fetch: F,
) -> Result<String, ScrapeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, ScrapeError>>,
{
    let body = fetch().await?;
    if has_marker(&body, css) {
        return Ok(body);
    }

    let poll = async {
        loop {
            debug!(selector = css, "Ready marker missing, polling again");
            sleep(READY_POLL).await;
            let body = fetch().await?;
            if has_marker(&body, css) {
                return Ok::<_, ScrapeError>(body);
            }
        }
    };

    match timeout(ready_timeout, poll).await {
        Ok(result) => result,
        Err(_) => Err(ScrapeError::Timeout {
            stage: "ready marker",
            after: ready_timeout,
        }),
    }
}

#[async_trait]
impl SchedulePage for HttpSchedulePage {
    async fn load_initial(&mut self) -> Result<(), ScrapeError> {
        info!(url = %self.url, "Loading schedule page");
        self.load_ready(None).await
    }

    async fn navigate_to_week(&mut self, week_filter: &str) -> Result<(), ScrapeError> {
        debug!(week = week_filter, "Filtering schedule to week");
        self.load_ready(Some(week_filter)).await
    }

    async fn content(&mut self) -> Result<String, ScrapeError> {
        self.html.clone().ok_or(ScrapeError::NotLoaded)
    }

    async fn close(&mut self) {
        self.client = None;
        self.html = None;
    }
}

fn has_marker(html: &str, css: &str) -> bool {
    let Ok(selector) = Selector::parse(css) else {
        return false;
    };
    Html::parse_document(html).select(&selector).next().is_some()
}
