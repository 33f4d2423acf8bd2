use std::sync::Arc;

use tracing::info;

use crate::clients::http_page::HttpPageLauncher;
use crate::config::Settings;
use crate::handlers::http;
use crate::service::feed::CalendarFeed;

pub fn build_feed(settings: &Settings) -> CalendarFeed {
    let launcher = Arc::new(HttpPageLauncher::new(settings.window.clone()));
    CalendarFeed::new(launcher, settings.window.clone())
}

pub async fn run_api(settings: Settings) {
    let feed = build_feed(&settings);
    let routes = http::routes(feed);

    info!(port = settings.port, "Calendar server running on http://localhost:{}", settings.port);
    info!("Subscribe to: http://localhost:{}/calendar.ics", settings.port);
    warp::serve(routes).run(([0, 0, 0, 0], settings.port)).await;
}
