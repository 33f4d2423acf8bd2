use std::convert::Infallible;

use chrono::Utc;
use serde::Serialize;
use tracing::{error, info};
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

use crate::service::feed::CalendarFeed;

pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
pub const CALENDAR_DISPOSITION: &str = "attachment; filename=\"gaf-arena.ics\"";
pub const FAILURE_MESSAGE: &str = "Failed to fetch calendar data";

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: String,
}

/// `GET /calendar.ics` and `GET /health`, with every request logged.
pub fn routes(feed: CalendarFeed) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone {
    let calendar = warp::path("calendar.ics")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::any().map(move || feed.clone()))
        .and_then(calendar_handler);

    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .and_then(health_handler);

    calendar.or(health).with(warp::log::custom(|req| {
        info!(
            method = %req.method(),
            path = req.path(),
            status = req.status().as_u16(),
            elapsed_ms = req.elapsed().as_millis() as u64,
            "Handled request"
        );
    }))
}

/// Runs a full scrape per request. Failures become a plain-text 500; no
/// partial calendar is ever returned.
pub async fn calendar_handler(feed: CalendarFeed) -> Result<Response, Infallible> {
    info!("ICS request received");
    match feed.build(Utc::now()).await {
        Ok(document) => {
            info!(
                matched = document.matched,
                total = document.total,
                "Served public skating events"
            );
            Ok(calendar_response(document.ics))
        }
        Err(e) => {
            error!(error = %e, "Scraping failed");
            Ok(warp::reply::with_status(FAILURE_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR)
                .into_response())
        }
    }
}

pub async fn health_handler() -> Result<Response, Infallible> {
    let status = HealthStatus {
        status: "ok",
        timestamp: Utc::now().to_rfc3339(),
    };
    Ok(warp::reply::json(&status).into_response())
}

fn calendar_response(ics: String) -> Response {
    let reply = warp::reply::with_header(ics, "Content-Type", CALENDAR_CONTENT_TYPE);
    warp::reply::with_header(reply, "Content-Disposition", CALENDAR_DISPOSITION).into_response()
}
