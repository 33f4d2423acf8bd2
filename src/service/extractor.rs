use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::models::event::{RawEventRecord, WeekPayload};
use crate::service::title::infer_title;

static DATE_HEADER: LazyLock<Selector> =
    LazyLock::new(|| selector(".calendar-date-header"));
static HEADER_DATE: LazyLock<Selector> =
    LazyLock::new(|| selector(".calendar-header-date"));
static DAY_CELL: LazyLock<Selector> =
    LazyLock::new(|| selector(".data-row.tyden > .tbl-data-cell"));
static TIMED_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("[data-start]"));

static CLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{2}:[0-9]{2}").expect("valid clock regex"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid built-in selector")
}

/// Reads the week currently rendered in `html`.
///
/// Column 0 of the day row is the row label and never holds events. Items
/// without `data-start` are not events. Missing or blank headers fall back to
/// a `Day {index}` label instead of failing.
pub fn extract_week(html: &str) -> WeekPayload {
    let document = Html::parse_document(html);

    let mut dates: BTreeMap<usize, String> = BTreeMap::new();
    for (index, header) in document.select(&DATE_HEADER).enumerate() {
        if let Some(date_el) = header.select(&HEADER_DATE).next() {
            dates.insert(index, element_text(date_el));
        }
    }

    let mut events = Vec::new();
    for (column_index, cell) in document.select(&DAY_CELL).enumerate() {
        if column_index == 0 {
            continue;
        }
        let date = dates
            .get(&column_index)
            .filter(|date| !date.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Day {}", column_index));

        for item in cell.select(&TIMED_ITEM) {
            if let Some(record) = read_item(item, &date, column_index) {
                events.push(record);
            }
        }
    }

    WeekPayload {
        events,
        week_dates: dates.into_values().collect(),
    }
}

fn read_item(item: ElementRef<'_>, date: &str, column_index: usize) -> Option<RawEventRecord> {
    let attrs = item.value();
    let start = attrs.attr("data-start")?;
    let id = attrs
        .attr("data-event")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    Some(RawEventRecord {
        id,
        date: date.to_string(),
        time: format_time(start, attrs.attr("data-end")),
        title: infer_title(&element_text(item)),
        column_index,
    })
}

/// `HH:MM` or `HH:MM - HH:MM`; an unrecognisable start is kept verbatim.
pub fn format_time(start: &str, end: Option<&str>) -> String {
    let start = CLOCK.find(start).map_or(start, |m| m.as_str());
    match end.and_then(|end| CLOCK.find(end)) {
        Some(end) => format!("{} - {}", start, end.as_str()),
        None => start.to_string(),
    }
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}
