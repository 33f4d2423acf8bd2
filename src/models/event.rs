use serde::{Deserialize, Serialize};

/// Title used when nothing meaningful survives title inference.
pub const PLACEHOLDER_TITLE: &str = "-";

const TARGET_ACTIVITY: &str = "veřejné bruslení";
const TARGET_ACTIVITY_ASCII: &str = "verejne brusleni";

/// One schedule item as read from a rendered week view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEventRecord {
    pub id: Option<String>,
    pub date: String,
    pub time: String,
    pub title: String,
    pub column_index: usize,
}

/// Everything visible for one navigated week.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekPayload {
    pub events: Vec<RawEventRecord>,
    pub week_dates: Vec<String>,
}

/// A deduplicated event, unique by [`CanonicalEvent::identity_key`] within one aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalEvent {
    pub id: Option<String>,
    pub date: String,
    pub time: String,
    pub title: String,
    pub column_index: usize,
}

impl RawEventRecord {
    pub fn identity_key(&self) -> String {
        identity_key(self.id.as_deref(), &self.date, &self.time, &self.title)
    }
}

impl CanonicalEvent {
    pub fn identity_key(&self) -> String {
        identity_key(self.id.as_deref(), &self.date, &self.time, &self.title)
    }

    pub fn is_target_activity(&self) -> bool {
        is_target_activity(&self.title)
    }

    pub fn has_placeholder_title(&self) -> bool {
        self.title == PLACEHOLDER_TITLE
    }
}

impl From<RawEventRecord> for CanonicalEvent {
    fn from(raw: RawEventRecord) -> Self {
        Self {
            id: raw.id,
            date: raw.date,
            time: raw.time,
            title: raw.title,
            column_index: raw.column_index,
        }
    }
}

fn identity_key(id: Option<&str>, date: &str, time: &str, title: &str) -> String {
    match id {
        Some(id) => id.to_string(),
        None => format!("{}-{}-{}", date, time, title),
    }
}

/// Public skating, matched with or without diacritics.
pub fn is_target_activity(title: &str) -> bool {
    let lower = title.to_lowercase();
    lower.contains(TARGET_ACTIVITY) || lower.contains(TARGET_ACTIVITY_ASCII)
}

/// Events that belong in the feed. Order is preserved.
pub fn filter_target_activity(events: &[CanonicalEvent]) -> Vec<CanonicalEvent> {
    events
        .iter()
        .filter(|event| event.is_target_activity())
        .cloned()
        .collect()
}
