use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::event::{CanonicalEvent, WeekPayload};

/// Result of one scrape: unique events and every date header seen, both in
/// first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSnapshot {
    pub events: Vec<CanonicalEvent>,
    pub week_dates: Vec<String>,
}

/// Folds week payloads into one deduplicated list. Build one per scrape.
#[derive(Debug, Default)]
pub struct EventAggregator {
    seen_keys: HashSet<String>,
    seen_dates: HashSet<String>,
    snapshot: ScheduleSnapshot,
}

impl EventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The first event with a given identity key wins; later ones are dropped.
    pub fn fold(&mut self, payload: WeekPayload) {
        for raw in payload.events {
            if self.seen_keys.insert(raw.identity_key()) {
                self.snapshot.events.push(raw.into());
            }
        }
        for date in payload.week_dates {
            if self.seen_dates.insert(date.clone()) {
                self.snapshot.week_dates.push(date);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.snapshot.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.events.is_empty()
    }

    pub fn finish(self) -> ScheduleSnapshot {
        self.snapshot
    }
}

pub fn aggregate<I>(payloads: I) -> ScheduleSnapshot
where
    I: IntoIterator<Item = WeekPayload>,
{
    let mut aggregator = EventAggregator::new();
    for payload in payloads {
        aggregator.fold(payload);
    }
    aggregator.finish()
}
