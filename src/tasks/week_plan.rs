use chrono::{Datelike, Duration, NaiveDate};

/// One step of a scrape. Steps run strictly in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekTask {
    /// Week 0: the page's default view, no navigation.
    Initial,
    /// Week `week`: filter the view to the week containing `filter` (`D.M.YYYY`).
    Navigate { week: usize, filter: String },
}

pub struct WeekPlan {
    tasks: Vec<WeekTask>,
}

impl WeekPlan {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Current week plus `weeks - 1` following weeks, counted from `today`.
    pub fn for_window(today: NaiveDate, weeks: usize) -> Self {
        let mut plan = Self::new();
        for week in 0..weeks {
            if week == 0 {
                plan.add_task(WeekTask::Initial);
            } else {
                let target = today + Duration::days(7 * week as i64);
                plan.add_task(WeekTask::Navigate {
                    week,
                    filter: week_filter(target),
                });
            }
        }
        plan
    }

    pub fn add_task(&mut self, task: WeekTask) {
        self.tasks.push(task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn into_tasks(self) -> Vec<WeekTask> {
        self.tasks
    }
}

impl Default for WeekPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// `D.M.YYYY` without zero padding, as the page's week filter expects.
pub fn week_filter(date: NaiveDate) -> String {
    format!("{}.{}.{}", date.day(), date.month(), date.year())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_unpadded() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(week_filter(date), "5.1.2026");
        let date = NaiveDate::from_ymd_opt(2026, 11, 23).unwrap();
        assert_eq!(week_filter(date), "23.11.2026");
    }

    #[test]
    fn window_starts_with_initial_then_weekly_steps() {
        let today = NaiveDate::from_ymd_opt(2025, 12, 22).unwrap();
        let tasks = WeekPlan::for_window(today, 3).into_tasks();
        assert_eq!(
            tasks,
            vec![
                WeekTask::Initial,
                WeekTask::Navigate {
                    week: 1,
                    filter: "29.12.2025".to_string()
                },
                WeekTask::Navigate {
                    week: 2,
                    filter: "5.1.2026".to_string()
                },
            ]
        );
    }

    #[test]
    fn empty_window_has_no_tasks() {
        let today = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert!(WeekPlan::for_window(today, 0).is_empty());
        assert_eq!(WeekPlan::for_window(today, 1).len(), 1);
    }
}
