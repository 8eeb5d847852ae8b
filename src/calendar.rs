//! Calendar Range Cache
//!
//! One memoized task window per visible calendar range. The cache key
//! is the view granularity plus the resolved `[from, to]` pair; any
//! navigation that changes the resolved window changes the key and
//! forces exactly one refetch.

use std::collections::HashMap;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::models::Task;

/// Tasks shown per day cell before collapsing into an overflow count.
pub const DAY_DISPLAY_CAP: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CalendarGranularity {
    Month,
    Week,
    Day,
}

/// Identity of one visible window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RangeKey {
    pub granularity: CalendarGranularity,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl RangeKey {
    /// The month containing `anchor`, first day through last day.
    pub fn month_of(anchor: NaiveDate) -> RangeKey {
        let from = anchor.with_day(1).unwrap_or(anchor);
        let to = if from.month() == 12 {
            NaiveDate::from_ymd_opt(from.year() + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(from.year(), from.month() + 1, 1)
        }
        .map(|next| next - Duration::days(1))
        .unwrap_or(anchor);
        RangeKey {
            granularity: CalendarGranularity::Month,
            from,
            to,
        }
    }

    /// The Monday-based week containing `anchor`.
    pub fn week_of(anchor: NaiveDate) -> RangeKey {
        let back = anchor.weekday().num_days_from_monday() as i64;
        let from = anchor - Duration::days(back);
        RangeKey {
            granularity: CalendarGranularity::Week,
            from,
            to: from + Duration::days(6),
        }
    }

    /// A single day.
    pub fn day_of(anchor: NaiveDate) -> RangeKey {
        RangeKey {
            granularity: CalendarGranularity::Day,
            from: anchor,
            to: anchor,
        }
    }
}

/// One day cell of the rendered window.
#[derive(Clone, Debug, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    /// At most [`DAY_DISPLAY_CAP`] tasks, in due/creation order.
    pub shown: Vec<Task>,
    /// Tasks beyond the cap, summarized as a count.
    pub overflow: usize,
}

/// Distribute a window's tasks into per-day cells, one per date in
/// `[key.from, key.to]`. Tasks without a due date inside the window
/// were never fetched, so every task lands in exactly one cell.
pub fn day_buckets(key: &RangeKey, tasks: &[Task]) -> Vec<DayCell> {
    let mut by_day: HashMap<NaiveDate, Vec<Task>> = HashMap::new();
    for task in tasks {
        if let Some(due) = task.due_date {
            if due >= key.from && due <= key.to {
                by_day.entry(due).or_default().push(task.clone());
            }
        }
    }

    let mut cells = Vec::new();
    let mut date = key.from;
    while date <= key.to {
        let mut day_tasks = by_day.remove(&date).unwrap_or_default();
        let overflow = day_tasks.len().saturating_sub(DAY_DISPLAY_CAP);
        day_tasks.truncate(DAY_DISPLAY_CAP);
        cells.push(DayCell {
            date,
            shown: day_tasks,
            overflow,
        });
        date += Duration::days(1);
    }
    cells
}

/// Memoizes the most recent window. Navigation changes the key; a load
/// against the cached key is a hit and must not refetch.
#[derive(Clone, Debug, Default)]
pub struct CalendarCache {
    cached: Option<(RangeKey, Vec<Task>)>,
}

impl CalendarCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tasks for `key` if this exact window is already loaded.
    pub fn get(&self, key: &RangeKey) -> Option<&[Task]> {
        match &self.cached {
            Some((cached_key, tasks)) if cached_key == key => Some(tasks),
            _ => None,
        }
    }

    /// Store the freshly fetched window, displacing the previous one.
    pub fn put(&mut self, key: RangeKey, tasks: Vec<Task>) {
        self.cached = Some((key, tasks));
    }

    /// Drop the cached window (after any task mutation, so the next
    /// look re-fetches).
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task(id: &str, due: NaiveDate) -> Task {
        Task {
            id: id.into(),
            list_id: "l1".into(),
            section_id: None,
            title: id.into(),
            notes: None,
            due_date: Some(due),
            tags: vec![],
            priority: 0,
            completed: false,
            position: 0,
            created_at: 0,
        }
    }

    #[test]
    fn test_month_key_spans_first_to_last_day() {
        let key = RangeKey::month_of(date(2025, 2, 14));
        assert_eq!(key.from, date(2025, 2, 1));
        assert_eq!(key.to, date(2025, 2, 28));
        let dec = RangeKey::month_of(date(2024, 12, 25));
        assert_eq!(dec.from, date(2024, 12, 1));
        assert_eq!(dec.to, date(2024, 12, 31));
    }

    #[test]
    fn test_week_key_is_monday_based() {
        // 2025-03-12 is a Wednesday.
        let key = RangeKey::week_of(date(2025, 3, 12));
        assert_eq!(key.from, date(2025, 3, 10));
        assert_eq!(key.to, date(2025, 3, 16));
    }

    #[test]
    fn test_same_window_twice_is_a_hit() {
        let mut cache = CalendarCache::new();
        let key = RangeKey::month_of(date(2025, 3, 1));
        assert!(cache.get(&key).is_none(), "first look must miss");
        cache.put(key, vec![task("a", date(2025, 3, 5))]);
        assert!(cache.get(&key).is_some(), "second look must hit");
    }

    #[test]
    fn test_adjacent_month_and_back_misses_then_hits() {
        let mut cache = CalendarCache::new();
        let march = RangeKey::month_of(date(2025, 3, 1));
        let april = RangeKey::month_of(date(2025, 4, 1));

        cache.put(march, vec![]);
        assert!(cache.get(&april).is_none(), "adjacent month is a miss");
        cache.put(april, vec![]);
        // The single-window cache displaced March; going back misses
        // once, then hits.
        assert!(cache.get(&march).is_none());
        cache.put(march, vec![]);
        assert!(cache.get(&march).is_some());
    }

    #[test]
    fn test_drilling_into_a_day_changes_the_key() {
        let month = RangeKey::month_of(date(2025, 3, 1));
        let day = RangeKey::day_of(date(2025, 3, 5));
        assert_ne!(month, day);
    }

    #[test]
    fn test_day_buckets_cover_window_and_cap_overflow() {
        let key = RangeKey::week_of(date(2025, 3, 12));
        let tasks = vec![
            task("a", date(2025, 3, 10)),
            task("b", date(2025, 3, 10)),
            task("c", date(2025, 3, 10)),
            task("d", date(2025, 3, 10)),
            task("e", date(2025, 3, 10)),
            task("f", date(2025, 3, 16)),
        ];
        let cells = day_buckets(&key, &tasks);
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[0].shown.len(), DAY_DISPLAY_CAP);
        assert_eq!(cells[0].overflow, 2);
        assert_eq!(cells[6].shown.len(), 1);
        assert_eq!(cells[6].overflow, 0);
        assert!(cells[1..6].iter().all(|c| c.shown.is_empty()));
    }
}
