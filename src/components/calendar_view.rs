//! Calendar View
//!
//! Month/week/day grid over due-dated tasks. Each visible window is
//! fetched once and memoized; navigation to a new window refetches,
//! navigation back to the same window does not. Any mutation (reload
//! trigger) drops the memo.

use chrono::{Datelike, Duration, Local, NaiveDate};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::calendar::{day_buckets, CalendarCache, CalendarGranularity, DayCell, RangeKey};
use crate::commands;
use crate::context::use_app_context;
use crate::models::Task;
use crate::scope::{Scope, SmartView, TaskQuery};

fn key_for(granularity: CalendarGranularity, anchor: NaiveDate) -> RangeKey {
    match granularity {
        CalendarGranularity::Month => RangeKey::month_of(anchor),
        CalendarGranularity::Week => RangeKey::week_of(anchor),
        CalendarGranularity::Day => RangeKey::day_of(anchor),
    }
}

fn granularity_button(
    label: &'static str,
    value: CalendarGranularity,
    granularity: RwSignal<CalendarGranularity>,
) -> impl IntoView {
    view! {
        <button
            class=move || {
                if granularity.get() == value { "gran-btn active" } else { "gran-btn" }
            }
            on:click=move |_| granularity.set(value)
        >
            {label}
        </button>
    }
}

#[component]
fn DayCellView(
    cell: DayCell,
    today: NaiveDate,
    set_show_calendar: WriteSignal<bool>,
) -> impl IntoView {
    let ctx = use_app_context();
    let date = cell.date;
    let is_today = date == today;

    view! {
        <div
            class=if is_today { "day-cell today" } else { "day-cell" }
            on:click=move |_| {
                ctx.select_scope(Scope::Smart(SmartView::Day(date)));
                set_show_calendar.set(false);
            }
        >
            <span class="day-number">{date.day()}</span>
            {cell
                .shown
                .iter()
                .map(|task| {
                    view! { <span class="day-task">{task.title.clone()}</span> }
                })
                .collect_view()}
            {(cell.overflow > 0)
                .then(|| view! { <span class="day-overflow">{format!("+{}", cell.overflow)}</span> })}
        </div>
    }
}

#[component]
pub fn CalendarView(set_show_calendar: WriteSignal<bool>) -> impl IntoView {
    let ctx = use_app_context();

    let granularity = RwSignal::new(CalendarGranularity::Month);
    let anchor = RwSignal::new(Local::now().date_naive());
    let cache = RwSignal::new(CalendarCache::new());
    let (window, set_window) = signal(None::<(RangeKey, Vec<Task>)>);

    // Resolve the visible window: cache hit renders immediately, miss
    // fetches the range and memoizes it. A mutation (reload trigger)
    // drops the memo first, so the same window refetches.
    Effect::new(move |prev: Option<u32>| {
        let trigger = ctx.reload_trigger.get();
        if prev.is_some_and(|p| p != trigger) {
            cache.update(|c| c.invalidate());
        }
        let key = key_for(granularity.get(), anchor.get());
        if let Some(tasks) = cache.read_untracked().get(&key) {
            set_window.set(Some((key, tasks.to_vec())));
            return trigger;
        }
        spawn_local(async move {
            let query = TaskQuery::due_range(key.from, key.to);
            match commands::list_tasks(&query).await {
                Ok(tasks) => {
                    cache.update(|c| c.put(key, tasks.clone()));
                    set_window.set(Some((key, tasks)));
                }
                Err(e) => {
                    // The previous window stays visible.
                    ctx.report_failure("loading calendar", &e);
                }
            }
        });
        trigger
    });

    let step = move |forward: bool| {
        let key = key_for(granularity.get_untracked(), anchor.get_untracked());
        // Stepping lands just outside the current window, so the next
        // resolved key is the adjacent one.
        let next = if forward {
            key.to + Duration::days(1)
        } else {
            key.from - Duration::days(1)
        };
        anchor.set(next);
    };

    let heading = move || {
        let key = key_for(granularity.get(), anchor.get());
        match key.granularity {
            CalendarGranularity::Month => key.from.format("%B %Y").to_string(),
            CalendarGranularity::Week => format!(
                "{} \u{2013} {}",
                key.from.format("%b %-d"),
                key.to.format("%b %-d, %Y")
            ),
            CalendarGranularity::Day => key.from.format("%A, %B %-d, %Y").to_string(),
        }
    };

    view! {
        <div class="calendar-view">
            <header class="calendar-toolbar">
                <button class="nav-btn" on:click=move |_| step(false)>
                    "\u{2039}"
                </button>
                <span class="calendar-heading">{heading}</span>
                <button class="nav-btn" on:click=move |_| step(true)>
                    "\u{203a}"
                </button>
                <button class="nav-btn" on:click=move |_| anchor.set(Local::now().date_naive())>
                    "Today"
                </button>
                {granularity_button("Month", CalendarGranularity::Month, granularity)}
                {granularity_button("Week", CalendarGranularity::Week, granularity)}
                {granularity_button("Day", CalendarGranularity::Day, granularity)}
            </header>

            <div class=move || match granularity.get() {
                CalendarGranularity::Month => "calendar-grid month",
                CalendarGranularity::Week => "calendar-grid week",
                CalendarGranularity::Day => "calendar-grid day",
            }>
                {move || {
                    let today = Local::now().date_naive();
                    window
                        .get()
                        .map(|(key, tasks)| {
                            day_buckets(&key, &tasks)
                                .into_iter()
                                .map(|cell| view! { <DayCellView cell=cell today=today set_show_calendar=set_show_calendar /> })
                                .collect_view()
                        })
                }}
            </div>
        </div>
    }
}
