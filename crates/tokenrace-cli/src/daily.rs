//! Daily archive manifest schema and UTC date helpers.
//!
//! The archive assigns one game to each calendar day; a month manifest maps
//! `YYYY-MM-DD` day keys to the game played that day plus the best model
//! and score, which is all the calendar front end needs to render a cell.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tokenrace_race::metadata::nice_model_name;

/// One archived day: the game shown and who won it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyDay {
    pub game_id: String,
    pub game_url: String,
    pub game_type: String,
    pub best_model: String,
    pub best_score: f64,
}

/// Month manifest keyed by `YYYY-MM-DD`; `BTreeMap` keeps days sorted.
pub type DailyMonth = BTreeMap<String, DailyDay>;

/// Parse a strict `YYYY-MM-DD` day key.
#[must_use]
pub fn parse_day_key(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || bytes[4] != b'-' || bytes[7] != b'-' {
        return None;
    }
    if !value
        .chars()
        .enumerate()
        .all(|(i, c)| matches!(i, 4 | 7) || c.is_ascii_digit())
    {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// `YYYY-MM-DD` key for a date.
#[must_use]
pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `YYYY-MM` key for a date's month.
#[must_use]
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// All days of a month in order, or `None` for an invalid year/month.
#[must_use]
pub fn days_in_month(year: i32, month: u32) -> Option<Vec<NaiveDate>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut days = Vec::new();
    let mut current = first;
    while current.month() == month {
        days.push(current);
        current = current.succ_opt()?;
    }
    Some(days)
}

/// Monday on or before `date`.
#[must_use]
pub fn start_of_week_monday(date: NaiveDate) -> NaiveDate {
    let back = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(back)).unwrap_or(date)
}

/// Monday-start grid covering a month: six weeks of seven days, leading and
/// trailing cells spilling into the neighbor months.
#[must_use]
pub fn month_grid_monday(year: i32, month: u32) -> Option<Vec<Vec<NaiveDate>>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let mut current = start_of_week_monday(first);

    let mut grid = Vec::with_capacity(6);
    for _ in 0..6 {
        let mut week = Vec::with_capacity(7);
        for _ in 0..7 {
            week.push(current);
            current = current.succ_opt()?;
        }
        grid.push(week);
    }
    Some(grid)
}

/// Accessible one-line description of an archived day.
#[must_use]
pub fn day_meta_label(day: &DailyDay) -> String {
    format!(
        "{}. Best: {}. Score {}",
        day.game_type,
        nice_model_name(&day.best_model),
        day.best_score
    )
}
