//! Top-bar clock text and the calendar month grid.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone};

/// Fixed six-week calendar grid, Sunday-first.
pub const GRID_CELLS: usize = 42;

/// Top-bar clock label, e.g. "Mon 13:45".
pub fn clock_text<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    now.format("%a %H:%M").to_string()
}

/// Calendar header, e.g. "August 2026".
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    /// False for the dimmed lead-in and tail days of adjacent months.
    pub in_month: bool,
    pub is_today: bool,
}

/// The 42 cells of the month containing `today`. Cells before the first and
/// after the last day of the month belong to the adjacent months and are
/// marked not-in-month.
pub fn month_grid(today: NaiveDate) -> [DayCell; GRID_CELLS] {
    let first = today - Duration::days(i64::from(today.day()) - 1);
    let start = first - Duration::days(i64::from(first.weekday().num_days_from_sunday()));
    let mut cells = [DayCell {
        day: 0,
        in_month: false,
        is_today: false,
    }; GRID_CELLS];
    for (i, cell) in cells.iter_mut().enumerate() {
        let date = start + Duration::days(i as i64);
        *cell = DayCell {
            day: date.day(),
            in_month: date.month() == today.month() && date.year() == today.year(),
            is_today: date == today,
        };
    }
    cells
}
