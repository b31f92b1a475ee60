use chrono::{Datelike, Local, Months, NaiveDate};
use std::ops::RangeInclusive;

/// Years offered by the direct year selector.
pub const SELECTABLE_YEARS: RangeInclusive<i32> = 2015..=2035;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const WEEKDAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// The displayed `(year, month)` pair. Months are zero-based (0 = January).
///
/// Held as the first day of the month so an out-of-range cursor cannot be
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCursor {
    first: NaiveDate,
}

impl CalendarCursor {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if month > 11 {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month + 1, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn current() -> Self {
        Self::containing(today())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[self.month() as usize]
    }

    /// January steps back to December of the previous year.
    pub fn previous(self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    /// December steps forward to January of the next year.
    pub fn next(self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .map(|first| Self { first })
            .unwrap_or(self)
    }

    pub fn with_month(self, month: u32) -> Option<Self> {
        Self::new(self.year(), month)
    }

    pub fn with_year(self, year: i32) -> Option<Self> {
        if !SELECTABLE_YEARS.contains(&year) {
            return None;
        }
        Self::new(year, self.month())
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn days_in_month(&self) -> u32 {
        match self.next().first.pred_opt() {
            Some(last) if last.month() == self.first.month() => last.day(),
            // Only reachable at the upper bound of the date range, where
            // `next` cannot advance.
            _ => 31,
        }
    }

    /// Weekday of day 1, 0 = Sunday.
    pub fn leading_blanks(&self) -> u32 {
        self.first.weekday().num_days_from_sunday()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub date: NaiveDate,
    pub key: String,
    pub is_today: bool,
}

/// One week row. `None` is an empty placeholder that renders nothing.
pub type Week = [Option<DayCell>; 7];

#[derive(Debug, Clone)]
pub struct MonthGrid {
    pub cursor: CalendarCursor,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flatten().flatten()
    }
}

pub fn build_grid(cursor: CalendarCursor) -> MonthGrid {
    build_grid_at(today(), cursor)
}

pub fn build_grid_at(today: NaiveDate, cursor: CalendarCursor) -> MonthGrid {
    let today_key = date_key(today);
    let mut cells: Vec<Option<DayCell>> = (0..cursor.leading_blanks()).map(|_| None).collect();

    for offset in 0..cursor.days_in_month() {
        let Some(date) = cursor.first_day().checked_add_days(chrono::Days::new(offset.into())) else {
            break;
        };
        let key = date_key(date);
        cells.push(Some(DayCell {
            day: date.day(),
            is_today: key == today_key,
            date,
            key,
        }));
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    let weeks = cells
        .chunks(7)
        .map(|chunk| std::array::from_fn(|idx| chunk[idx].clone()))
        .collect();

    MonthGrid { cursor, weeks }
}

/// Canonical `YYYY-MM-DD` key used by the completion record.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parses a canonical key. Non-padded or otherwise non-canonical input is
/// rejected so the same day never maps to two keys.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(key, "%Y-%m-%d").ok()?;
    (date_key(date) == key).then_some(date)
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn today_key() -> String {
    date_key(today())
}
