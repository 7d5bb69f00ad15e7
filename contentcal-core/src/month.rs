//! Calendar month arithmetic.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::constants::MONTH_FILE_NAMES;
use crate::error::ContentCalError;
use crate::post::Post;

/// A displayed month. `month0` is zero-based (0 = January).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month0: u32,
}

/// Direction for month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Prev,
    Next,
}

impl CalendarMonth {
    /// Returns None if `month0` is out of range.
    pub fn new(year: i32, month0: u32) -> Option<Self> {
        (month0 < 12).then_some(CalendarMonth { year, month0 })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        CalendarMonth {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// The month containing today's local date.
    pub fn current() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn first_day(&self) -> NaiveDate {
        // month0 < 12 by construction; year range is chrono's.
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Weekday of the 1st, 0 = Sunday. Number of blank cells before day 1.
    pub fn first_weekday(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        match self.month0 + 1 {
            2 if NaiveDate::from_ymd_opt(self.year, 2, 29).is_some() => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub fn next(&self) -> Self {
        if self.month0 == 11 {
            CalendarMonth { year: self.year + 1, month0: 0 }
        } else {
            CalendarMonth { year: self.year, month0: self.month0 + 1 }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month0 == 0 {
            CalendarMonth { year: self.year - 1, month0: 11 }
        } else {
            CalendarMonth { year: self.year, month0: self.month0 - 1 }
        }
    }

    pub fn step(&self, step: Step) -> Self {
        match step {
            Step::Prev => self.prev(),
            Step::Next => self.next(),
        }
    }

    /// Canonical `YYYY-MM-DD` for a day of this month.
    pub fn date_string(&self, day: u32) -> String {
        format!("{}-{:02}-{:02}", self.year, self.month0 + 1, day)
    }

    /// `YYYY-MM`, the prefix shared by every date in the month.
    pub fn prefix(&self) -> String {
        format!("{}-{:02}", self.year, self.month0 + 1)
    }

    /// Lowercase English month name, as used for month document file names.
    pub fn file_name(&self) -> &'static str {
        MONTH_FILE_NAMES[self.month0 as usize]
    }

    /// e.g. "March 2024"
    pub fn label(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }
}

impl fmt::Display for CalendarMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix())
    }
}

impl FromStr for CalendarMonth {
    type Err = ContentCalError;

    /// Parse `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ContentCalError::InvalidMonth(s.to_string());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        CalendarMonth::new(year, month - 1)
            .filter(|m| NaiveDate::from_ymd_opt(m.year, 1, 1).is_some())
            .ok_or_else(invalid)
    }
}

/// Posts scheduled on exactly `date`, in store order.
pub fn posts_for_date<'a>(posts: &'a [Post], date: &str) -> Vec<&'a Post> {
    posts.iter().filter(|p| p.date == date).collect()
}

/// Posts whose date starts with the month's `YYYY-MM` prefix.
///
/// This is coarser than [`posts_for_date`] and only feeds the "N posts this
/// month" summary; grid placement always goes through exact dates.
pub fn posts_for_month<'a>(posts: &'a [Post], month: CalendarMonth) -> Vec<&'a Post> {
    let prefix = month.prefix();
    posts.iter().filter(|p| p.date.starts_with(&prefix)).collect()
}

/// Format a post date with a chrono format string, or return it untouched if
/// it doesn't parse.
pub fn format_post_date(date: &str, format: &str) -> String {
    match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
        Ok(d) => d.format(format).to_string(),
        Err(_) => date.to_string(),
    }
}

/// Parse `YYYY-MM-DD` as typed by a user.
pub fn parse_date(s: &str) -> Result<NaiveDate, ContentCalError> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| ContentCalError::InvalidDate(s.to_string()))
}
