//! Month grid layout: leading blanks plus one cell per day.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::month::{CalendarMonth, posts_for_date, posts_for_month};
use crate::post::Post;

/// One day of the displayed month.
#[derive(Debug, Clone)]
pub struct DayCell<'a> {
    pub day: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub posts: Vec<&'a Post>,
    pub is_today: bool,
    pub is_sunday: bool,
}

impl DayCell<'_> {
    pub fn has_posts(&self) -> bool {
        !self.posts.is_empty()
    }

    pub fn has_special(&self) -> bool {
        self.posts.iter().any(|p| p.special)
    }
}

/// A month laid out as a Sunday-first, seven-column grid.
#[derive(Debug, Clone)]
pub struct MonthGrid<'a> {
    pub month: CalendarMonth,
    /// Blank cells before day 1.
    pub leading_blanks: u32,
    pub days: Vec<DayCell<'a>>,
    /// Posts matching the month prefix, for the header summary.
    pub month_post_count: usize,
}

impl<'a> MonthGrid<'a> {
    pub fn build(month: CalendarMonth, posts: &'a [Post], today: NaiveDate) -> Self {
        let days = (1..=month.days_in_month())
            .map(|day| {
                let date = month.date_string(day);
                let posts = posts_for_date(posts, &date);
                let weekday = (month.first_weekday() + day - 1) % 7;

                DayCell {
                    day,
                    posts,
                    is_today: month.contains(today) && today.day() == day,
                    is_sunday: weekday == Weekday::Sun.num_days_from_sunday(),
                    date,
                }
            })
            .collect();

        MonthGrid {
            month,
            leading_blanks: month.first_weekday(),
            days,
            month_post_count: posts_for_month(posts, month).len(),
        }
    }

    pub fn day(&self, day: u32) -> Option<&DayCell<'a>> {
        day.checked_sub(1).and_then(|i| self.days.get(i as usize))
    }

    /// Rows of seven slots; `None` is a blank before day 1 or after the last day.
    pub fn weeks(&self) -> Vec<Vec<Option<&DayCell<'a>>>> {
        let mut slots: Vec<Option<&DayCell<'a>>> =
            (0..self.leading_blanks).map(|_| None).collect();
        slots.extend(self.days.iter().map(Some));
        while slots.len() % 7 != 0 {
            slots.push(None);
        }

        slots.chunks(7).map(|week| week.to_vec()).collect()
    }
}
