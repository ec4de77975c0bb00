use std::mem;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::MonthMatrix;

/// Header labels for the grid columns, in the grid's Sunday-first order.
pub const WEEKDAY_LABELS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Iterates over the Sundays starting each week of a grid, up to and including `end`.
struct WeekRange(NaiveDate, NaiveDate);

impl Iterator for WeekRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0 + Days::new(7);
            Some(mem::replace(&mut self.0, next))
        } else {
            None
        }
    }
}

/// Builds the weeks to display for the month containing `reference`.
///
/// The grid starts on the Sunday on or before the first of the month and ends
/// on the Saturday on or after its last day, so it spans four to six weeks.
/// Only the year and month of `reference` matter.
pub fn build_month_matrix(reference: NaiveDate) -> MonthMatrix {
    let first = first_of_month(reference);
    let last = last_of_month(reference);

    let grid_start = first - Days::new(first.weekday().num_days_from_sunday().into());
    let grid_end = last + Days::new((6 - last.weekday().num_days_from_sunday()).into());

    let weeks = WeekRange(grid_start, grid_end)
        .map(|sunday| std::array::from_fn(|offset| sunday + Days::new(offset as u64)))
        .collect();

    MonthMatrix {
        month: first,
        weeks,
    }
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(date.day0().into())
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date) + Months::new(1) - Days::new(1)
}

/// The same day one month earlier, clamped to the length of that month.
pub fn previous_month(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_months(Months::new(1))
}

/// The same day one month later, clamped to the length of that month.
pub fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(1))
}

/// Heading for the month containing `date`, e.g. `May 2024`.
pub fn month_title(date: NaiveDate) -> String {
    date.format("%B %Y").to_string()
}
