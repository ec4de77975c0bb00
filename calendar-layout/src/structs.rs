use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single calendar entry as handed over by the event source.
///
/// `time` is kept as the raw `HH:MM` string; it is only interpreted by the
/// layout engine, which rejects values it cannot parse instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event {
    pub date: NaiveDate,
    pub time: String,
    /// Length in minutes. A missing value is treated as a zero-length event.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub duration: Option<i64>,
    pub title: String,
}

impl Event {
    pub fn new<T, S>(date: NaiveDate, time: T, duration: Option<i64>, title: S) -> Self
    where
        T: Into<String>,
        S: Into<String>,
    {
        Self {
            date,
            time: time.into(),
            duration,
            title: title.into(),
        }
    }
}

/// A date shown in the month grid, flagged with whether it belongs to the
/// month the grid was built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DateCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

/// Whole weeks of dates covering one month, Sunday first.
///
/// # Invariants
/// - Every week holds exactly seven consecutive dates.
/// - Weeks are contiguous: the day after a week's Saturday is the next week's Sunday.
/// - Every date of `month` appears exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MonthMatrix {
    /// First day of the month the matrix was built for.
    pub month: NaiveDate,
    pub weeks: Vec<[NaiveDate; 7]>,
}

impl MonthMatrix {
    /// Number of date cells in the matrix, always a multiple of seven.
    pub fn cell_count(&self) -> usize {
        self.weeks.len() * 7
    }

    /// Every date in chronological order.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.weeks.iter().flatten().copied()
    }

    pub fn first(&self) -> Option<NaiveDate> {
        self.weeks.first().map(|week| week[0])
    }

    pub fn last(&self) -> Option<NaiveDate> {
        self.weeks.last().map(|week| week[6])
    }

    /// Rows of cells, each flagged with whether it lies in the matrix's month.
    pub fn cells(&self) -> impl Iterator<Item = [DateCell; 7]> + '_ {
        let month = self.month;
        self.weeks.iter().map(move |week| {
            week.map(|date| DateCell {
                date,
                in_current_month: date.year() == month.year() && date.month() == month.month(),
            })
        })
    }
}

/// An event after lane assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct PlacedEvent<'a> {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub event: &'a Event,
    pub start_minute: u32,
    pub end_minute: u32,
    pub lane: usize,
}

/// The layout of a single day: events sorted by start time, each in a lane
/// that holds no other event overlapping it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DayLayout<'a> {
    pub events: Vec<PlacedEvent<'a>>,
    pub lane_count: usize,
    /// Set when any two events of the day overlap, wherever they were placed.
    pub has_conflict: bool,
}

impl<'a> DayLayout<'a> {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events placed in `lane`, in start order.
    pub fn lane(&self, lane: usize) -> impl Iterator<Item = &PlacedEvent<'a>> + '_ {
        self.events.iter().filter(move |placed| placed.lane == lane)
    }
}
