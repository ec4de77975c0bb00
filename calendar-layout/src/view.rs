use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer};

use crate::grid::{build_month_matrix, month_title, next_month, previous_month, WEEKDAY_LABELS};
use crate::{layout_day_events_lenient, DateCell, DayLayout, Event, LayoutError};

/// Events keyed by the date they fall on, chronologically ordered.
pub type EventsByDate = BTreeMap<NaiveDate, Vec<Event>>;

/// Groups a flat event list by date, keeping input order within each date.
pub fn group_by_date<I>(events: I) -> EventsByDate
where
    I: IntoIterator<Item = Event>,
{
    let mut grouped = EventsByDate::new();
    for event in events {
        grouped.entry(event.date).or_default().push(event);
    }
    grouped
}

#[cfg(feature = "serde")]
fn serialize_display<T: std::fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// An event left out of its day's layout, together with the reason.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RejectedEvent<'a> {
    pub event: &'a Event,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_display"))]
    pub reason: LayoutError,
}

/// One cell of a rendered month.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct DayView<'a> {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub cell: DateCell,
    pub day: u32,
    pub is_today: bool,
    pub layout: DayLayout<'a>,
}

/// Everything needed to draw a month: header, navigation targets and laid-out cells.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MonthView<'a> {
    pub title: String,
    pub weekdays: [&'static str; 7],
    pub previous: Option<NaiveDate>,
    pub next: Option<NaiveDate>,
    pub weeks: Vec<[DayView<'a>; 7]>,
    pub rejected: Vec<RejectedEvent<'a>>,
}

impl<'a> MonthView<'a> {
    pub fn days(&self) -> impl Iterator<Item = &DayView<'a>> + '_ {
        self.weeks.iter().flatten()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayView<'a>> {
        self.days().find(|day| day.cell.date == date)
    }

    pub fn has_conflict(&self) -> bool {
        self.days().any(|day| day.layout.has_conflict)
    }
}

/// Lays out every visible cell of the month containing `reference`.
///
/// Events that cannot be placed are skipped and listed in
/// [`MonthView::rejected`]; the rest of their day is still laid out. Events
/// dated outside the visible grid are ignored.
pub fn build_month_view<'a>(
    reference: NaiveDate,
    today: NaiveDate,
    events: &'a EventsByDate,
) -> MonthView<'a> {
    let matrix = build_month_matrix(reference);
    let mut rejected = Vec::new();

    let weeks = matrix
        .cells()
        .map(|week| {
            week.map(|cell| {
                let day_events = events.get(&cell.date).map_or(&[][..], Vec::as_slice);
                let (layout, errors) = layout_day_events_lenient(day_events);

                rejected.extend(errors.into_iter().map(|reason| RejectedEvent {
                    event: &day_events[reason.index()],
                    reason,
                }));

                DayView {
                    cell,
                    day: cell.date.day(),
                    is_today: cell.date == today,
                    layout,
                }
            })
        })
        .collect();

    MonthView {
        title: month_title(reference),
        weekdays: WEEKDAY_LABELS,
        previous: previous_month(reference),
        next: next_month(reference),
        weeks,
        rejected,
    }
}
