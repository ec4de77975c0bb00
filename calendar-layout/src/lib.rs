//! Month grids and same-day event lanes for calendar views.
//!
//! [`build_month_matrix`] turns any date into the whole weeks needed to draw
//! its month. [`layout_day_events`] assigns one day's events to lanes so that
//! no two events in a lane overlap. Both are pure functions; [`build_month_view`]
//! combines them for a full month.

mod error;
mod grid;
mod layout;
mod structs;
mod view;

#[cfg(feature = "ics")]
mod ics;

pub use error::LayoutError;
pub use grid::{
    build_month_matrix, first_of_month, last_of_month, month_title, next_month, previous_month,
    WEEKDAY_LABELS,
};
pub use layout::{layout_day_events, layout_day_events_lenient, TimeSlot};
pub use structs::{DateCell, DayLayout, Event, MonthMatrix, PlacedEvent};
pub use view::{build_month_view, group_by_date, DayView, EventsByDate, MonthView, RejectedEvent};
