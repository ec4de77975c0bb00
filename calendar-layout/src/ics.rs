use chrono::{Duration, NaiveDate};
use ics::properties::{DtEnd, DtStart, Summary};

use crate::{MonthView, PlacedEvent};

const ICS_STAMP: &str = "%Y%m%dT%H%M%S";

fn stamp(date: NaiveDate, minutes: u32) -> Option<String> {
    let start = date.and_hms_opt(0, 0, 0)?;
    let at = start.checked_add_signed(Duration::try_minutes(minutes.into())?)?;
    Some(at.format(ICS_STAMP).to_string())
}

impl MonthView<'_> {
    /// Exports every laid-out event of the month's own dates as an iCalendar.
    ///
    /// Padding days from the neighbouring months are left out. Times are
    /// written as floating local times.
    #[must_use]
    pub fn to_ics<'n>(&self, name: &'n str) -> ics::ICalendar<'n> {
        let mut icalendar = ics::ICalendar::new("2.0", name);

        for day in self.days().filter(|day| day.cell.in_current_month) {
            for placed in &day.layout.events {
                if let Some(event) = placed.to_ics() {
                    icalendar.add_event(event);
                }
            }
        }

        icalendar
    }
}

impl PlacedEvent<'_> {
    /// The event as a VEVENT, or `None` if its end is not a representable date.
    #[must_use]
    pub fn to_ics<'n>(&self) -> Option<ics::Event<'n>> {
        let start = stamp(self.event.date, self.start_minute)?;
        let end = stamp(self.event.date, self.end_minute)?;

        let id = format!("{}_{}", start, self.event.title.replace(' ', "-"));

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(self.event.title.clone()));

        Some(ics_event)
    }
}
