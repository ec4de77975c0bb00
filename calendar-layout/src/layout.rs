use chrono::{NaiveTime, Timelike};

use crate::{DayLayout, Event, LayoutError, PlacedEvent};

/// Half-open span `[start_minute, end_minute)` of minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSlot {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl TimeSlot {
    /// Derives the slot an event occupies from its `time` and `duration`.
    ///
    /// `index` only labels the returned error.
    ///
    /// # Errors
    /// - [`LayoutError::MalformedTime`] when `time` is not a valid `HH:MM` clock time.
    /// - [`LayoutError::InvalidDuration`] when `duration` is negative.
    pub fn of(index: usize, event: &Event) -> Result<Self, LayoutError> {
        let start_minute = parse_minutes(&event.time).ok_or_else(|| LayoutError::MalformedTime {
            index,
            title: event.title.clone(),
            time: event.time.clone(),
        })?;

        let duration = event.duration.unwrap_or(0);
        let Ok(duration) = u64::try_from(duration) else {
            return Err(LayoutError::InvalidDuration {
                index,
                title: event.title.clone(),
                duration,
            });
        };

        let end_minute = u32::try_from(u64::from(start_minute) + duration).unwrap_or(u32::MAX);

        Ok(Self {
            start_minute,
            end_minute,
        })
    }

    /// Whether the two slots share at least one minute. Touching slots do not overlap.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start_minute < other.end_minute && other.start_minute < self.end_minute
    }
}

/// Accepts exactly two hour digits, a colon and two minute digits.
fn parse_minutes(time: &str) -> Option<u32> {
    let shape_ok = matches!(
        time.as_bytes(),
        [h1, h2, b':', m1, m2] if [h1, h2, m1, m2].iter().all(|digit| digit.is_ascii_digit())
    );
    if !shape_ok {
        return None;
    }

    let time = NaiveTime::parse_from_str(time, "%H:%M").ok()?;
    Some(time.hour() * 60 + time.minute())
}

/// Lays out one day's events into non-overlapping lanes.
///
/// Events are stably sorted by start time and each goes into the first lane
/// whose last event has ended by the time it starts, opening a new lane when
/// none has. Skipping over a busy lane marks the whole day as conflicting.
///
/// # Errors
/// Fails on the first event with a malformed time or a negative duration,
/// before anything is sorted or placed.
pub fn layout_day_events(events: &[Event]) -> Result<DayLayout<'_>, LayoutError> {
    let slots = events
        .iter()
        .enumerate()
        .map(|(index, event)| TimeSlot::of(index, event).map(|slot| (event, slot)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(assign_lanes(slots))
}

/// Like [`layout_day_events`], but drops invalid events instead of failing.
///
/// The dropped events are reported alongside the layout of the remaining ones.
pub fn layout_day_events_lenient(events: &[Event]) -> (DayLayout<'_>, Vec<LayoutError>) {
    let mut rejected = Vec::new();

    let slots = events
        .iter()
        .enumerate()
        .filter_map(|(index, event)| match TimeSlot::of(index, event) {
            Ok(slot) => Some((event, slot)),
            Err(err) => {
                rejected.push(err);
                None
            }
        })
        .collect();

    (assign_lanes(slots), rejected)
}

fn assign_lanes(mut slots: Vec<(&Event, TimeSlot)>) -> DayLayout<'_> {
    // stable, equal start times keep their input order
    slots.sort_by_key(|(_, slot)| slot.start_minute);

    // end minute of the last event in each lane, in lane creation order
    let mut lane_ends: Vec<u32> = Vec::new();
    let mut has_conflict = false;
    let mut events = Vec::with_capacity(slots.len());

    for (event, slot) in slots {
        let mut placed = None;

        for (lane, end) in lane_ends.iter_mut().enumerate() {
            if *end <= slot.start_minute {
                *end = slot.end_minute;
                placed = Some(lane);
                break;
            }
            has_conflict = true;
        }

        let lane = placed.unwrap_or_else(|| {
            lane_ends.push(slot.end_minute);
            lane_ends.len() - 1
        });

        events.push(PlacedEvent {
            event,
            start_minute: slot.start_minute,
            end_minute: slot.end_minute,
            lane,
        });
    }

    DayLayout {
        events,
        lane_count: lane_ends.len(),
        has_conflict,
    }
}
