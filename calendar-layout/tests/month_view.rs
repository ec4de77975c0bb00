use calendar_layout::{build_month_view, group_by_date, Event, LayoutError, WEEKDAY_LABELS};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_events() -> Vec<Event> {
    vec![
        Event::new(date(2024, 5, 20), "09:00", Some(60), "standup"),
        Event::new(date(2024, 5, 3), "18:00", Some(120), "dinner"),
        Event::new(date(2024, 5, 20), "09:30", Some(30), "review"),
        Event::new(date(2024, 4, 29), "08:00", Some(30), "padding day"),
        Event::new(date(2024, 5, 21), "noon", Some(30), "typo"),
        Event::new(date(2024, 5, 21), "12:00", Some(30), "lunch"),
        Event::new(date(2024, 7, 1), "10:00", Some(30), "off grid"),
    ]
}

#[test]
fn grouping_keeps_input_order_per_date() {
    let grouped = group_by_date(sample_events());

    assert_eq!(
        grouped.keys().copied().collect::<Vec<_>>(),
        [
            date(2024, 4, 29),
            date(2024, 5, 3),
            date(2024, 5, 20),
            date(2024, 5, 21),
            date(2024, 7, 1)
        ]
    );

    let titles = grouped[&date(2024, 5, 20)]
        .iter()
        .map(|event| event.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(titles, ["standup", "review"]);
}

#[test]
fn month_view_lays_out_every_visible_day() {
    let grouped = group_by_date(sample_events());
    let view = build_month_view(date(2024, 5, 20), date(2024, 5, 21), &grouped);

    assert_eq!(view.title, "May 2024");
    assert_eq!(view.weekdays, WEEKDAY_LABELS);
    assert_eq!(view.previous, Some(date(2024, 4, 20)));
    assert_eq!(view.next, Some(date(2024, 6, 20)));
    assert_eq!(view.weeks.len(), 5);

    let monday = view.day(date(2024, 5, 20)).unwrap();
    assert_eq!(monday.day, 20);
    assert!(monday.cell.in_current_month);
    assert!(!monday.is_today);
    assert_eq!(monday.layout.lane_count, 2);
    assert!(monday.layout.has_conflict);

    let padding = view.day(date(2024, 4, 29)).unwrap();
    assert!(!padding.cell.in_current_month);
    assert_eq!(padding.layout.events.len(), 1);

    assert!(view.has_conflict());
    assert!(view.day(date(2024, 7, 1)).is_none());
}

#[test]
fn malformed_event_is_skipped_without_losing_its_day() {
    let grouped = group_by_date(sample_events());
    let view = build_month_view(date(2024, 5, 1), date(2024, 5, 21), &grouped);

    let tuesday = view.day(date(2024, 5, 21)).unwrap();
    assert!(tuesday.is_today);
    assert_eq!(tuesday.layout.events.len(), 1);
    assert_eq!(tuesday.layout.events[0].event.title, "lunch");

    assert_eq!(view.rejected.len(), 1);
    assert_eq!(view.rejected[0].event.title, "typo");
    assert!(matches!(
        view.rejected[0].reason,
        LayoutError::MalformedTime { index: 0, .. }
    ));
}

#[test]
fn month_view_serializes_cells_flat() {
    let grouped = group_by_date(sample_events());
    let view = build_month_view(date(2024, 5, 1), date(2024, 5, 21), &grouped);

    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["title"], "May 2024");
    assert_eq!(json["previous"], "2024-04-01");
    assert_eq!(json["weekdays"][0], "Sun");

    let first = &json["weeks"][0][0];
    assert_eq!(first["date"], "2024-04-28");
    assert_eq!(first["inCurrentMonth"], false);
    assert_eq!(first["day"], 28);
    assert_eq!(first["isToday"], false);
    assert_eq!(first["layout"]["laneCount"], 0);

    assert_eq!(json["rejected"][0]["event"]["title"], "typo");
    assert_eq!(
        json["rejected"][0]["reason"],
        "event #0 `typo` has malformed time `noon`, expected HH:MM"
    );
}

#[test]
fn month_export_contains_only_the_months_own_events() {
    let grouped = group_by_date(sample_events());
    let view = build_month_view(date(2024, 5, 1), date(2024, 5, 21), &grouped);

    let ics = view.to_ics("calendar").to_string();

    assert!(ics.starts_with("BEGIN:VCALENDAR"));
    assert_eq!(ics.matches("BEGIN:VEVENT").count(), 4);
    assert!(ics.contains("DTSTART:20240520T090000"));
    assert!(ics.contains("DTEND:20240520T100000"));
    assert!(ics.contains("SUMMARY:dinner"));
    assert!(ics.contains("DTEND:20240503T200000"));
    assert!(!ics.contains("padding day"));
}

#[test]
fn export_rolls_late_events_into_the_next_day() {
    let events = vec![Event::new(date(2024, 5, 31), "23:30", Some(90), "night shift")];
    let grouped = group_by_date(events);
    let view = build_month_view(date(2024, 5, 1), date(2024, 5, 1), &grouped);

    let ics = view.to_ics("calendar").to_string();

    assert!(ics.contains("DTSTART:20240531T233000"));
    assert!(ics.contains("DTEND:20240601T010000"));
}
