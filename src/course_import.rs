use crate::campus_locations;
use crate::data_types::campus_data_types::ParsedCourse;
use crate::errors::CalendarError;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use ical::IcalParser;
use regex_lite::Regex;
use static_init::dynamic;

/// Reads a timetable export (.ics) into course records with resolved
/// campus buildings. Events without usable times are skipped, the rest
/// of the file still goes through.
pub fn parse_course_calendar(ics_text: &str) -> Result<Vec<ParsedCourse>, CalendarError> {
    let mut courses = Vec::new();

    for calendar in IcalParser::new(ics_text.as_bytes()) {
        for event in calendar?.events {
            let mut summary = None;
            let mut location = None;
            let mut dtstart = None;
            let mut dtend = None;
            let mut rrule = None;
            let mut description = None;
            let mut uid = None;

            for prop in event.properties {
                match prop.name.as_str() {
                    "SUMMARY" => summary = prop.value,
                    "LOCATION" => location = prop.value,
                    "DTSTART" => dtstart = prop.value,
                    "DTEND" => dtend = prop.value,
                    "RRULE" => rrule = prop.value,
                    "DESCRIPTION" => description = prop.value,
                    "UID" => uid = prop.value,
                    _ => {}
                }
            }

            // all-day blockers and broken exports come without times
            let (start_raw, end_raw) = match (dtstart, dtend) {
                (Some(start), Some(end)) => (start, end),
                _ => continue,
            };

            let (start_time, end_time) =
                match (parse_ics_datetime(&start_raw), parse_ics_datetime(&end_raw)) {
                    (Some(start), Some(end)) => (start, end),
                    _ => {
                        log::warn!(target: "campus_companion_rs::Import", "Skipping event with unreadable times '{}'/'{}'", start_raw, end_raw);
                        continue;
                    }
                };

            let course_name = summary
                .map(|s| unescape_ics_text(&s))
                .unwrap_or_else(|| "Untitled Course".to_string());
            let course_code = extract_course_code(&course_name);

            let location = location
                .map(|l| unescape_ics_text(&l))
                .filter(|l| !l.trim().is_empty());
            let room_number = location
                .as_deref()
                .and_then(campus_locations::extract_room_code)
                .map(str::to_string);
            let mut building = room_number
                .as_deref()
                .and_then(campus_locations::resolve_building);
            if building.is_none() {
                // some exports only carry the parenthesised facility code
                building = location
                    .as_deref()
                    .and_then(campus_locations::resolve_facility_code);
            }

            courses.push(ParsedCourse {
                course_name,
                course_code,
                location,
                building_name: building.map(|b| b.name.to_string()),
                room_number,
                start_time,
                end_time,
                recurrence_rule: rrule,
                description: description.map(|d| unescape_ics_text(&d)),
                uid,
            });
        }
    }

    Ok(courses)
}

// course codes look like "IN2345" at the start of the summary
fn extract_course_code(summary: &str) -> Option<String> {
    #[dynamic]
    static RE: Regex = Regex::new(r"^([A-Z]{2}\d{4})").unwrap();

    RE.captures(summary)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

// stamps come as 20250113T093000Z (UTC), 20250113T093000 (campus wall
// clock) or bare 20250113 (whole day, becomes local midnight)
fn parse_ics_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();

    if let Some(stripped) = raw.strip_suffix('Z') {
        let naive = NaiveDateTime::parse_from_str(stripped, "%Y%m%dT%H%M%S").ok()?;
        return Some(Utc.from_utc_datetime(&naive));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y%m%dT%H%M%S") {
        return Local
            .from_local_datetime(&naive)
            .earliest()
            .map(|dt| dt.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(raw, "%Y%m%d").ok()?;
    Local
        .from_local_datetime(&date.and_hms_opt(0, 0, 0)?)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

// ICS TEXT values escape commas, semicolons and newlines
fn unescape_ics_text(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\N", "\n")
        .replace("\\,", ",")
        .replace("\\;", ";")
        .replace("\\\\", "\\")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn wrap(event_lines: &[&str]) -> String {
        let mut lines = vec![
            "BEGIN:VCALENDAR",
            "VERSION:2.0",
            "PRODID:-//hhn//timetable//DE",
        ];
        lines.extend_from_slice(event_lines);
        lines.push("END:VCALENDAR");
        lines.join("\r\n")
    }

    #[test]
    fn test_parses_utc_event() {
        let ics = wrap(&[
            "BEGIN:VEVENT",
            "UID:lecture-1@hhn",
            "SUMMARY:IN2345 Datenbanken",
            "LOCATION:D.2.01\\, Seminarraum (1901.02.201)",
            "DTSTART:20250113T093000Z",
            "DTEND:20250113T110000Z",
            "RRULE:FREQ=WEEKLY;COUNT=14",
            "DESCRIPTION:Mit Übungsblatt",
            "END:VEVENT",
        ]);

        let courses = parse_course_calendar(&ics).unwrap();
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert_eq!(course.course_name, "IN2345 Datenbanken");
        assert_eq!(course.course_code.as_deref(), Some("IN2345"));
        assert_eq!(
            course.location.as_deref(),
            Some("D.2.01, Seminarraum (1901.02.201)")
        );
        assert_eq!(course.room_number.as_deref(), Some("D.2.01"));
        assert_eq!(course.building_name.as_deref(), Some("Bildungscampus"));
        assert_eq!(
            course.start_time,
            Utc.with_ymd_and_hms(2025, 1, 13, 9, 30, 0).unwrap()
        );
        assert_eq!(course.end_time - course.start_time, Duration::minutes(90));
        assert_eq!(
            course.recurrence_rule.as_deref(),
            Some("FREQ=WEEKLY;COUNT=14")
        );
        assert_eq!(course.description.as_deref(), Some("Mit Übungsblatt"));
        assert_eq!(course.uid.as_deref(), Some("lecture-1@hhn"));
    }

    #[test]
    fn test_naive_times_are_wall_clock() {
        let ics = wrap(&[
            "BEGIN:VEVENT",
            "SUMMARY:Mathe 1\\, Gruppe A",
            "LOCATION:C.0.50 Hörsaal",
            "DTSTART:20250114T141500",
            "DTEND:20250114T154500",
            "END:VEVENT",
        ]);

        let courses = parse_course_calendar(&ics).unwrap();
        assert_eq!(courses.len(), 1);

        let course = &courses[0];
        assert_eq!(course.course_name, "Mathe 1, Gruppe A");
        assert_eq!(course.course_code, None);
        assert_eq!(
            course.building_name.as_deref(),
            Some("Weipertstraße Campus")
        );

        // naive stamps mean campus wall clock, wherever the tests run
        let local_start = course.start_time.with_timezone(&Local).naive_local();
        assert_eq!(
            local_start,
            NaiveDate::from_ymd_opt(2025, 1, 14)
                .unwrap()
                .and_hms_opt(14, 15, 0)
                .unwrap()
        );
        assert_eq!(course.end_time - course.start_time, Duration::minutes(90));
    }

    #[test]
    fn test_facility_code_fallback() {
        let ics = wrap(&[
            "BEGIN:VEVENT",
            "SUMMARY:BW1001 Rechnungswesen",
            "LOCATION:Hörsaal (1910.00.010)",
            "DTSTART:20250115T080000Z",
            "DTEND:20250115T093000Z",
            "END:VEVENT",
        ]);

        let course = &parse_course_calendar(&ics).unwrap()[0];
        // no room code up front, the parenthesised facility code decides
        assert_eq!(course.room_number, None);
        assert_eq!(
            course.building_name.as_deref(),
            Some("Weipertstraße Campus")
        );
    }

    #[test]
    fn test_unresolvable_location_kept_raw() {
        let ics = wrap(&[
            "BEGIN:VEVENT",
            "SUMMARY:Exkursion",
            "LOCATION:Treff Hauptbahnhof",
            "DTSTART:20250116T070000Z",
            "DTEND:20250116T180000Z",
            "END:VEVENT",
        ]);

        let course = &parse_course_calendar(&ics).unwrap()[0];
        assert_eq!(course.location.as_deref(), Some("Treff Hauptbahnhof"));
        assert_eq!(course.room_number, None);
        assert_eq!(course.building_name, None);
    }

    #[test]
    fn test_skips_timeless_and_unreadable_events() {
        let ics = wrap(&[
            "BEGIN:VEVENT",
            "SUMMARY:Ohne Ende",
            "DTSTART:20250113T093000Z",
            "END:VEVENT",
            "BEGIN:VEVENT",
            "SUMMARY:Kaputte Zeit",
            "DTSTART:gestern",
            "DTEND:20250113T110000Z",
            "END:VEVENT",
            "BEGIN:VEVENT",
            "SUMMARY:SE2201 Softwaretechnik",
            "DTSTART:20250113T130000Z",
            "DTEND:20250113T143000Z",
            "END:VEVENT",
        ]);

        let courses = parse_course_calendar(&ics).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_code.as_deref(), Some("SE2201"));
    }

    #[test]
    fn test_untitled_default_and_date_only() {
        let ics = wrap(&[
            "BEGIN:VEVENT",
            "DTSTART:20250120",
            "DTEND:20250121",
            "END:VEVENT",
        ]);

        let courses = parse_course_calendar(&ics).unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].course_name, "Untitled Course");
        // whole-day events span local midnight to midnight
        assert_eq!(
            courses[0].end_time - courses[0].start_time,
            Duration::days(1)
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_course_calendar("").unwrap().is_empty());
    }
}
