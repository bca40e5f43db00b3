use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Serialize, Debug, PartialEq)]
pub struct Building {
    pub id: &'static str,
    pub name: &'static str,
    pub address: &'static str,
    /// "street, postcode city, country" as handed to map links
    pub full_address: &'static str,
    pub coordinates: Option<Coordinates>,
}

#[derive(Serialize, Debug, Copy, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

// ephemeral resolver output, never stored
#[derive(Debug, PartialEq)]
pub struct ResolvedLocation {
    pub room_code: String,
    pub building: Option<&'static Building>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedCourse {
    pub course_name: String,
    pub course_code: Option<String>,
    pub location: Option<String>,
    pub building_name: Option<String>,
    pub room_number: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub recurrence_rule: Option<String>,
    pub description: Option<String>,
    pub uid: Option<String>,
}
