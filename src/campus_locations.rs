use crate::data_types::campus_data_types::{Building, Coordinates, ResolvedLocation};

use regex_lite::Regex;
use static_init::dynamic;

pub static ETZELSTRASSE: Building = Building {
    id: "etzelstrasse",
    name: "Etzelstraße Campus",
    address: "Etzelstraße 38",
    full_address: "Etzelstraße 38, 74076 Heilbronn, Germany",
    coordinates: Some(Coordinates {
        lat: 49.1427,
        lng: 9.2181,
    }),
};

pub static BILDUNGSCAMPUS: Building = Building {
    id: "bildungscampus",
    name: "Bildungscampus",
    address: "Bildungscampus 2",
    full_address: "Bildungscampus 2, 74076 Heilbronn, Germany",
    coordinates: Some(Coordinates {
        lat: 49.1419,
        lng: 9.2144,
    }),
};

pub static WEIPERTSTRASSE: Building = Building {
    id: "weipertstrasse",
    name: "Weipertstraße Campus",
    address: "Weipertstraße 8-10",
    full_address: "Weipertstraße 8-10, 74076 Heilbronn, Germany",
    coordinates: Some(Coordinates {
        lat: 49.1398,
        lng: 9.2203,
    }),
};

pub static CAMPUS_BUILDINGS: [&Building; 3] = [&ETZELSTRASSE, &BILDUNGSCAMPUS, &WEIPERTSTRASSE];

/// Leading room code of a free-text location, e.g. "C.0.50" out of
/// "C.0.50 Hörsaal" or "104" out of "104 Labor". Input casing is kept.
pub fn extract_room_code(location: &str) -> Option<&str> {
    #[dynamic]
    static RE: Regex = Regex::new(r"^([A-Za-z]\.[\d.]+|\d+(?:\.\d+)*)").unwrap();

    RE.captures(location.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Room prefix -> building. D is Bildungscampus, C is Weipertstraße,
/// L and the legacy all-numeric rooms are Etzelstraße.
pub fn resolve_building(room_code: &str) -> Option<&'static Building> {
    let first = room_code.trim().chars().next()?;

    if first.is_ascii_digit() {
        return Some(&ETZELSTRASSE);
    }
    match first.to_ascii_uppercase() {
        'D' => Some(&BILDUNGSCAMPUS),
        'C' => Some(&WEIPERTSTRASSE),
        'L' => Some(&ETZELSTRASSE),
        _ => None,
    }
}

pub fn resolve_location(location: &str) -> Option<ResolvedLocation> {
    let room_code = extract_room_code(location)?;
    Some(ResolvedLocation {
        room_code: room_code.to_string(),
        building: resolve_building(room_code),
    })
}

pub fn resolve_full_address(location: &str) -> Option<&'static str> {
    let room_code = extract_room_code(location)?;
    resolve_building(room_code).map(|building| building.full_address)
}

/// Timetable exports carry facility codes like "(1901.02.201)" instead of
/// room prefixes. Only consulted by course import when the room-code rules
/// came up empty.
pub fn resolve_facility_code(location: &str) -> Option<&'static Building> {
    #[dynamic]
    static RE: Regex = Regex::new(r"\((\d{4})\.").unwrap();

    let code = RE.captures(location).and_then(|caps| caps.get(1))?;
    match code.as_str() {
        "1901" | "1902" => Some(&BILDUNGSCAMPUS),
        "1910" | "1915" => Some(&WEIPERTSTRASSE),
        _ => None,
    }
}

/// Sanity check over the static table, run once at startup.
pub fn validate_building_table() -> Result<(), String> {
    let mut seen: Vec<&str> = Vec::new();
    for building in CAMPUS_BUILDINGS {
        if building.id.is_empty() || building.name.is_empty() {
            return Err(format!("building '{}' has an empty id or name", building.id));
        }
        if seen.contains(&building.id) {
            return Err(format!("duplicate building id '{}'", building.id));
        }
        seen.push(building.id);

        if building.address.is_empty() || !building.full_address.contains(building.address) {
            return Err(format!(
                "building '{}': full address does not contain '{}'",
                building.id, building.address
            ));
        }
        if let Some(coords) = building.coordinates {
            if !(-90.0..=90.0).contains(&coords.lat) || !(-180.0..=180.0).contains(&coords.lng) {
                return Err(format!(
                    "building '{}': coordinates out of range",
                    building.id
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_room_code_letter_form() {
        assert_eq!(extract_room_code("C.0.50 Hörsaal"), Some("C.0.50"));
        assert_eq!(
            extract_room_code("D.2.01, Seminarraum (1901.02.201)"),
            Some("D.2.01")
        );
        assert_eq!(extract_room_code("L.1.11"), Some("L.1.11"));
    }

    #[test]
    fn test_extract_room_code_numeric_form() {
        assert_eq!(extract_room_code("104 Labor"), Some("104"));
        assert_eq!(extract_room_code("1.234"), Some("1.234"));
    }

    #[test]
    fn test_extract_room_code_keeps_casing_and_trims() {
        assert_eq!(extract_room_code("  c.0.50 Hörsaal"), Some("c.0.50"));
    }

    #[test]
    fn test_extract_room_code_must_anchor() {
        assert_eq!(extract_room_code("Hörsaal"), None);
        assert_eq!(extract_room_code("Raum C.0.50"), None);
        assert_eq!(extract_room_code(""), None);
        assert_eq!(extract_room_code("   "), None);
    }

    #[test]
    fn test_resolve_building_prefixes() {
        assert_eq!(resolve_building("C.0.50"), Some(&WEIPERTSTRASSE));
        assert_eq!(resolve_building("D.2.01"), Some(&BILDUNGSCAMPUS));
        assert_eq!(resolve_building("104"), Some(&ETZELSTRASSE));
        assert_eq!(resolve_building("L.1.11"), Some(&ETZELSTRASSE));
    }

    #[test]
    fn test_resolve_building_is_case_insensitive() {
        assert_eq!(resolve_building("d.9.9"), Some(&BILDUNGSCAMPUS));
        assert_eq!(resolve_building("c.1.01"), Some(&WEIPERTSTRASSE));
    }

    #[test]
    fn test_resolve_building_unknown_prefix() {
        assert_eq!(resolve_building("X.9.99"), None);
        assert_eq!(resolve_building("Z.1.01"), None);
        assert_eq!(resolve_building(""), None);
        assert_eq!(resolve_building("   "), None);
    }

    #[test]
    fn test_resolve_building_is_idempotent() {
        let first = resolve_building("C.0.50").unwrap();
        let second = resolve_building("C.0.50").unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(first, second);
    }

    #[test]
    fn test_resolve_full_address() {
        assert_eq!(
            resolve_full_address("C.0.50 Hörsaal"),
            Some("Weipertstraße 8-10, 74076 Heilbronn, Germany")
        );
        assert_eq!(
            resolve_full_address("D.2.01, Seminarraum (1901.02.201)"),
            Some("Bildungscampus 2, 74076 Heilbronn, Germany")
        );
        assert_eq!(
            resolve_full_address("L.2.03"),
            Some("Etzelstraße 38, 74076 Heilbronn, Germany")
        );
        assert_eq!(resolve_full_address("Raum ohne Code"), None);
    }

    #[test]
    fn test_resolve_location_keeps_code_without_building() {
        let resolved = resolve_location("104 Labor").unwrap();
        assert_eq!(resolved.room_code, "104");
        assert_eq!(resolved.building, Some(&ETZELSTRASSE));
        assert_eq!(resolve_location("Hörsaal"), None);
    }

    #[test]
    fn test_resolve_facility_code() {
        assert_eq!(
            resolve_facility_code("Seminarraum (1901.02.201)"),
            Some(&BILDUNGSCAMPUS)
        );
        assert_eq!(
            resolve_facility_code("(1902.01.105)"),
            Some(&BILDUNGSCAMPUS)
        );
        assert_eq!(
            resolve_facility_code("(1910.00.010)"),
            Some(&WEIPERTSTRASSE)
        );
        assert_eq!(
            resolve_facility_code("Hörsaal (1915.02.040)"),
            Some(&WEIPERTSTRASSE)
        );
    }

    #[test]
    fn test_resolve_facility_code_unknown() {
        assert_eq!(resolve_facility_code("(1999.02.201)"), None);
        assert_eq!(resolve_facility_code("1901.02.201"), None);
        assert_eq!(resolve_facility_code("Seminarraum"), None);
        assert_eq!(resolve_facility_code(""), None);
    }

    #[test]
    fn test_building_table_is_valid() {
        assert!(validate_building_table().is_ok());
        assert_eq!(CAMPUS_BUILDINGS.len(), 3);
    }
}
