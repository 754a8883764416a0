//! Normalisation of raw feed records into canonical reports and places.
//!
//! Normalisers never fail: a record that cannot be placed on the map is
//! dropped (logged at `debug`) and every other gap is filled with a
//! sentinel.

use tracing::debug;

use super::event::{HazardReport, UNKNOWN_CATEGORY};
use super::geo::Coordinates;
use super::place::{DiscoveredPlace, UNKNOWN_NAME};
use super::ports::{RawGeometry, RawHazardRecord, RawPlaceRecord};

/// Raw record from any feed.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Hazard(RawHazardRecord),
    Place(RawPlaceRecord),
}

/// Canonical shape produced from a [`RawRecord`].
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Hazard(HazardReport),
    Place(DiscoveredPlace),
}

/// Normalise any raw record, dispatching on its kind.
#[must_use]
pub fn normalize(raw: RawRecord) -> Option<Normalized> {
    match raw {
        RawRecord::Hazard(record) => normalize_hazard(record).map(Normalized::Hazard),
        RawRecord::Place(record) => normalize_place(record).map(Normalized::Place),
    }
}

/// Normalise a hazard record.
///
/// Among geometries with valid coordinates, the one with the latest timestamp
/// wins; undated geometries rank below dated ones and ties keep the first
/// encountered. Returns `None` when no geometry has usable coordinates.
///
/// # Examples
/// ```
/// use chrono::{TimeZone, Utc};
/// use horizon::domain::event::SourceKind;
/// use horizon::domain::geo::Coordinates;
/// use horizon::domain::normalize::normalize_hazard;
/// use horizon::domain::ports::{RawGeometry, RawHazardRecord};
///
/// let record = RawHazardRecord {
///     id: "EONET_1".into(),
///     source: SourceKind::Eonet,
///     title: "Wildfire X".into(),
///     categories: vec![],
///     geometries: vec![RawGeometry {
///         observed_at: Some(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap()),
///         coordinates: Some(Coordinates::new(-120.0, 38.0)),
///     }],
///     source_links: vec![],
/// };
/// let report = normalize_hazard(record).expect("record has a geometry");
/// assert_eq!(report.category, "Unknown");
/// ```
#[must_use]
pub fn normalize_hazard(raw: RawHazardRecord) -> Option<HazardReport> {
    let RawHazardRecord {
        id,
        source,
        title,
        categories,
        geometries,
        source_links,
    } = raw;

    let Some(selected) = latest_geometry(&geometries) else {
        debug!(%source, id = %id, "dropping hazard record without usable coordinates");
        return None;
    };

    let category = categories
        .into_iter()
        .map(|category| category.trim().to_owned())
        .find(|category| !category.is_empty())
        .unwrap_or_else(|| UNKNOWN_CATEGORY.to_owned());
    let source_link = source_links
        .into_iter()
        .find(|link| !link.trim().is_empty());

    Some(HazardReport {
        id,
        source,
        title,
        category,
        coordinates: selected.0,
        observed_at: selected.1.observed_at,
        source_link,
    })
}

fn latest_geometry(geometries: &[RawGeometry]) -> Option<(Coordinates, &RawGeometry)> {
    let mut best: Option<(Coordinates, &RawGeometry)> = None;
    for geometry in geometries {
        let Some(coordinates) = geometry.coordinates.and_then(valid_coordinates) else {
            continue;
        };
        let newer = match &best {
            None => true,
            Some((_, current)) => geometry.observed_at > current.observed_at,
        };
        if newer {
            best = Some((coordinates, geometry));
        }
    }
    best
}

fn valid_coordinates(coordinates: Coordinates) -> Option<Coordinates> {
    Coordinates::try_new(coordinates.longitude, coordinates.latitude).ok()
}

/// Normalise a map feed element into a discovered place.
///
/// The external id is the element type initial followed by the OSM id
/// (`n123`, `w45`, `r6`). Category comes from the `amenity` tag, then the
/// `healthcare` tag, then [`UNKNOWN_CATEGORY`]; a missing name becomes
/// [`UNKNOWN_NAME`].
#[must_use]
pub fn normalize_place(raw: RawPlaceRecord) -> Option<DiscoveredPlace> {
    let Some(prefix) = element_prefix(&raw.element_type) else {
        debug!(element_type = %raw.element_type, id = raw.element_id, "dropping element of unsupported type");
        return None;
    };
    let external_id = format!("{prefix}{}", raw.element_id);
    let Some(coordinates) = raw.coordinates.and_then(valid_coordinates) else {
        debug!(external_id = %external_id, "dropping place without usable coordinates");
        return None;
    };

    let tag = |key: &str| {
        raw.tags
            .get(key)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    };

    let category = tag("amenity")
        .or_else(|| tag("healthcare"))
        .unwrap_or(UNKNOWN_CATEGORY)
        .to_owned();
    let name = tag("name").unwrap_or(UNKNOWN_NAME).to_owned();
    let capacity = tag("capacity")
        .or_else(|| tag("beds"))
        .and_then(|value| value.parse::<i32>().ok())
        .filter(|value| *value >= 0);
    let specialties = tag("healthcare:speciality").map(|value| {
        value
            .split(';')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>()
    });

    Some(DiscoveredPlace {
        external_id,
        category,
        name,
        coordinates,
        capacity,
        specialties: specialties.filter(|items| !items.is_empty()),
    })
}

fn element_prefix(element_type: &str) -> Option<char> {
    match element_type {
        "node" => Some('n'),
        "way" => Some('w'),
        "relation" => Some('r'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    //! Normaliser edge cases: geometry selection, sentinels, drops.

    use std::collections::BTreeMap;

    use chrono::{DateTime, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::event::SourceKind;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn geometry(hour: Option<u32>, lon: f64, lat: f64) -> RawGeometry {
        RawGeometry {
            observed_at: hour.map(at),
            coordinates: Some(Coordinates::new(lon, lat)),
        }
    }

    #[fixture]
    fn hazard() -> RawHazardRecord {
        RawHazardRecord {
            id: "EONET_6001".to_owned(),
            source: SourceKind::Eonet,
            title: "Wildfire X".to_owned(),
            categories: vec!["Wildfires".to_owned()],
            geometries: vec![geometry(Some(1), -120.0, 38.0)],
            source_links: vec!["https://inciweb.example/1".to_owned()],
        }
    }

    fn place(element_type: &str, tags: &[(&str, &str)]) -> RawPlaceRecord {
        RawPlaceRecord {
            element_type: element_type.to_owned(),
            element_id: 123,
            coordinates: Some(Coordinates::new(-74.0, 40.7)),
            tags: tags
                .iter()
                .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
                .collect::<BTreeMap<_, _>>(),
        }
    }

    #[rstest]
    fn selects_latest_geometry(mut hazard: RawHazardRecord) {
        hazard.geometries = vec![
            geometry(Some(1), -120.0, 38.0),
            geometry(Some(5), -121.0, 39.0),
            geometry(Some(3), -122.0, 40.0),
        ];
        let report = normalize_hazard(hazard).expect("report");
        assert_eq!(report.coordinates, Coordinates::new(-121.0, 39.0));
        assert_eq!(report.observed_at, Some(at(5)));
    }

    #[rstest]
    fn ties_keep_first_encountered_geometry(mut hazard: RawHazardRecord) {
        hazard.geometries = vec![
            geometry(Some(2), -120.0, 38.0),
            geometry(Some(2), -121.0, 39.0),
        ];
        let report = normalize_hazard(hazard).expect("report");
        assert_eq!(report.coordinates, Coordinates::new(-120.0, 38.0));
    }

    #[rstest]
    fn dated_geometry_outranks_undated(mut hazard: RawHazardRecord) {
        hazard.geometries = vec![geometry(None, -120.0, 38.0), geometry(Some(1), -121.0, 39.0)];
        let report = normalize_hazard(hazard).expect("report");
        assert_eq!(report.coordinates, Coordinates::new(-121.0, 39.0));
    }

    #[rstest]
    fn skips_geometries_without_coordinates(mut hazard: RawHazardRecord) {
        hazard.geometries = vec![
            RawGeometry {
                observed_at: Some(at(9)),
                coordinates: None,
            },
            geometry(Some(1), -120.0, 38.0),
        ];
        let report = normalize_hazard(hazard).expect("report");
        assert_eq!(report.observed_at, Some(at(1)));
    }

    #[rstest]
    fn drops_records_without_usable_geometry(mut hazard: RawHazardRecord) {
        hazard.geometries = vec![
            RawGeometry {
                observed_at: Some(at(1)),
                coordinates: None,
            },
            geometry(Some(2), 200.0, 38.0),
        ];
        assert!(normalize_hazard(hazard).is_none());
    }

    #[rstest]
    fn missing_category_becomes_unknown(mut hazard: RawHazardRecord) {
        hazard.categories = vec!["  ".to_owned()];
        let report = normalize_hazard(hazard).expect("report");
        assert_eq!(report.category, UNKNOWN_CATEGORY);
    }

    #[rstest]
    fn first_source_link_is_kept(mut hazard: RawHazardRecord) {
        hazard.source_links = vec![
            "https://a.example".to_owned(),
            "https://b.example".to_owned(),
        ];
        let report = normalize_hazard(hazard).expect("report");
        assert_eq!(report.source_link.as_deref(), Some("https://a.example"));
    }

    #[rstest]
    #[case("node", "n123")]
    #[case("way", "w123")]
    #[case("relation", "r123")]
    fn external_id_uses_element_prefix(#[case] element_type: &str, #[case] expected: &str) {
        let discovered = normalize_place(place(element_type, &[("amenity", "hospital")]))
            .expect("place");
        assert_eq!(discovered.external_id, expected);
    }

    #[test]
    fn category_falls_back_to_healthcare_tag() {
        let discovered = normalize_place(place(
            "node",
            &[("healthcare", "blood_donation"), ("name", "Blood Bank")],
        ))
        .expect("place");
        assert_eq!(discovered.category, "blood_donation");
        assert_eq!(discovered.name, "Blood Bank");
    }

    #[test]
    fn unnamed_place_gets_sentinel() {
        let discovered = normalize_place(place("node", &[("amenity", "shelter")])).expect("place");
        assert_eq!(discovered.name, UNKNOWN_NAME);
        assert!(!discovered.is_named());
    }

    #[test]
    fn parses_optional_capacity_and_specialties() {
        let discovered = normalize_place(place(
            "node",
            &[
                ("amenity", "hospital"),
                ("beds", "250"),
                ("healthcare:speciality", "trauma; paediatrics"),
            ],
        ))
        .expect("place");
        assert_eq!(discovered.capacity, Some(250));
        assert_eq!(
            discovered.specialties,
            Some(vec!["trauma".to_owned(), "paediatrics".to_owned()])
        );
    }

    #[test]
    fn drops_place_without_coordinates() {
        let mut raw = place("way", &[("amenity", "hospital")]);
        raw.coordinates = None;
        assert!(normalize_place(raw).is_none());
    }

    #[test]
    fn drops_unsupported_element_types() {
        assert!(normalize_place(place("area", &[("amenity", "hospital")])).is_none());
    }

    #[rstest]
    fn dispatches_by_record_kind(hazard: RawHazardRecord) {
        let raw = RawRecord::Hazard(hazard);
        assert!(matches!(normalize(raw), Some(Normalized::Hazard(_))));
        let raw_place = RawRecord::Place(place("node", &[]));
        assert!(matches!(normalize(raw_place), Some(Normalized::Place(_))));
    }
}
