//! Folding near-duplicate hazard reports into canonical events.
//!
//! Two passes are available. [`collapse_cross_source`] is a coarse exact-key
//! pass for reports from different feeds describing the same spot, and
//! [`merge_events`] is the greedy distance-based clustering that produces
//! the canonical [`Event`] list.

use std::collections::HashMap;

use super::event::{Event, HazardReport};

/// Maximum distance between reports of one incident.
pub const MERGE_THRESHOLD_KM: f64 = 10.0;

/// Greedily merge reports into canonical events.
///
/// Reports are visited in order; each joins the first accumulated event
/// with the same title and category whose canonical coordinates lie within
/// `threshold_km`, or starts a new event. Canonical fields stay those of
/// the first report. Runs in `O(n * m)` for `m` canonical events.
///
/// # Examples
/// ```
/// use horizon::domain::event::{HazardReport, SourceKind};
/// use horizon::domain::geo::Coordinates;
/// use horizon::domain::merge::{merge_events, MERGE_THRESHOLD_KM};
///
/// let report = |id: &str, lon: f64| HazardReport {
///     id: id.into(),
///     source: SourceKind::Eonet,
///     title: "Wildfire X".into(),
///     category: "Wildfires".into(),
///     coordinates: Coordinates::new(lon, 38.0),
///     observed_at: None,
///     source_link: None,
/// };
/// let events = merge_events(vec![report("a", -120.0), report("b", -120.01)], MERGE_THRESHOLD_KM);
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].occurrences.len(), 2);
/// ```
#[must_use]
pub fn merge_events<I>(reports: I, threshold_km: f64) -> Vec<Event>
where
    I: IntoIterator<Item = HazardReport>,
{
    let mut events: Vec<Event> = Vec::new();
    for report in reports {
        match events
            .iter_mut()
            .find(|event| event.matches(&report, threshold_km))
        {
            Some(event) => event.absorb(&report),
            None => events.push(Event::from_first(report)),
        }
    }
    events
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct CellKey {
    category: String,
    lat_centi: i64,
    lon_centi: i64,
}

impl CellKey {
    fn of(report: &HazardReport) -> Self {
        Self {
            category: report.category.clone(),
            lat_centi: to_centi_degrees(report.coordinates.latitude),
            lon_centi: to_centi_degrees(report.coordinates.longitude),
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "validated coordinates scaled by 100 fit comfortably in i64"
)]
fn to_centi_degrees(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Collapse reports sharing `(category, round(lat, 2), round(lon, 2))`.
///
/// The most recently observed report per key survives, taking the slot where
/// the key first appeared; equally recent reports keep the earlier one.
#[must_use]
pub fn collapse_cross_source(reports: Vec<HazardReport>) -> Vec<HazardReport> {
    let mut slots: Vec<HazardReport> = Vec::with_capacity(reports.len());
    let mut index: HashMap<CellKey, usize> = HashMap::new();

    for report in reports {
        let key = CellKey::of(&report);
        match index.get(&key) {
            Some(&slot) => {
                if let Some(existing) = slots.get_mut(slot) {
                    if report.observed_at > existing.observed_at {
                        *existing = report;
                    }
                }
            }
            None => {
                index.insert(key, slots.len());
                slots.push(report);
            }
        }
    }
    slots
}

#[cfg(test)]
mod tests {
    //! Merge behaviour: greedy clustering and the exact-key collapse.

    use chrono::{DateTime, TimeZone, Utc};
    use rstest::rstest;

    use super::*;
    use crate::domain::event::SourceKind;
    use crate::domain::geo::Coordinates;

    /// Degrees of longitude spanning `km` at latitude 40.
    fn lon_offset(km: f64) -> f64 {
        km / (111.195 * 40.0_f64.to_radians().cos())
    }

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 8, 1, hour, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn report(id: &str, title: &str, category: &str, lon: f64, lat: f64) -> HazardReport {
        HazardReport {
            id: id.to_owned(),
            source: SourceKind::Eonet,
            title: title.to_owned(),
            category: category.to_owned(),
            coordinates: Coordinates::new(lon, lat),
            observed_at: None,
            source_link: None,
        }
    }

    #[test]
    fn merges_reports_three_km_apart() {
        let events = merge_events(
            vec![
                report("a", "Wildfire X", "Wildfire", -120.0, 40.0),
                report("b", "Wildfire X", "Wildfire", -120.0 + lon_offset(3.0), 40.0),
            ],
            MERGE_THRESHOLD_KM,
        );
        assert_eq!(events.len(), 1);
        let ids: Vec<_> = events[0].occurrences.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn keeps_reports_fifty_km_apart_separate() {
        let events = merge_events(
            vec![
                report("a", "Wildfire X", "Wildfire", -120.0, 40.0),
                report("b", "Wildfire X", "Wildfire", -120.0 + lon_offset(50.0), 40.0),
            ],
            MERGE_THRESHOLD_KM,
        );
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| event.occurrences.len() == 1));
    }

    #[rstest]
    #[case::title("Wildfire Y", "Wildfire")]
    #[case::category("Wildfire X", "Floods")]
    fn differing_labels_never_merge(#[case] title: &str, #[case] category: &str) {
        let events = merge_events(
            vec![
                report("a", "Wildfire X", "Wildfire", -120.0, 40.0),
                report("b", title, category, -120.0, 40.0),
            ],
            MERGE_THRESHOLD_KM,
        );
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn canonical_fields_follow_first_occurrence() {
        let mut later = report("b", "Wildfire X", "Wildfire", -120.0 + lon_offset(4.0), 40.0);
        later.observed_at = Some(at(9));
        let mut first = report("a", "Wildfire X", "Wildfire", -120.0, 40.0);
        first.observed_at = Some(at(1));

        let events = merge_events(vec![first, later], MERGE_THRESHOLD_KM);
        assert_eq!(events[0].id, "a");
        assert_eq!(events[0].observed_at, Some(at(1)));
        assert_eq!(events[0].coordinates, Coordinates::new(-120.0, 40.0));
    }

    #[test]
    fn first_matching_event_wins() {
        // `c` is within range of both canonical events; it joins the first.
        let events = merge_events(
            vec![
                report("a", "Flood", "Floods", -120.0, 40.0),
                report("b", "Flood", "Floods", -120.0 + lon_offset(12.0), 40.0),
                report("c", "Flood", "Floods", -120.0 + lon_offset(6.0), 40.0),
            ],
            MERGE_THRESHOLD_KM,
        );
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].occurrences.len(), 2);
        assert_eq!(events[1].occurrences.len(), 1);
    }

    #[test]
    fn every_report_lands_in_exactly_one_event() {
        let reports: Vec<_> = (0..20)
            .map(|i| {
                let km = f64::from(i) * 4.0;
                report(&format!("r{i}"), "Storm", "Severe Storms", -120.0 + lon_offset(km), 40.0)
            })
            .collect();
        let events = merge_events(reports, MERGE_THRESHOLD_KM);
        let mut ids: Vec<_> = events
            .iter()
            .flat_map(|event| event.occurrences.iter().map(|o| o.id.clone()))
            .collect();
        ids.sort();
        let mut expected: Vec<_> = (0..20).map(|i| format!("r{i}")).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn merging_is_idempotent() {
        let reports: Vec<_> = (0..12)
            .map(|i| {
                let km = f64::from(i) * 7.0;
                report(&format!("r{i}"), "Storm", "Severe Storms", -120.0 + lon_offset(km), 40.0)
            })
            .collect();
        let once = merge_events(reports, MERGE_THRESHOLD_KM);
        let twice = merge_events(
            once.iter().map(Event::representative),
            MERGE_THRESHOLD_KM,
        );

        let canonical = |events: &[Event]| -> Vec<String> {
            events.iter().map(|event| event.id.clone()).collect()
        };
        assert_eq!(canonical(&once), canonical(&twice));
        assert!(twice.iter().all(|event| event.occurrences.len() == 1));
    }

    #[test]
    fn collapse_keeps_most_recent_per_cell() {
        let mut eonet = report("EONET_1", "Quake", "Earthquakes", 142.371, 38.297);
        eonet.observed_at = Some(at(1));
        let mut usgs = report("us7000", "M 6.1 - Honshu", "Earthquakes", 142.369, 38.302);
        usgs.source = SourceKind::Usgs;
        usgs.observed_at = Some(at(2));
        let other = report("EONET_2", "Fire", "Wildfires", 142.371, 38.297);

        let collapsed = collapse_cross_source(vec![eonet, other.clone(), usgs.clone()]);
        assert_eq!(collapsed, vec![usgs, other]);
    }

    #[test]
    fn collapse_ties_keep_earlier_report() {
        let first = report("a", "Quake", "Earthquakes", 10.0, 10.0);
        let second = report("b", "Quake", "Earthquakes", 10.001, 10.001);
        let collapsed = collapse_cross_source(vec![first.clone(), second]);
        assert_eq!(collapsed, vec![first]);
    }

    #[test]
    fn collapse_separates_distinct_cells() {
        let collapsed = collapse_cross_source(vec![
            report("a", "Quake", "Earthquakes", 10.0, 10.0),
            report("b", "Quake", "Earthquakes", 10.02, 10.0),
        ]);
        assert_eq!(collapsed.len(), 2);
    }
}
