//! Radius filtering: bounding-box pre-filter followed by exact haversine.

use super::geo::{BoundingBox, Coordinates, RadiusKm};

/// Anything with a position on the map.
pub trait Located {
    /// Position used for proximity checks.
    fn coordinates(&self) -> Coordinates;
}

/// Keep the records within `radius` of `center`, preserving input order.
///
/// Records outside the bounding box are discarded without computing an
/// exact distance.
///
/// # Examples
/// ```
/// use horizon::domain::geo::{Coordinates, RadiusKm};
/// use horizon::domain::proximity::{filter_within, Located};
///
/// struct Pin(Coordinates);
/// impl Located for Pin {
///     fn coordinates(&self) -> Coordinates { self.0 }
/// }
///
/// let center = Coordinates::new(-74.0, 40.7);
/// let kept = filter_within(
///     vec![Pin(center), Pin(Coordinates::new(0.0, 0.0))],
///     center,
///     RadiusKm::try_new(10.0).expect("radius"),
/// );
/// assert_eq!(kept.len(), 1);
/// ```
pub fn filter_within<T, I>(records: I, center: Coordinates, radius: RadiusKm) -> Vec<T>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let bbox = BoundingBox::around(center, radius);
    records
        .into_iter()
        .filter(|record| {
            let position = record.coordinates();
            bbox.contains(&position) && center.distance_km(&position) <= radius.get()
        })
        .collect()
}

/// Keep the records within `radius` of `center`, nearest first, paired with
/// their distance in kilometres.
///
/// Equal distances keep input order.
pub fn nearest_within<T, I>(records: I, center: Coordinates, radius: RadiusKm) -> Vec<(T, f64)>
where
    T: Located,
    I: IntoIterator<Item = T>,
{
    let mut ranked: Vec<(T, f64)> = filter_within(records, center, radius)
        .into_iter()
        .map(|record| {
            let distance = center.distance_km(&record.coordinates());
            (record, distance)
        })
        .collect();
    ranked.sort_by(|left, right| left.1.total_cmp(&right.1));
    ranked
}
