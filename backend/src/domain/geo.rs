//! Great-circle distance and bounding-box helpers.
//!
//! Distances use the haversine formula on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`]. Bounding boxes are a cheap pre-filter: they always
//! contain the exact search circle, so an exact distance check applied
//! afterwards can only discard candidates, never miss them.
//!
//! Hazard queries measure radii in kilometres while place and resource
//! queries measure them in metres. [`RadiusKm`] and [`RadiusMeters`] keep the
//! two conventions apart inside the crate.

use thiserror::Error;

/// Mean Earth radius used by every distance computation.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Extra degrees added to bounding-box edges to absorb rounding error.
const EDGE_SLACK_DEGREES: f64 = 1e-9;

/// Validation errors raised when constructing geographic primitives.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeoValidationError {
    /// Latitude is not finite or lies outside `[-90, 90]`.
    #[error("latitude must be a finite number within [-90, 90], got {0}")]
    InvalidLatitude(f64),
    /// Longitude is not finite or lies outside `[-180, 180]`.
    #[error("longitude must be a finite number within [-180, 180], got {0}")]
    InvalidLongitude(f64),
    /// Radius is not finite or is negative.
    #[error("radius must be a finite, non-negative number, got {0}")]
    InvalidRadius(f64),
}

/// WGS84 position stored in GeoJSON order (longitude first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

impl Coordinates {
    /// Construct coordinates without range checks.
    ///
    /// Prefer [`Coordinates::try_new`] for values that come from outside the
    /// process.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Construct coordinates, rejecting non-finite or out-of-range values.
    ///
    /// # Examples
    /// ```
    /// use horizon::domain::geo::Coordinates;
    ///
    /// assert!(Coordinates::try_new(-74.0, 40.7).is_ok());
    /// assert!(Coordinates::try_new(-74.0, 91.0).is_err());
    /// ```
    pub fn try_new(longitude: f64, latitude: f64) -> Result<Self, GeoValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(GeoValidationError::InvalidLatitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(GeoValidationError::InvalidLongitude(longitude));
        }
        Ok(Self::new(longitude, latitude))
    }

    /// Haversine distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        distance_km(self.latitude, self.longitude, other.latitude, other.longitude)
    }
}

/// Haversine great-circle distance between two points, in kilometres.
///
/// # Examples
/// ```
/// use horizon::domain::geo::distance_km;
///
/// let d = distance_km(40.70, -74.00, 40.70, -74.00);
/// assert_eq!(d, 0.0);
/// ```
#[must_use]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let half_d_phi = (lat2 - lat1).to_radians() / 2.0;
    let half_d_lambda = (lon2 - lon1).to_radians() / 2.0;

    let a = half_d_phi.sin().powi(2) + phi1.cos() * phi2.cos() * half_d_lambda.sin().powi(2);
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Search radius in kilometres, used by hazard queries.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RadiusKm(f64);

impl RadiusKm {
    /// Validate and wrap a kilometre radius.
    pub fn try_new(value: f64) -> Result<Self, GeoValidationError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(GeoValidationError::InvalidRadius(value))
        }
    }

    /// Raw kilometre value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Search radius in metres, used by place and resource queries.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct RadiusMeters(f64);

impl RadiusMeters {
    /// Validate and wrap a metre radius.
    pub fn try_new(value: f64) -> Result<Self, GeoValidationError> {
        if value.is_finite() && value >= 0.0 {
            Ok(Self(value))
        } else {
            Err(GeoValidationError::InvalidRadius(value))
        }
    }

    /// Raw metre value.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Convert to kilometres for the distance helpers.
    #[must_use]
    pub fn to_km(self) -> RadiusKm {
        RadiusKm(self.0 / 1000.0)
    }
}

/// Rectangular latitude/longitude region enclosing a search circle.
///
/// Longitude bounds are kept unwrapped: a circle centred near the
/// antimeridian yields `min_lon < -180` or `max_lon > 180`, and
/// [`BoundingBox::contains`] tests the wrapped equivalents of a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Southern edge in degrees.
    pub min_lat: f64,
    /// Northern edge in degrees.
    pub max_lat: f64,
    /// Western edge in degrees, possibly below -180.
    pub min_lon: f64,
    /// Eastern edge in degrees, possibly above 180.
    pub max_lon: f64,
}

impl BoundingBox {
    /// Build the box enclosing every point within `radius` of `center`.
    ///
    /// The latitude delta is the angular radius; the longitude delta widens
    /// with latitude as `asin(sin(d) / cos(lat))`. When the circle reaches a
    /// pole every longitude is covered.
    ///
    /// # Examples
    /// ```
    /// use horizon::domain::geo::{BoundingBox, Coordinates, RadiusKm};
    ///
    /// let center = Coordinates::new(-74.0, 40.7);
    /// let radius = RadiusKm::try_new(10.0).expect("valid radius");
    /// let bbox = BoundingBox::around(center, radius);
    /// assert!(bbox.contains(&center));
    /// ```
    #[must_use]
    pub fn around(center: Coordinates, radius: RadiusKm) -> Self {
        let angular = radius.get() / EARTH_RADIUS_KM;
        let lat_delta = angular.to_degrees() + EDGE_SLACK_DEGREES;
        let min_lat = center.latitude - lat_delta;
        let max_lat = center.latitude + lat_delta;

        if min_lat <= -90.0 || max_lat >= 90.0 || angular >= std::f64::consts::FRAC_PI_2 {
            return Self {
                min_lat: min_lat.max(-90.0),
                max_lat: max_lat.min(90.0),
                min_lon: -180.0,
                max_lon: 180.0,
            };
        }

        let ratio = (angular.sin() / center.latitude.to_radians().cos()).clamp(-1.0, 1.0);
        let lon_delta = ratio.asin().to_degrees() + EDGE_SLACK_DEGREES;
        Self {
            min_lat,
            max_lat,
            min_lon: center.longitude - lon_delta,
            max_lon: center.longitude + lon_delta,
        }
    }

    /// Return whether `point` lies inside the box, honouring antimeridian wrap.
    #[must_use]
    pub fn contains(&self, point: &Coordinates) -> bool {
        if point.latitude < self.min_lat || point.latitude > self.max_lat {
            return false;
        }
        [
            point.longitude,
            point.longitude - 360.0,
            point.longitude + 360.0,
        ]
        .into_iter()
        .any(|lon| lon >= self.min_lon && lon <= self.max_lon)
    }

    /// Longitude ranges normalised to `[-180, 180]`, split at the antimeridian.
    ///
    /// Storage adapters use this to express the box as one or two plain
    /// range predicates.
    #[must_use]
    pub fn longitude_ranges(&self) -> Vec<(f64, f64)> {
        if self.max_lon - self.min_lon >= 360.0 {
            return vec![(-180.0, 180.0)];
        }
        if self.min_lon < -180.0 {
            return vec![(self.min_lon + 360.0, 180.0), (-180.0, self.max_lon)];
        }
        if self.max_lon > 180.0 {
            return vec![(self.min_lon, 180.0), (-180.0, self.max_lon - 360.0)];
        }
        vec![(self.min_lon, self.max_lon)]
    }
}
