//! Response-capable resources and nearest-resource selection.
//!
//! Resources are stored places viewed as parties that can receive an alert.

use thiserror::Error;
use uuid::Uuid;

use super::geo::Coordinates;
use super::place::PersistedPlace;

/// No candidate resource was available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no resource found within the requested distance")]
pub struct NoneFound;

/// Pick the nearest candidate from a distance-ordered slice.
///
/// # Examples
/// ```
/// use horizon::domain::resource::{select_nearest, NoneFound};
///
/// assert_eq!(select_nearest(&[3, 5]), Ok(&3));
/// assert_eq!(select_nearest::<i32>(&[]), Err(NoneFound));
/// ```
pub fn select_nearest<T>(candidates: &[T]) -> Result<&T, NoneFound> {
    candidates.first().ok_or(NoneFound)
}

/// A stored place together with its distance from the query point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyResource {
    /// The stored place.
    pub place: PersistedPlace,
    /// Great-circle distance from the query point.
    pub distance_km: f64,
}

/// Alert addressed to one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceAlert {
    /// Identifier of the resource to notify.
    pub resource_id: Uuid,
    /// Display name of the resource.
    pub resource_name: String,
    /// Where help is needed.
    pub location: Coordinates,
}

/// Acknowledgement returned once an alert is handed to the notifier.
///
/// This confirms acceptance, not delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertAcknowledgement {
    /// Resource the alert was addressed to.
    pub resource_id: Uuid,
    /// Display name of that resource.
    pub resource_name: String,
    /// Human-readable confirmation.
    pub message: String,
}

impl AlertAcknowledgement {
    /// Acknowledge `alert` with the standard message.
    #[must_use]
    pub fn for_alert(alert: &ResourceAlert) -> Self {
        Self {
            resource_id: alert.resource_id,
            resource_name: alert.resource_name.clone(),
            message: "Alert sent successfully".to_owned(),
        }
    }
}
