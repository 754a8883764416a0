//! Points of interest discovered from the map feed and their stored form.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::geo::Coordinates;
use super::proximity::Located;

/// Name sentinel for places the feed left unnamed.
///
/// Such places are still cached but never returned to callers.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Capacity assigned on first insert when the feed does not supply one.
pub const DEFAULT_CAPACITY: i32 = 100;

/// Specialties assigned on first insert when the feed does not supply any.
#[must_use]
pub fn default_specialties(category: &str) -> Vec<String> {
    vec![category.to_owned()]
}

/// A place as reported by the feed, before persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredPlace {
    /// Stable feed identifier, e.g. `n123` for OSM node 123.
    pub external_id: String,
    /// `amenity` or `healthcare` tag value.
    pub category: String,
    /// `name` tag, or [`UNKNOWN_NAME`].
    pub name: String,
    /// Node position or way centre.
    pub coordinates: Coordinates,
    /// Capacity when the feed declares one.
    pub capacity: Option<i32>,
    /// Specialties when the feed declares any.
    pub specialties: Option<Vec<String>>,
}

/// A place as held by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedPlace {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// Unique upsert key.
    pub external_id: String,
    /// Latest category reported by the feed.
    pub category: String,
    /// Latest name reported by the feed.
    pub name: String,
    /// Latest position reported by the feed.
    pub coordinates: Coordinates,
    /// How many people the place can take in.
    pub capacity: i32,
    /// Kinds of help the place offers.
    pub specialties: Vec<String>,
    /// When the row was last written.
    pub updated_at: DateTime<Utc>,
}

impl PersistedPlace {
    /// Whether the place may appear in public results.
    #[must_use]
    pub fn is_named(&self) -> bool {
        is_named(&self.name)
    }
}

impl DiscoveredPlace {
    /// Whether the place may appear in public results.
    #[must_use]
    pub fn is_named(&self) -> bool {
        is_named(&self.name)
    }
}

fn is_named(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty() && trimmed != UNKNOWN_NAME
}

impl Located for PersistedPlace {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl Located for DiscoveredPlace {
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}
