//! Process-local place store used when no database is configured.
//!
//! A single write lock serialises upserts, so one `external_id` never maps to
//! two places.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::geo::BoundingBox;
use crate::domain::place::{DEFAULT_CAPACITY, DiscoveredPlace, PersistedPlace, default_specialties};
use crate::domain::ports::{PlaceRepository, PlaceRepositoryError};

/// In-memory implementation of the place store port.
#[derive(Clone)]
pub struct InMemoryPlaceRepository {
    places: Arc<RwLock<HashMap<String, PersistedPlace>>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryPlaceRepository {
    /// Create an empty store stamping updates with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            places: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of stored places, named or not.
    pub async fn len(&self) -> usize {
        self.places.read().await.len()
    }

    /// Whether the store holds no places.
    pub async fn is_empty(&self) -> bool {
        self.places.read().await.is_empty()
    }

    fn refresh(&self, stored: &mut PersistedPlace, place: &DiscoveredPlace) {
        stored.category.clone_from(&place.category);
        stored.name.clone_from(&place.name);
        stored.coordinates = place.coordinates;
        if let Some(capacity) = place.capacity {
            stored.capacity = capacity;
        }
        if let Some(specialties) = &place.specialties {
            stored.specialties.clone_from(specialties);
        }
        stored.updated_at = self.clock.utc();
    }
}

#[async_trait]
impl PlaceRepository for InMemoryPlaceRepository {
    async fn upsert_place(
        &self,
        place: &DiscoveredPlace,
    ) -> Result<PersistedPlace, PlaceRepositoryError> {
        let mut places = self.places.write().await;
        if let Some(stored) = places.get_mut(&place.external_id) {
            self.refresh(stored, place);
            return Ok(stored.clone());
        }

        let inserted = PersistedPlace {
            id: Uuid::new_v4(),
            external_id: place.external_id.clone(),
            category: place.category.clone(),
            name: place.name.clone(),
            coordinates: place.coordinates,
            capacity: place.capacity.unwrap_or(DEFAULT_CAPACITY),
            specialties: place
                .specialties
                .clone()
                .unwrap_or_else(|| default_specialties(&place.category)),
            updated_at: self.clock.utc(),
        };
        places.insert(inserted.external_id.clone(), inserted.clone());
        Ok(inserted)
    }

    async fn update_place(
        &self,
        place: &DiscoveredPlace,
    ) -> Result<Option<PersistedPlace>, PlaceRepositoryError> {
        let mut places = self.places.write().await;
        Ok(places.get_mut(&place.external_id).map(|stored| {
            self.refresh(stored, place);
            stored.clone()
        }))
    }

    async fn find_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<PersistedPlace>, PlaceRepositoryError> {
        let places = self.places.read().await;
        let mut found: Vec<_> = places
            .values()
            .filter(|place| bounds.contains(&place.coordinates))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.external_id.cmp(&b.external_id));
        Ok(found)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PersistedPlace>, PlaceRepositoryError> {
        let places = self.places.read().await;
        Ok(places.values().find(|place| place.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Upsert semantics of the in-memory store.

    use chrono::{DateTime, Local, TimeZone, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::geo::{Coordinates, RadiusKm};

    struct FixtureClock;

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0)
                .single()
                .expect("valid fixture timestamp")
        }
    }

    #[fixture]
    fn repository() -> InMemoryPlaceRepository {
        InMemoryPlaceRepository::new(Arc::new(FixtureClock))
    }

    fn discovered(external_id: &str, name: &str) -> DiscoveredPlace {
        DiscoveredPlace {
            external_id: external_id.to_owned(),
            category: "hospital".to_owned(),
            name: name.to_owned(),
            coordinates: Coordinates::new(-74.0, 40.7),
            capacity: None,
            specialties: None,
        }
    }

    #[rstest]
    #[tokio::test]
    async fn first_upsert_assigns_defaults(repository: InMemoryPlaceRepository) {
        let stored = repository
            .upsert_place(&discovered("n1", "City Hospital"))
            .await
            .expect("upsert");
        assert_eq!(stored.capacity, DEFAULT_CAPACITY);
        assert_eq!(stored.specialties, vec!["hospital".to_owned()]);
        assert_eq!(stored.updated_at, FixtureClock.utc());
    }

    #[rstest]
    #[tokio::test]
    async fn repeated_upserts_keep_one_row(repository: InMemoryPlaceRepository) {
        let first = repository
            .upsert_place(&discovered("n123", "Old Name"))
            .await
            .expect("first upsert");
        let second = repository
            .upsert_place(&discovered("n123", "New Name"))
            .await
            .expect("second upsert");

        assert_eq!(repository.len().await, 1);
        assert_eq!(first.id, second.id);
        assert_eq!(second.name, "New Name");
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_upserts_of_one_id_keep_one_row(repository: InMemoryPlaceRepository) {
        let tasks = (0..20).map(|attempt| {
            let repository = repository.clone();
            tokio::spawn(async move {
                repository
                    .upsert_place(&discovered("n123", &format!("Name {attempt}")))
                    .await
            })
        });
        let stored: Vec<PersistedPlace> = futures_util::future::join_all(tasks)
            .await
            .into_iter()
            .map(|joined| joined.expect("task completes").expect("upsert"))
            .collect();

        assert_eq!(repository.len().await, 1);
        let first_id = stored[0].id;
        assert!(stored.iter().all(|place| place.id == first_id));
    }

    #[rstest]
    #[tokio::test]
    async fn update_keeps_capacity_unless_supplied(repository: InMemoryPlaceRepository) {
        let mut declared = discovered("w5", "Shelter");
        declared.capacity = Some(40);
        repository.upsert_place(&declared).await.expect("upsert");

        let refreshed = repository
            .update_place(&discovered("w5", "Shelter"))
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(refreshed.capacity, 40);
    }

    #[rstest]
    #[tokio::test]
    async fn update_of_missing_place_is_none(repository: InMemoryPlaceRepository) {
        let outcome = repository
            .update_place(&discovered("r9", "Nowhere"))
            .await
            .expect("update");
        assert!(outcome.is_none());
        assert!(repository.is_empty().await);
    }

    #[rstest]
    #[tokio::test]
    async fn bounds_and_id_lookups(repository: InMemoryPlaceRepository) {
        let stored = repository
            .upsert_place(&discovered("n1", "City Hospital"))
            .await
            .expect("upsert");
        let mut far = discovered("n2", "Far Away");
        far.coordinates = Coordinates::new(2.35, 48.85);
        repository.upsert_place(&far).await.expect("upsert");

        let bounds = BoundingBox::around(
            Coordinates::new(-74.0, 40.7),
            RadiusKm::try_new(5.0).expect("radius"),
        );
        let found = repository.find_in_bounds(&bounds).await.expect("query");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].external_id, "n1");

        let by_id = repository.find_by_id(stored.id).await.expect("lookup");
        assert_eq!(by_id.map(|place| place.external_id), Some("n1".to_owned()));
    }
}
