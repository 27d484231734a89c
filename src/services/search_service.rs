// src/services/search_service.rs
// DOCUMENTATION: Place search across states, cities and amenities
// PURPOSE: Backs POST /places_search

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{Amenity, City, Place, PlaceSearchFilter, State};
use std::collections::{BTreeSet, HashSet};

pub struct PlaceSearchService;

impl PlaceSearchService {
    /// Places matching the filter, sorted by id
    /// DOCUMENTATION:
    /// - no states and no cities: every Place is a candidate
    /// - otherwise: Places of every City of each State, plus Places of each City
    /// - a non-empty amenity filter keeps Places having at least one of them
    ///
    /// An unknown state or city id fails the whole search with NotFound.
    /// Unknown amenity ids are dropped, so a filter made only of unknown ids
    /// matches nothing.
    pub async fn search(
        store: &dyn EntityStore,
        filter: &PlaceSearchFilter,
    ) -> Result<Vec<Place>, PlacesError> {
        let candidates = Self::candidates(store, filter).await?;

        if filter.amenities.is_empty() {
            log::debug!("Place search: {} candidates, no amenity filter", candidates.len());
            return Ok(Self::sorted(candidates));
        }

        let wanted = Self::resolve_amenities(store, &filter.amenities).await?;
        if wanted.is_empty() {
            log::debug!("Place search: none of the requested amenities exist");
            return Ok(Vec::new());
        }

        let mut results = HashSet::new();
        for place in candidates {
            // Re-read at comparison time; links may have changed since the
            // candidate was loaded
            let amenities: HashSet<Amenity> =
                store.place_amenities(&place.id).await?.into_iter().collect();
            if !wanted.is_disjoint(&amenities) {
                results.insert(place);
            }
        }

        log::debug!("Place search: {} results", results.len());
        Ok(Self::sorted(results))
    }

    async fn candidates(
        store: &dyn EntityStore,
        filter: &PlaceSearchFilter,
    ) -> Result<HashSet<Place>, PlacesError> {
        if filter.states.is_empty() && filter.cities.is_empty() {
            return Ok(store.fetch_all::<Place>().await?.into_iter().collect());
        }

        let mut places = HashSet::new();

        for state_id in &filter.states {
            let state = store.fetch_required::<State>(state_id).await?;
            for city in store.related::<City>("state_id", &state.id).await? {
                places.extend(store.related::<Place>("city_id", &city.id).await?);
            }
        }

        for city_id in &filter.cities {
            let city = store.fetch_required::<City>(city_id).await?;
            places.extend(store.related::<Place>("city_id", &city.id).await?);
        }

        Ok(places)
    }

    async fn resolve_amenities(
        store: &dyn EntityStore,
        ids: &BTreeSet<String>,
    ) -> Result<HashSet<Amenity>, PlacesError> {
        let mut amenities = HashSet::new();
        for id in ids {
            match store.fetch::<Amenity>(id).await? {
                Some(amenity) => {
                    amenities.insert(amenity);
                }
                None => log::debug!("Ignoring unknown amenity {} in search", id),
            }
        }
        Ok(amenities)
    }

    fn sorted(places: HashSet<Place>) -> Vec<Place> {
        let mut places: Vec<Place> = places.into_iter().collect();
        places.sort_by(|a, b| a.id.cmp(&b.id));
        places
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStore;
    use std::sync::Arc;

    /// S1:[C1,C2], S2:[C3]; C1:[P1,P2], C2:[P3], C3:[P4]
    /// P1 {A1}, P2 {}, P3 {A2}, P4 {A1,A2}
    struct Fixture {
        store: Arc<dyn EntityStore>,
        s1: State,
        s2: State,
        c1: City,
        c2: City,
        a1: Amenity,
        a2: Amenity,
        p1: Place,
        p2: Place,
        p3: Place,
        p4: Place,
    }

    async fn fixture() -> Fixture {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());

        let s1 = State::new("S1");
        let s2 = State::new("S2");
        let c1 = City::new(&s1.id, "C1");
        let c2 = City::new(&s1.id, "C2");
        let c3 = City::new(&s2.id, "C3");
        let a1 = Amenity::new("A1");
        let a2 = Amenity::new("A2");
        let p1 = Place::new(&c1.id, "u1", "P1");
        let p2 = Place::new(&c1.id, "u1", "P2");
        let p3 = Place::new(&c2.id, "u1", "P3");
        let p4 = Place::new(&c3.id, "u1", "P4");

        for state in [&s1, &s2] {
            store.persist(state).await.unwrap();
        }
        for city in [&c1, &c2, &c3] {
            store.persist(city).await.unwrap();
        }
        for amenity in [&a1, &a2] {
            store.persist(amenity).await.unwrap();
        }
        for place in [&p1, &p2, &p3, &p4] {
            store.persist(place).await.unwrap();
        }

        store.link_amenity(&p1.id, &a1.id).await.unwrap();
        store.link_amenity(&p3.id, &a2.id).await.unwrap();
        store.link_amenity(&p4.id, &a1.id).await.unwrap();
        store.link_amenity(&p4.id, &a2.id).await.unwrap();

        Fixture {
            store,
            s1,
            s2,
            c1,
            c2,
            a1,
            a2,
            p1,
            p2,
            p3,
            p4,
        }
    }

    fn filter(states: &[&str], cities: &[&str], amenities: &[&str]) -> PlaceSearchFilter {
        let set = |ids: &[&str]| ids.iter().map(|id| id.to_string()).collect();
        PlaceSearchFilter {
            states: set(states),
            cities: set(cities),
            amenities: set(amenities),
        }
    }

    fn ids(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.id.as_str()).collect()
    }

    fn sorted_ids<'p>(places: &[&'p Place]) -> Vec<&'p str> {
        let mut ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        ids.sort();
        ids
    }

    #[tokio::test]
    async fn test_empty_filter_returns_every_place() {
        let f = fixture().await;
        let result = PlaceSearchService::search(f.store.as_ref(), &filter(&[], &[], &[]))
            .await
            .unwrap();

        assert_eq!(result.len(), 4);
        assert_eq!(ids(&result), sorted_ids(&[&f.p1, &f.p2, &f.p3, &f.p4]));
    }

    #[tokio::test]
    async fn test_state_with_amenity() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[&f.s1.id], &[], &[&f.a1.id]),
        )
        .await
        .unwrap();

        assert_eq!(ids(&result), vec![f.p1.id.as_str()]);
    }

    #[tokio::test]
    async fn test_cities_without_amenities() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[], &[&f.c1.id, &f.c2.id], &[]),
        )
        .await
        .unwrap();

        assert_eq!(ids(&result), sorted_ids(&[&f.p1, &f.p2, &f.p3]));
    }

    #[tokio::test]
    async fn test_city_inside_requested_state_is_not_duplicated() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[&f.s1.id], &[&f.c1.id], &[]),
        )
        .await
        .unwrap();

        assert_eq!(result.len(), 3);
        assert_eq!(ids(&result), sorted_ids(&[&f.p1, &f.p2, &f.p3]));
    }

    #[tokio::test]
    async fn test_amenities_only_uses_or_semantics() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[], &[], &[&f.a1.id, &f.a2.id]),
        )
        .await
        .unwrap();

        assert_eq!(ids(&result), sorted_ids(&[&f.p1, &f.p3, &f.p4]));

        let only_a2 =
            PlaceSearchService::search(f.store.as_ref(), &filter(&[], &[], &[&f.a2.id]))
                .await
                .unwrap();
        assert_eq!(ids(&only_a2), sorted_ids(&[&f.p3, &f.p4]));
    }

    #[tokio::test]
    async fn test_unknown_state_fails_whole_search() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[&f.s1.id, "no-such-state"], &[&f.c1.id], &[]),
        )
        .await;

        assert!(matches!(result, Err(PlacesError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_city_fails_whole_search() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[&f.s2.id], &["no-such-city"], &[&f.a1.id]),
        )
        .await;

        assert!(matches!(result, Err(PlacesError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_unknown_amenity_is_dropped() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[], &[], &[&f.a2.id, "no-such-amenity"]),
        )
        .await
        .unwrap();

        assert_eq!(ids(&result), sorted_ids(&[&f.p3, &f.p4]));
    }

    #[tokio::test]
    async fn test_only_unknown_amenities_match_nothing() {
        let f = fixture().await;
        let result = PlaceSearchService::search(
            f.store.as_ref(),
            &filter(&[&f.s1.id], &[], &["no-such-amenity"]),
        )
        .await
        .unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_amenity_links_are_read_at_search_time() {
        let f = fixture().await;
        let with_a1 = filter(&[], &[], &[&f.a1.id]);

        let before = PlaceSearchService::search(f.store.as_ref(), &with_a1).await.unwrap();
        assert!(!ids(&before).contains(&f.p2.id.as_str()));

        f.store.link_amenity(&f.p2.id, &f.a1.id).await.unwrap();
        f.store.unlink_amenity(&f.p1.id, &f.a1.id).await.unwrap();

        let after = PlaceSearchService::search(f.store.as_ref(), &with_a1).await.unwrap();
        assert_eq!(ids(&after), sorted_ids(&[&f.p2, &f.p4]));
    }
}
