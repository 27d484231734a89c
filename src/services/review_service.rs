// src/services/review_service.rs
// DOCUMENTATION: Review operations scoped to a place
// PURPOSE: Listing and creation checks for reviews of a place

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{CreateReviewRequest, Place, Review, User};
use crate::services::EntityService;

pub struct ReviewService;

impl ReviewService {
    /// Reviews of a place
    pub async fn reviews_of_place(
        store: &dyn EntityStore,
        place_id: &str,
    ) -> Result<Vec<Review>, PlacesError> {
        let place = store.fetch_required::<Place>(place_id).await?;
        store.related::<Review>("place_id", &place.id).await
    }

    /// Create a new review
    /// DOCUMENTATION: Checks run in order: place exists, user_id present,
    /// user exists, text present
    pub async fn create_review(
        store: &dyn EntityStore,
        place_id: &str,
        req: CreateReviewRequest,
    ) -> Result<Review, PlacesError> {
        let place = store.fetch_required::<Place>(place_id).await?;

        let user_id = req.user_id.ok_or(PlacesError::MissingField("user_id"))?;
        let user = store.fetch_required::<User>(&user_id).await?;
        let text = req.text.ok_or(PlacesError::MissingField("text"))?;

        EntityService::create(store, Review::new(place.id, user.id, text)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_create_and_list() {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());
        let store = store.as_ref();
        let user = User::new("guest@example.com", "hash");
        let place = Place::new("c1", "u1", "Loft");
        let other = Place::new("c1", "u1", "Cabin");
        store.persist(&user).await.unwrap();
        store.persist(&place).await.unwrap();
        store.persist(&other).await.unwrap();

        let missing_text = ReviewService::create_review(
            store,
            &place.id,
            CreateReviewRequest {
                user_id: Some(user.id.clone()),
                text: None,
            },
        )
        .await;
        assert!(matches!(missing_text, Err(PlacesError::MissingField("text"))));

        let review = ReviewService::create_review(
            store,
            &place.id,
            CreateReviewRequest {
                user_id: Some(user.id.clone()),
                text: Some("Lovely".to_string()),
            },
        )
        .await
        .unwrap();

        let reviews = ReviewService::reviews_of_place(store, &place.id).await.unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, review.id);
        assert!(ReviewService::reviews_of_place(store, &other.id)
            .await
            .unwrap()
            .is_empty());
    }
}
