// src/services/user_service.rs
// DOCUMENTATION: User creation and updates
// PURPOSE: Keep the password hashing rule in one place

use crate::db::EntityStore;
use crate::errors::PlacesError;
use crate::models::{CreateUserRequest, User};
use crate::services::{hash_password, EntityService};
use serde_json::{Map, Value};

pub struct UserService;

impl UserService {
    /// Create a new user
    /// DOCUMENTATION: "Missing email" wins over "Missing password"
    pub async fn create_user(
        store: &dyn EntityStore,
        req: CreateUserRequest,
    ) -> Result<User, PlacesError> {
        let email = req.email.ok_or(PlacesError::MissingField("email"))?;
        let password = req.password.ok_or(PlacesError::MissingField("password"))?;

        let mut user = User::new(email, hash_password(&password)?);
        user.first_name = req.first_name;
        user.last_name = req.last_name;

        EntityService::create(store, user).await
    }

    /// Update a user; a `password` key is hashed before it is stored
    pub async fn update_user(
        store: &dyn EntityStore,
        id: &str,
        mut body: Map<String, Value>,
    ) -> Result<User, PlacesError> {
        let current = store.fetch_required::<User>(id).await?;

        let password = match body.remove("password") {
            None => None,
            Some(Value::String(plain)) => Some(plain),
            Some(_) => {
                return Err(PlacesError::ValidationError(
                    "password must be a string".to_string(),
                ))
            }
        };

        let mut user = EntityService::merge(&current, body)?;
        if let Some(plain) = password {
            user.password = hash_password(&plain)?;
        }

        EntityService::save_updated(store, user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::FileStore;
    use crate::services::verify_password;
    use serde_json::json;
    use std::sync::Arc;

    fn create_request(email: Option<&str>, password: Option<&str>) -> CreateUserRequest {
        CreateUserRequest {
            email: email.map(str::to_string),
            password: password.map(str::to_string),
            first_name: Some("Betty".to_string()),
            last_name: None,
        }
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());
        let store = store.as_ref();

        let no_email = UserService::create_user(store, create_request(None, None)).await;
        assert!(matches!(no_email, Err(PlacesError::MissingField("email"))));
        let no_password =
            UserService::create_user(store, create_request(Some("b@hbnb.io"), None)).await;
        assert!(matches!(no_password, Err(PlacesError::MissingField("password"))));

        let user = UserService::create_user(store, create_request(Some("b@hbnb.io"), Some("pwd")))
            .await
            .unwrap();
        let stored: User = store.fetch_required(&user.id).await.unwrap();

        assert_ne!(stored.password, "pwd");
        assert!(verify_password("pwd", &stored.password));
        assert_eq!(stored.first_name.as_deref(), Some("Betty"));
    }

    #[tokio::test]
    async fn test_update_rehashes_and_keeps_email() {
        let store: Arc<dyn EntityStore> = Arc::new(FileStore::in_memory());
        let store = store.as_ref();
        let user = UserService::create_user(store, create_request(Some("b@hbnb.io"), Some("old")))
            .await
            .unwrap();

        let body = json!({ "password": "new", "email": "evil@hbnb.io", "last_name": "Holberton" });
        let updated =
            UserService::update_user(store, &user.id, body.as_object().cloned().unwrap())
                .await
                .unwrap();

        assert_eq!(updated.email, "b@hbnb.io");
        assert_eq!(updated.last_name.as_deref(), Some("Holberton"));
        assert!(verify_password("new", &updated.password));
        assert!(!verify_password("old", &updated.password));

        let bad = json!({ "password": 1234 });
        let result =
            UserService::update_user(store, &user.id, bad.as_object().cloned().unwrap()).await;
        assert!(matches!(result, Err(PlacesError::ValidationError(_))));
    }
}
