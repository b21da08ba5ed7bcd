//! Food listing service

use crate::db::repositories::FoodRepository;
use crate::models::{CreateFoodInput, Food, FoodFilter, UpdateFoodInput};
use std::sync::Arc;

/// Error types for food listing operations
#[derive(Debug, thiserror::Error)]
pub enum FoodServiceError {
    /// No listing with the requested id
    #[error("Food not found")]
    NotFound,

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

/// Business logic for food listings: thin orchestration over the repository,
/// plus the patch-merge for partial updates.
pub struct FoodService {
    repo: Arc<dyn FoodRepository>,
}

impl FoodService {
    pub fn new(repo: Arc<dyn FoodRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, input: CreateFoodInput) -> Result<Food, FoodServiceError> {
        let food = Food::new(input);
        Ok(self.repo.create(&food).await?)
    }

    pub async fn get(&self, id: i64) -> Result<Food, FoodServiceError> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(FoodServiceError::NotFound)
    }

    pub async fn browse(&self, filter: FoodFilter) -> Result<Vec<Food>, FoodServiceError> {
        Ok(self.repo.list(&filter).await?)
    }

    pub async fn list_by_donor(&self, email: &str) -> Result<Vec<Food>, FoodServiceError> {
        Ok(self.repo.list_by_donor(email).await?)
    }

    /// Apply a partial update: only fields present in the patch change.
    pub async fn update(&self, id: i64, patch: UpdateFoodInput) -> Result<Food, FoodServiceError> {
        let mut food = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or(FoodServiceError::NotFound)?;

        if let Some(name) = patch.food_name {
            food.food_name = name;
        }
        if let Some(image) = patch.food_image {
            food.food_image = Some(image);
        }
        if let Some(quantity) = patch.food_quantity {
            food.food_quantity = Some(quantity);
        }
        if let Some(location) = patch.pickup_location {
            food.pickup_location = Some(location);
        }
        if let Some(date) = patch.expired_date {
            food.expired_date = Some(date);
        }
        if let Some(notes) = patch.notes {
            food.notes = Some(notes);
        }
        if let Some(donor_name) = patch.donor_name {
            food.donor_name = Some(donor_name);
        }
        if let Some(donor_image) = patch.donor_image {
            food.donor_image = Some(donor_image);
        }
        if let Some(status) = patch.status {
            food.status = status;
        }

        Ok(self.repo.update(&food).await?)
    }

    pub async fn delete(&self, id: i64) -> Result<(), FoodServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(FoodServiceError::NotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxFoodRepository;
    use crate::db::{create_test_pool, migrations};
    use chrono::NaiveDate;

    async fn setup_test_service() -> FoodService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        FoodService::new(SqlxFoodRepository::boxed(pool))
    }

    fn sample_input(name: &str, donor: &str) -> CreateFoodInput {
        CreateFoodInput {
            food_name: name.to_string(),
            food_image: None,
            food_quantity: Some(4),
            pickup_location: Some("Food Bank".to_string()),
            expired_date: NaiveDate::from_ymd_opt(2025, 9, 1),
            notes: None,
            donor_name: Some("Alice".to_string()),
            donor_image: None,
            donor_email: donor.to_string(),
            status: Some("available".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let service = setup_test_service().await;

        let created = service
            .create(sample_input("Rice", "alice@example.com"))
            .await
            .expect("Failed to create");

        let fetched = service.get(created.id).await.expect("Failed to get");
        assert_eq!(fetched.food_name, "Rice");
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let service = setup_test_service().await;
        let result = service.get(424242).await;
        assert!(matches!(result, Err(FoodServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_update_merges_patch_only() {
        let service = setup_test_service().await;

        let created = service
            .create(sample_input("Rice", "alice@example.com"))
            .await
            .expect("Failed to create");

        let patch = UpdateFoodInput {
            status: Some("requested".to_string()),
            ..Default::default()
        };

        let updated = service
            .update(created.id, patch)
            .await
            .expect("Failed to update");

        // Patched field changed, the rest survived
        assert_eq!(updated.status, "requested");
        assert_eq!(updated.food_name, "Rice");
        assert_eq!(updated.food_quantity, Some(4));
        assert_eq!(updated.pickup_location.as_deref(), Some("Food Bank"));
        assert_eq!(updated.donor_email, "alice@example.com");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = setup_test_service().await;
        let result = service.update(424242, UpdateFoodInput::default()).await;
        assert!(matches!(result, Err(FoodServiceError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let service = setup_test_service().await;

        let created = service
            .create(sample_input("Rice", "alice@example.com"))
            .await
            .expect("Failed to create");

        service.delete(created.id).await.expect("Failed to delete");

        assert!(matches!(
            service.get(created.id).await,
            Err(FoodServiceError::NotFound)
        ));
        assert!(matches!(
            service.delete(created.id).await,
            Err(FoodServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_browse_applies_filter() {
        let service = setup_test_service().await;

        service
            .create(sample_input("Vegetable Soup", "a@example.com"))
            .await
            .expect("Failed to create");
        service
            .create(sample_input("Bread", "b@example.com"))
            .await
            .expect("Failed to create");

        let found = service
            .browse(FoodFilter {
                search: Some("soup".to_string()),
                ..Default::default()
            })
            .await
            .expect("Failed to browse");

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].food_name, "Vegetable Soup");
    }
}
