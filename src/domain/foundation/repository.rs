//! Base repository trait for persistence operations.
//!
//! Aggregate repositories extend `Repository<T, ID>` and only add their
//! domain-specific queries.
//!
//! ```ignore
//! #[async_trait]
//! pub trait AssessmentRepository: Repository<SiteAssessment, AssessmentId> {
//!     async fn find_by_metric_set(
//!         &self,
//!         id: MetricSetId,
//!     ) -> Result<Vec<SiteAssessment>, DomainError>;
//! }
//! ```

use async_trait::async_trait;
use std::fmt::Debug;

use super::DomainError;

/// Base trait for aggregate repositories.
///
/// All methods return `Result<_, DomainError>`; implementations convert
/// adapter-specific errors (e.g., database errors) into `DomainError`.
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    T: Send + Sync,
    ID: Send + Sync + Debug + 'static,
{
    /// Finds an aggregate by its unique identifier.
    ///
    /// Returns `Ok(None)` if the aggregate doesn't exist.
    /// Returns `Err` only for infrastructure failures.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, DomainError>;

    /// Persists a new aggregate.
    ///
    /// # Errors
    ///
    /// - duplicate ID
    /// - infrastructure failure
    async fn save(&self, entity: &T) -> Result<(), DomainError>;

    /// Updates an existing aggregate.
    ///
    /// # Errors
    ///
    /// - the aggregate doesn't exist
    /// - infrastructure failure
    async fn update(&self, entity: &T) -> Result<(), DomainError>;

    /// Deletes an aggregate by its identifier.
    async fn delete(&self, id: ID) -> Result<(), DomainError>;

    /// Checks if an aggregate with the given ID exists.
    async fn exists(&self, id: ID) -> Result<bool, DomainError> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    struct Site {
        id: u32,
        name: String,
    }

    struct SiteRepo {
        data: Mutex<HashMap<u32, Site>>,
    }

    #[async_trait]
    impl Repository<Site, u32> for SiteRepo {
        async fn find_by_id(&self, id: u32) -> Result<Option<Site>, DomainError> {
            Ok(self.data.lock().unwrap().get(&id).cloned())
        }

        async fn save(&self, entity: &Site) -> Result<(), DomainError> {
            self.data.lock().unwrap().insert(entity.id, entity.clone());
            Ok(())
        }

        async fn update(&self, entity: &Site) -> Result<(), DomainError> {
            let mut data = self.data.lock().unwrap();
            if !data.contains_key(&entity.id) {
                return Err(DomainError::new(ErrorCode::AssessmentNotFound, "missing"));
            }
            data.insert(entity.id, entity.clone());
            Ok(())
        }

        async fn delete(&self, id: u32) -> Result<(), DomainError> {
            self.data.lock().unwrap().remove(&id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn exists_default_uses_find_by_id() {
        let repo = SiteRepo {
            data: Mutex::new(HashMap::new()),
        };
        repo.save(&Site {
            id: 7,
            name: "Corner lot".to_string(),
        })
        .await
        .unwrap();

        assert!(repo.exists(7).await.unwrap());
        assert!(!repo.exists(8).await.unwrap());
    }

    #[tokio::test]
    async fn update_missing_entity_fails() {
        let repo = SiteRepo {
            data: Mutex::new(HashMap::new()),
        };
        let result = repo
            .update(&Site {
                id: 1,
                name: "Nowhere".to_string(),
            })
            .await;
        assert!(result.is_err());
    }

    #[test]
    fn repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn Repository<Site, u32>) {}
    }
}
