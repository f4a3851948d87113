//! Generic repository trait shared by every entity service

use crate::core::entity::Entity;
use crate::core::error::{QueryError, StoreError};
use crate::core::query::{PagedResult, SearchQuery};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage-agnostic repository for one entity type
///
/// Implementations provide CRUD operations plus [`search`](Self::search),
/// which runs a [`SearchQuery`] through the query engine.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Insert a new entity; fails if its id is already present
    async fn create(&self, entity: T) -> Result<T, StoreError>;

    /// Get an entity by ID
    async fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError>;

    /// List all entities, unordered
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Replace an existing entity
    async fn update(&self, id: &Uuid, entity: T) -> Result<T, StoreError>;

    /// Delete an entity
    async fn delete(&self, id: &Uuid) -> Result<(), StoreError>;

    /// Filter, include, order, count and page
    async fn search(&self, query: &SearchQuery<T>) -> Result<PagedResult<T>, QueryError>;
}
