//! Store trait the query engine reads entities from

use crate::core::entity::Entity;
use crate::core::error::{QueryError, StoreError};

/// An opaque source of entities for the query engine.
///
/// Implement this trait for stores that can hand the executor their entities
/// and, optionally, populate named relations on them. The engine never asks a
/// store to filter, sort or page.
pub trait QueryableStore<T: Entity>: Send + Sync {
    /// Get all entities (unfiltered, in no particular order)
    fn list_all(&self) -> Result<Vec<T>, StoreError>;

    /// Populate the relation named `path` on `entities`
    ///
    /// Must not add or remove entities. The default implementation knows no
    /// relations and fails with [`QueryError::IncludeNotFound`].
    fn load_include(&self, entities: &mut [T], path: &str) -> Result<(), QueryError> {
        let _ = entities;
        Err(QueryError::IncludeNotFound {
            entity_type: T::resource_name_singular().to_string(),
            path: path.to_string(),
        })
    }
}

/// A plain vector is a store without relations
impl<T: Entity> QueryableStore<T> for Vec<T> {
    fn list_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.clone())
    }
}
