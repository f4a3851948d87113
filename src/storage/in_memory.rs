//! In-memory repository for testing and development

use crate::config::QueryConfig;
use crate::core::entity::Entity;
use crate::core::error::{QueryError, StoreError};
use crate::core::executor::QueryExecutor;
use crate::core::query::{PagedResult, SearchQuery};
use crate::core::repository::Repository;
use crate::core::store::QueryableStore;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Populates one relation on a slice of entities
pub type IncludeLoader<T> = Arc<dyn Fn(&mut [T]) -> Result<(), StoreError> + Send + Sync>;

/// In-memory repository implementation
///
/// Entities live in a `HashMap`, so `list_all` has no inherent order; the
/// executor is responsible for every ordering guarantee. Relations are
/// registered per include path with [`with_include`](Self::with_include).
pub struct InMemoryRepository<T: Entity> {
    entities: Arc<RwLock<HashMap<Uuid, T>>>,
    includes: Arc<HashMap<String, IncludeLoader<T>>>,
    executor: QueryExecutor,
}

impl<T: Entity> InMemoryRepository<T> {
    /// Create an empty repository with the default query configuration
    pub fn new() -> Self {
        Self::with_config(QueryConfig::default())
    }

    pub fn with_config(config: QueryConfig) -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
            includes: Arc::new(HashMap::new()),
            executor: QueryExecutor::new(config),
        }
    }

    /// Register the loader for include path `path`
    ///
    /// Must be called before the repository is cloned or shared; clones
    /// created earlier keep their own relation table.
    pub fn with_include<F>(mut self, path: impl Into<String>, loader: F) -> Self
    where
        F: Fn(&mut [T]) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        Arc::make_mut(&mut self.includes).insert(path.into(), Arc::new(loader));
        self
    }

    /// Include paths this repository can resolve
    pub fn include_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.includes.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Insert or replace entities without going through `create`
    pub fn seed(&self, items: impl IntoIterator<Item = T>) -> Result<(), StoreError> {
        let mut entities = self.write()?;
        for item in items {
            entities.insert(item.id(), item);
        }
        Ok(())
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, HashMap<Uuid, T>>, StoreError> {
        self.entities.read().map_err(|e| StoreError::LockPoisoned {
            entity_type: T::resource_name_singular().to_string(),
            message: e.to_string(),
        })
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, HashMap<Uuid, T>>, StoreError> {
        self.entities.write().map_err(|e| StoreError::LockPoisoned {
            entity_type: T::resource_name_singular().to_string(),
            message: e.to_string(),
        })
    }
}

impl<T: Entity> Clone for InMemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            entities: Arc::clone(&self.entities),
            includes: Arc::clone(&self.includes),
            executor: self.executor.clone(),
        }
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> QueryableStore<T> for InMemoryRepository<T> {
    fn list_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.read()?.values().cloned().collect())
    }

    fn load_include(&self, entities: &mut [T], path: &str) -> Result<(), QueryError> {
        let loader = self
            .includes
            .get(path)
            .ok_or_else(|| QueryError::IncludeNotFound {
                entity_type: T::resource_name_singular().to_string(),
                path: path.to_string(),
            })?;

        loader(entities)?;
        Ok(())
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    async fn create(&self, entity: T) -> Result<T, StoreError> {
        let mut entities = self.write()?;

        if entities.contains_key(&entity.id()) {
            return Err(StoreError::AlreadyExists {
                entity_type: T::resource_name_singular().to_string(),
                id: entity.id(),
            });
        }

        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<T>, StoreError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.list_all()
    }

    async fn update(&self, id: &Uuid, entity: T) -> Result<T, StoreError> {
        let mut entities = self.write()?;

        if !entities.contains_key(id) {
            return Err(StoreError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: *id,
            });
        }

        entities.insert(*id, entity.clone());

        Ok(entity)
    }

    async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        self.write()?.remove(id);

        Ok(())
    }

    async fn search(&self, query: &SearchQuery<T>) -> Result<PagedResult<T>, QueryError> {
        self.executor.execute(query, self)
    }
}
