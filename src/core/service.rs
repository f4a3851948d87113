//! Generic entity service sitting between handlers and a repository

use crate::config::QueryConfig;
use crate::core::entity::Entity;
use crate::core::error::{QueryError, StoreError};
use crate::core::query::{PagedResult, SearchQuery};
use crate::core::repository::Repository;
use crate::filter::table_filter::TableFilter;
use crate::filter::translator::{FilterTranslator, split_include_paths};
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

/// Entity service for any entity type.
///
/// Posts, comments, tags, messages, profiles and post-tag relations all use
/// this one implementation; only the repository and the entity type differ.
pub struct EntityService<T, R> {
    repository: Arc<R>,
    translator: FilterTranslator,
    _entity: PhantomData<fn() -> T>,
}

impl<T, R> EntityService<T, R>
where
    T: Entity,
    R: Repository<T>,
{
    pub fn new(repository: Arc<R>, config: QueryConfig) -> Self {
        Self {
            repository,
            translator: FilterTranslator::new(config),
            _entity: PhantomData,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Get an entity by id, failing with `NotFound` when absent
    pub async fn get_by_id(&self, id: &Uuid) -> Result<T, StoreError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| StoreError::NotFound {
                entity_type: T::resource_name_singular().to_string(),
                id: *id,
            })
    }

    pub async fn create(&self, entity: T) -> Result<T, StoreError> {
        self.repository.create(entity).await
    }

    pub async fn update(&self, id: &Uuid, entity: T) -> Result<T, StoreError> {
        self.repository.update(id, entity).await
    }

    pub async fn delete(&self, id: &Uuid) -> Result<(), StoreError> {
        self.repository.delete(id).await
    }

    /// Run a query built by the caller
    pub async fn find(&self, query: &SearchQuery<T>) -> Result<PagedResult<T>, QueryError> {
        self.repository.search(query).await
    }

    /// Run a grid's table filter.
    ///
    /// Without a filter every entity is returned in one page, still ordered
    /// and with the requested includes loaded.
    pub async fn get_paged(
        &self,
        filter: Option<&TableFilter>,
        include_properties: Option<&str>,
    ) -> Result<PagedResult<T>, QueryError> {
        let query = match self.translator.translate::<T>(filter, include_properties)? {
            Some(query) => query,
            None => {
                let mut query = SearchQuery::new();
                if let Some(raw) = include_properties {
                    for path in split_include_paths(raw)? {
                        query.add_include(path);
                    }
                }
                query
            }
        };

        self.repository.search(&query).await
    }
}

impl<T, R> Clone for EntityService<T, R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            translator: self.translator.clone(),
            _entity: PhantomData,
        }
    }
}
