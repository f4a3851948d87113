//! Query execution pipeline: filter, include, order, count, page

use crate::config::QueryConfig;
use crate::core::entity::Entity;
use crate::core::error::QueryError;
use crate::core::query::{PagedResult, SearchQuery};
use crate::core::sort::{SortChain, SortDirective};
use crate::core::store::QueryableStore;

/// Runs [`SearchQuery`]s against any [`QueryableStore`].
///
/// Stateless apart from its configuration; one executor can serve every
/// entity type and any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct QueryExecutor {
    config: QueryConfig,
}

impl QueryExecutor {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Execute `query` against `source`.
    ///
    /// Stages run in a fixed order:
    /// 1. keep entities satisfying every filter
    /// 2. load each include path on the survivors
    /// 3. order by the sort criteria (or the configured default), then by id;
    ///    the id tie-break always applies when the query has no criteria
    /// 4. count the survivors
    /// 5. skip `query.skip`, then take `query.take` when it is positive
    ///
    /// Any failure aborts the whole query.
    pub fn execute<T, S>(
        &self,
        query: &SearchQuery<T>,
        source: &S,
    ) -> Result<PagedResult<T>, QueryError>
    where
        T: Entity,
        S: QueryableStore<T> + ?Sized,
    {
        let entity_type = T::resource_name_singular();

        // Resolve sort keys before touching the store so a bad field name
        // fails without reading anything.
        let chain = self.sort_chain(query).inspect_err(|e| {
            tracing::warn!(entity_type, error = %e, "Rejecting query with unresolved sort field");
        })?;

        let mut matched: Vec<T> = source
            .list_all()?
            .into_iter()
            .filter(|entity| query.filters.iter().all(|spec| spec.is_satisfied_by(entity)))
            .collect();

        tracing::debug!(
            entity_type,
            filters = query.filters.len(),
            matched = matched.len(),
            "Applied filters"
        );

        for path in &query.include_properties {
            source.load_include(&mut matched, path).inspect_err(|e| {
                tracing::warn!(entity_type, path = %path, error = %e, "Include failed");
            })?;
        }

        // Without explicit criteria the id is the only guaranteed total key.
        let id_tiebreak = self.config.id_tiebreak || query.sort_criteria.is_empty();
        let ordered = chain.sort(matched, id_tiebreak);
        let count = ordered.len();

        let remaining = ordered.into_iter().skip(query.skip);
        let page: Vec<T> = if query.take > 0 {
            remaining.take(query.take).collect()
        } else {
            remaining.collect()
        };

        tracing::debug!(
            entity_type,
            count,
            skip = query.skip,
            take = query.take,
            returned = page.len(),
            "Executed search query"
        );

        Ok(PagedResult::new(page, count, query.skip, query.take))
    }

    fn sort_chain<T: Entity>(&self, query: &SearchQuery<T>) -> Result<SortChain<T>, QueryError> {
        let mut chain = SortChain::resolve(&query.sort_criteria)?;

        if chain.is_empty() {
            if let Some(default) = &self.config.default_sort {
                chain.push(&SortDirective::new(default.field.clone(), default.direction))?;
            }
        }

        Ok(chain)
    }
}
