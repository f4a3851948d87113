//! Translates table filters into search queries

use crate::config::QueryConfig;
use crate::core::entity::Entity;
use crate::core::error::QueryError;
use crate::core::field::FieldValue;
use crate::core::query::SearchQuery;
use crate::core::sort::{SortDirection, SortDirective};
use crate::core::specification::Specification;
use crate::filter::operator::FilterOperator;
use crate::filter::table_filter::{FilterCondition, TableFilter};
use regex::Regex;
use std::sync::OnceLock;
use validator::Validate;

/// Builds a [`SearchQuery`] from a [`TableFilter`] for any entity type.
///
/// Columns are resolved against `T::fields()` while translating, so a typo in
/// a filter column fails here with [`QueryError::FieldNotFound`]. The sort
/// column is resolved later, when the query executes.
#[derive(Debug, Clone, Default)]
pub struct FilterTranslator {
    config: QueryConfig,
}

impl FilterTranslator {
    pub fn new(config: QueryConfig) -> Self {
        Self { config }
    }

    /// Translate `filter` into a query.
    ///
    /// Returns `Ok(None)` when `filter` is `None`; callers decide what an
    /// absent descriptor means. `include_properties` is a comma-separated
    /// list of relation paths.
    pub fn translate<T: Entity>(
        &self,
        filter: Option<&TableFilter>,
        include_properties: Option<&str>,
    ) -> Result<Option<SearchQuery<T>>, QueryError> {
        let Some(filter) = filter else {
            return Ok(None);
        };

        filter
            .validate()
            .map_err(|e| QueryError::InvalidFilterDescriptor {
                message: e.to_string(),
            })?;

        let mut query = SearchQuery::new();

        for condition in &filter.filters {
            let specification = condition_to_specification::<T>(condition).inspect_err(|e| {
                tracing::warn!(
                    entity_type = T::resource_name_singular(),
                    column = %condition.column,
                    error = %e,
                    "Rejecting table filter condition"
                );
            })?;
            query.add_filter(specification);
        }

        if let Some(sort_by) = filter.sort_by.as_deref().filter(|s| !s.trim().is_empty()) {
            let direction = match filter.sort_dir.as_deref() {
                Some(raw) => raw.parse::<SortDirection>()?,
                None => SortDirection::Asc,
            };
            query.add_sort_criteria(SortDirective::new(sort_by.trim(), direction));
        }

        let page_size = self
            .config
            .clamp_page_size(filter.page_size.unwrap_or(self.config.default_page_size));
        let page = filter.page.unwrap_or(1).max(1);
        query.take = page_size;
        query.skip = (page - 1)
            .checked_mul(page_size)
            .ok_or_else(|| QueryError::InvalidFilterDescriptor {
                message: format!("page {} with pageSize {} is out of range", page, page_size),
            })?;

        if let Some(raw) = include_properties {
            for path in split_include_paths(raw)? {
                query.add_include(path);
            }
        }

        tracing::debug!(
            entity_type = T::resource_name_singular(),
            filters = query.filters.len(),
            sort = ?filter.sort_by,
            skip = query.skip,
            take = query.take,
            includes = query.include_properties.len(),
            "Translated table filter"
        );

        Ok(Some(query))
    }
}

/// Translate with the default configuration
pub fn translate<T: Entity>(
    filter: Option<&TableFilter>,
    include_properties: Option<&str>,
) -> Result<Option<SearchQuery<T>>, QueryError> {
    FilterTranslator::default().translate(filter, include_properties)
}

fn condition_to_specification<T: Entity>(
    condition: &FilterCondition,
) -> Result<Specification<T>, QueryError> {
    let operator =
        FilterOperator::parse(&condition.operator).ok_or_else(|| {
            QueryError::UnsupportedFilterOperator {
                column: condition.column.clone(),
                operator: condition.operator.clone(),
            }
        })?;

    let accessor = T::fields()
        .get(&condition.column)
        .ok_or_else(|| QueryError::field_not_found::<T>(&condition.column))?;

    let expected = FieldValue::from(&condition.value);
    let name = if operator.is_unary() {
        format!("{} {}", condition.column, operator)
    } else {
        format!("{} {} {}", condition.column, operator, expected)
    };

    Ok(Specification::named(name, move |entity: &T| {
        operator.evaluate(&accessor(entity), &expected)
    }))
}

/// Split a comma-separated include list, dropping blanks
pub fn split_include_paths(raw: &str) -> Result<Vec<String>, QueryError> {
    static PATH_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = PATH_REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*$").unwrap()
    });

    raw.split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(|path| {
            if regex.is_match(path) {
                Ok(path.to_string())
            } else {
                Err(QueryError::InvalidIncludePath {
                    path: path.to_string(),
                })
            }
        })
        .collect()
}
