//! Search queries and paged results

use crate::core::sort::SortDirective;
use crate::core::specification::Specification;
use serde::Serialize;

/// Everything needed to read one page of entities.
///
/// Built once and then executed; filters and sort criteria can only be
/// appended.
///
/// # Example
/// ```rust,ignore
/// let mut query = SearchQuery::<Comment>::new().with_paging(20, 10);
/// query.add_filter(comment::body_contains("rust"));
/// query.add_sort_criteria(SortDirective::desc("created_at"));
/// query.add_sort_criteria(SortDirective::asc("body"));
/// ```
#[derive(Debug, Clone)]
pub struct SearchQuery<T> {
    /// Predicates combined with AND, in insertion order
    pub filters: Vec<Specification<T>>,

    /// Position 0 is the primary ordering; later entries break ties
    pub sort_criteria: Vec<SortDirective<T>>,

    /// Relation paths to populate on the returned entities
    pub include_properties: Vec<String>,

    /// Number of ordered matches to skip
    pub skip: usize,

    /// Page size; `0` means every match after `skip`
    pub take: usize,
}

impl<T> SearchQuery<T> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sort_criteria: Vec::new(),
            include_properties: Vec::new(),
            skip: 0,
            take: 0,
        }
    }

    /// Append a filter; it is ANDed with the filters already present
    pub fn add_filter(&mut self, specification: Specification<T>) -> &mut Self {
        self.filters.push(specification);
        self
    }

    /// Append a sort directive, ranked after every directive already present
    pub fn add_sort_criteria(&mut self, directive: SortDirective<T>) -> &mut Self {
        self.sort_criteria.push(directive);
        self
    }

    pub fn add_include(&mut self, path: impl Into<String>) -> &mut Self {
        self.include_properties.push(path.into());
        self
    }

    pub fn with_filter(mut self, specification: Specification<T>) -> Self {
        self.add_filter(specification);
        self
    }

    pub fn with_sort(mut self, directive: SortDirective<T>) -> Self {
        self.add_sort_criteria(directive);
        self
    }

    pub fn with_include(mut self, path: impl Into<String>) -> Self {
        self.add_include(path);
        self
    }

    pub fn with_paging(mut self, skip: usize, take: usize) -> Self {
        self.skip = skip;
        self.take = take;
        self
    }

    /// Whether `take` bounds the page
    pub fn is_paged(&self) -> bool {
        self.take > 0
    }
}

impl<T> Default for SearchQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// One page of entities plus the total match count
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    entities: Vec<T>,
    count: usize,
    has_next: bool,
    has_previous: bool,
}

impl<T> PagedResult<T> {
    /// Assemble a page; the navigation flags are derived from the window.
    ///
    /// `count` is the number of matches before paging.
    pub fn new(entities: Vec<T>, count: usize, skip: usize, take: usize) -> Self {
        Self {
            entities,
            count,
            has_next: (skip > 0 || take > 0) && skip.saturating_add(take) < count,
            has_previous: skip > 0,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, 0, 0)
    }

    pub fn entities(&self) -> &[T] {
        &self.entities
    }

    pub fn into_entities(self) -> Vec<T> {
        self.entities
    }

    /// Total matches after filtering, independent of the page window
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn has_previous(&self) -> bool {
        self.has_previous
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Map the page's entities (e.g. into response DTOs), keeping the metadata
    pub fn map<U, F>(self, f: F) -> PagedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PagedResult {
            entities: self.entities.into_iter().map(f).collect(),
            count: self.count,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}
