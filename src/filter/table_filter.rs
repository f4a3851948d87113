//! UI-facing filter descriptor

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

/// One column/operator/value triple
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FilterCondition {
    /// Field name on the entity, matched exactly
    #[validate(length(min = 1, message = "column must not be empty"))]
    pub column: String,

    /// Operator name, e.g. `contains`, `eq`, `gte`
    #[validate(length(min = 1, message = "operator must not be empty"))]
    pub operator: String,

    /// Compared against the column; strings are coerced to the column's type
    #[serde(default)]
    pub value: Value,
}

impl FilterCondition {
    pub fn new(column: impl Into<String>, operator: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }
}

/// A grid's filter, sort and page state.
///
/// Deserializes from the JSON a table component posts:
///
/// ```json
/// {
///   "filters": [{ "column": "title", "operator": "contains", "value": "rust" }],
///   "sortBy": "created_at",
///   "sortDir": "desc",
///   "page": 2,
///   "pageSize": 10
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TableFilter {
    #[serde(default)]
    #[validate(nested)]
    pub filters: Vec<FilterCondition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// `asc` or `desc`; ascending when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_dir: Option<String>,

    /// 1-based page number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(range(max = 10_000, message = "pageSize is too large"))]
    pub page_size: Option<usize>,
}

impl TableFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_condition(mut self, condition: FilterCondition) -> Self {
        self.filters.push(condition);
        self
    }

    pub fn with_sort(mut self, sort_by: impl Into<String>, sort_dir: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_dir = Some(sort_dir.into());
        self
    }

    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = Some(page);
        self.page_size = Some(page_size);
        self
    }
}
