//! Filter operators accepted in table filters

use crate::core::field::FieldValue;
use std::cmp::Ordering;
use std::fmt;

/// Comparison applied between a field and a filter value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Neq,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    Gt,
    Gte,
    Lt,
    Lte,
    IsNull,
    IsNotNull,
}

impl FilterOperator {
    /// Parse an operator name, ignoring case and `_`/`-` separators.
    ///
    /// Returns `None` for anything not listed on [`FilterOperator`].
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .flat_map(char::to_lowercase)
            .collect();

        let op = match normalized.as_str() {
            "eq" | "equals" | "=" | "==" => FilterOperator::Eq,
            "neq" | "ne" | "notequals" | "!=" | "<>" => FilterOperator::Neq,
            "contains" => FilterOperator::Contains,
            "notcontains" | "doesnotcontain" => FilterOperator::NotContains,
            "startswith" => FilterOperator::StartsWith,
            "endswith" => FilterOperator::EndsWith,
            "gt" | ">" => FilterOperator::Gt,
            "gte" | "ge" | ">=" => FilterOperator::Gte,
            "lt" | "<" => FilterOperator::Lt,
            "lte" | "le" | "<=" => FilterOperator::Lte,
            "isnull" => FilterOperator::IsNull,
            "isnotnull" => FilterOperator::IsNotNull,
            _ => return None,
        };
        Some(op)
    }

    /// Whether `actual` (the entity's field) satisfies this operator against `expected`
    pub fn evaluate(self, actual: &FieldValue, expected: &FieldValue) -> bool {
        match self {
            FilterOperator::Eq => actual.loose_cmp(expected) == Some(Ordering::Equal),
            FilterOperator::Neq => actual.loose_cmp(expected) != Some(Ordering::Equal),
            FilterOperator::Gt => actual.loose_cmp(expected) == Some(Ordering::Greater),
            FilterOperator::Gte => matches!(
                actual.loose_cmp(expected),
                Some(Ordering::Greater | Ordering::Equal)
            ),
            FilterOperator::Lt => actual.loose_cmp(expected) == Some(Ordering::Less),
            FilterOperator::Lte => matches!(
                actual.loose_cmp(expected),
                Some(Ordering::Less | Ordering::Equal)
            ),
            FilterOperator::Contains => text_match(actual, expected, |a, e| a.contains(e)),
            FilterOperator::NotContains => !text_match(actual, expected, |a, e| a.contains(e)),
            FilterOperator::StartsWith => text_match(actual, expected, |a, e| a.starts_with(e)),
            FilterOperator::EndsWith => text_match(actual, expected, |a, e| a.ends_with(e)),
            FilterOperator::IsNull => actual.is_null(),
            FilterOperator::IsNotNull => !actual.is_null(),
        }
    }

    /// Operators that ignore the filter value
    pub fn is_unary(self) -> bool {
        matches!(self, FilterOperator::IsNull | FilterOperator::IsNotNull)
    }
}

fn text_match(actual: &FieldValue, expected: &FieldValue, f: impl Fn(&str, &str) -> bool) -> bool {
    match (actual.as_text(), expected.as_text()) {
        (Some(a), Some(e)) => f(&a, &e),
        _ => false,
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Neq => "neq",
            FilterOperator::Contains => "contains",
            FilterOperator::NotContains => "notcontains",
            FilterOperator::StartsWith => "startswith",
            FilterOperator::EndsWith => "endswith",
            FilterOperator::Gt => "gt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lt => "lt",
            FilterOperator::Lte => "lte",
            FilterOperator::IsNull => "isnull",
            FilterOperator::IsNotNull => "isnotnull",
        };
        f.write_str(name)
    }
}
