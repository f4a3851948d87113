//! Sort directives resolved by field name

use crate::core::entity::Entity;
use crate::core::error::QueryError;
use crate::core::field::{FieldAccessor, FieldValue};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "ascending")]
    Asc,
    #[serde(alias = "descending")]
    Desc,
}

impl SortDirection {
    /// Orient an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            _ => Err(QueryError::InvalidSortDirection {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

/// A field name plus direction, resolved against `T` when the query runs.
///
/// The field is looked up in `T::fields()` by exact, case-sensitive name on
/// the first call to [`resolve`](Self::resolve); the accessor is then cached
/// in this instance. Construction never fails, so a directive can be built
/// from untrusted input and rejected at execution time with
/// [`QueryError::FieldNotFound`].
pub struct SortDirective<T> {
    field: String,
    direction: SortDirection,
    resolved: OnceLock<FieldAccessor<T>>,
}

impl<T: Entity> SortDirective<T> {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
            resolved: OnceLock::new(),
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Resolve the key extractor for this directive's field
    pub fn resolve(&self) -> Result<FieldAccessor<T>, QueryError> {
        if let Some(accessor) = self.resolved.get() {
            return Ok(*accessor);
        }

        let accessor = T::fields()
            .get(&self.field)
            .ok_or_else(|| QueryError::field_not_found::<T>(&self.field))?;

        Ok(*self.resolved.get_or_init(|| accessor))
    }
}

impl<T> Clone for SortDirective<T> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            direction: self.direction,
            resolved: self.resolved.clone(),
        }
    }
}

impl<T> fmt::Debug for SortDirective<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortDirective")
            .field("field", &self.field)
            .field("direction", &self.direction)
            .field("resolved", &self.resolved.get().is_some())
            .finish()
    }
}

/// An ordered chain of resolved sort keys.
///
/// The first key establishes the ordering; every later key only breaks ties
/// left by the keys before it (`Ordering::then_with`), so earlier keys are
/// never re-sorted.
pub struct SortChain<T> {
    keys: Vec<(FieldAccessor<T>, SortDirection)>,
}

impl<T: Entity> SortChain<T> {
    /// Resolve every directive, failing on the first unknown field
    pub fn resolve(directives: &[SortDirective<T>]) -> Result<Self, QueryError> {
        let keys = directives
            .iter()
            .map(|d| Ok((d.resolve()?, d.direction())))
            .collect::<Result<Vec<_>, QueryError>>()?;
        Ok(Self { keys })
    }

    pub fn push(&mut self, directive: &SortDirective<T>) -> Result<(), QueryError> {
        self.keys.push((directive.resolve()?, directive.direction()));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Extract this chain's sort key from an entity
    pub fn key(&self, entity: &T) -> Vec<FieldValue> {
        self.keys.iter().map(|(accessor, _)| accessor(entity)).collect()
    }

    /// Compare two keys produced by [`key`](Self::key)
    pub fn compare(&self, a: &[FieldValue], b: &[FieldValue]) -> Ordering {
        self.keys
            .iter()
            .zip(a.iter().zip(b))
            .fold(Ordering::Equal, |ordering, ((_, direction), (x, y))| {
                ordering.then_with(|| direction.apply(x.total_cmp(y)))
            })
    }

    /// Stable sort of `entities` by this chain.
    ///
    /// Keys are extracted once per entity. With `id_tiebreak`, entities still
    /// tied after every key are ordered by id ascending, which makes the order
    /// total regardless of the source's own order.
    pub fn sort(&self, entities: Vec<T>, id_tiebreak: bool) -> Vec<T> {
        let mut keyed: Vec<(Vec<FieldValue>, T)> = entities
            .into_iter()
            .map(|entity| (self.key(&entity), entity))
            .collect();

        keyed.sort_by(|(ka, a), (kb, b)| {
            self.compare(ka, kb).then_with(|| {
                if id_tiebreak {
                    a.id().cmp(&b.id())
                } else {
                    Ordering::Equal
                }
            })
        });

        keyed.into_iter().map(|(_, entity)| entity).collect()
    }
}
