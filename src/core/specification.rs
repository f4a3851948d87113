//! Specifications: reusable predicates describing which entities match

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

type Predicate<T> = Arc<dyn Fn(&T) -> bool + Send + Sync>;

/// A single boolean predicate over an entity type.
///
/// Immutable once built and cheap to clone, so one specification can be shared
/// by many queries. Combining several is done by adding each to a
/// `SearchQuery`, where they are ANDed.
///
/// # Example
/// ```rust,ignore
/// let long_posts = Specification::named("long posts", |p: &Post| p.body.len() > 2_000);
/// assert!(long_posts.is_satisfied_by(&post));
/// ```
pub struct Specification<T> {
    name: Cow<'static, str>,
    predicate: Predicate<T>,
}

impl<T: 'static> Specification<T> {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::named("anonymous", predicate)
    }

    /// Create a specification with a name used in logs and debug output
    pub fn named<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluate the predicate.
    ///
    /// Panics raised by the predicate are not caught.
    pub fn is_satisfied_by(&self, entity: &T) -> bool {
        (self.predicate)(entity)
    }

    /// Specification matching every entity
    pub fn all() -> Self {
        Self::named("all", |_: &T| true)
    }

    /// Specification matching no entity
    pub fn none() -> Self {
        Self::named("none", |_: &T| false)
    }
}

impl<T> Clone for Specification<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Specification<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specification")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
