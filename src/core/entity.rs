//! Entity trait defining the core abstraction for every queryable type

use crate::core::field::{FieldRegistry, FieldValue};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all entities handled by the query engine.
///
/// Every entity has:
/// - id: Unique identifier, also the fallback ordering key
/// - created_at: Creation timestamp
/// - a static field registry mapping field names to accessors
///
/// The registry is what lets a sort directive or a table filter name a field
/// with a plain string. Most entities get all of this from `impl_entity!`.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name (e.g., "posts", "comments")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "post", "comment")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Field accessors for this type, built once
    fn fields() -> &'static FieldRegistry<Self>;

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        Self::fields().get(field).map(|accessor| accessor(self))
    }
}
