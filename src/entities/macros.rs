//! Macros for reducing boilerplate when defining entities
//!
//! These macros generate the struct, the `Entity` implementation and the
//! field accessor table each entity type needs to be queried by field name.

/// Complete macro to create an entity with automatic trait implementations
///
/// Every entity gets `id`, `created_at` and `updated_at`. Declared fields are
/// registered as sortable/filterable under their Rust names. Fields listed
/// under `relations` are not registered; they start empty and are filled by
/// include loaders.
///
/// # Example
///
/// ```rust,ignore
/// use blogspec::prelude::*;
///
/// impl_entity!(
///     Post,
///     "post",
///     "posts",
///     {
///         title: String,
///         body: String,
///         published: bool,
///     },
///     relations {
///         comments: Vec<Comment>,
///     }
/// );
///
/// let post = Post::new("Hello".to_string(), "...".to_string(), false);
/// assert!(Post::fields().contains("title"));
/// ```
#[macro_export]
macro_rules! impl_entity {
    (
        $type:ident,
        $singular:expr,
        $plural:expr,
        {
            $( $field:ident : $field_type:ty ),* $(,)?
        }
        $(,
            relations {
                $( $relation:ident : $relation_type:ty ),* $(,)?
            }
        )?
        $(,)?
    ) => {
        #[derive(Debug, Clone, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this entity
            pub id: ::uuid::Uuid,

            /// When this entity was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this entity was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            $( pub $field : $field_type, )*

            $( $(
                #[serde(default, skip_serializing_if = "Vec::is_empty")]
                pub $relation : $relation_type,
            )* )?
        }

        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                $plural
            }

            fn resource_name_singular() -> &'static str {
                $singular
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn fields() -> &'static $crate::core::field::FieldRegistry<Self> {
                static FIELDS: ::std::sync::OnceLock<$crate::core::field::FieldRegistry<$type>> =
                    ::std::sync::OnceLock::new();
                FIELDS.get_or_init(|| {
                    use $crate::core::field::ToFieldValue;
                    $crate::core::field::FieldRegistry::<Self>::new()
                        .with("id", |e: &$type| e.id.to_field_value())
                        .with("created_at", |e: &$type| e.created_at.to_field_value())
                        .with("updated_at", |e: &$type| e.updated_at.to_field_value())
                        $( .with(stringify!($field), |e: &$type| e.$field.to_field_value()) )*
                })
            }
        }

        impl $type {
            /// Create a new instance with a fresh id and timestamps
            #[allow(clippy::too_many_arguments)]
            pub fn new( $( $field: $field_type ),* ) -> Self {
                let now = ::chrono::Utc::now();
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    created_at: now,
                    updated_at: now,
                    $( $field, )*
                    $( $( $relation: ::std::default::Default::default(), )* )?
                }
            }

            /// Update the updated_at timestamp to now
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }
        }
    };
}
