//! Core module containing the entity abstraction and the query engine

pub mod entity;
pub mod error;
pub mod executor;
pub mod field;
pub mod query;
pub mod repository;
pub mod service;
pub mod sort;
pub mod specification;
pub mod store;

pub use entity::Entity;
pub use error::{ErrorResponse, QueryError, StoreError};
pub use executor::QueryExecutor;
pub use field::{FieldAccessor, FieldRegistry, FieldValue, ToFieldValue};
pub use query::{PagedResult, SearchQuery};
pub use repository::Repository;
pub use service::EntityService;
pub use sort::{SortChain, SortDirection, SortDirective};
pub use specification::Specification;
pub use store::QueryableStore;
