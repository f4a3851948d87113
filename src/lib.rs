//! # blogspec
//!
//! A generic specification, sorting and pagination engine for the query side
//! of a blogging backend.
//!
//! ## Features
//!
//! - **Specifications**: Named, reusable predicates ANDed into a query
//! - **Sort by Field Name**: Directives resolved through a per-type field registry
//! - **Then-By Ordering**: Secondary keys only break ties left by earlier keys
//! - **Deterministic Paging**: Every ordering ends with an id tie-break
//! - **Table Filters**: Grid descriptors translated into typed queries
//! - **Includes**: Relations loaded on the filtered entities without changing membership
//! - **Configuration-Based**: Page sizes and default ordering from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use blogspec::prelude::*;
//! use blogspec::entities::post;
//!
//! let services = BlogServices::default();
//!
//! let query = SearchQuery::new()
//!     .with_filter(post::published())
//!     .with_sort(SortDirective::desc("view_count"))
//!     .with_sort(SortDirective::asc("title"))
//!     .with_include("comments")
//!     .with_paging(0, 20);
//!
//! let page = services.posts.find(&query).await?;
//! println!("{} of {} posts", page.len(), page.count());
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod filter;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        entity::Entity,
        error::{ErrorResponse, QueryError, StoreError},
        executor::QueryExecutor,
        field::{FieldAccessor, FieldRegistry, FieldValue, ToFieldValue},
        query::{PagedResult, SearchQuery},
        repository::Repository,
        service::EntityService,
        sort::{SortChain, SortDirection, SortDirective},
        specification::Specification,
        store::QueryableStore,
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Filters ===
    pub use crate::filter::{FilterCondition, FilterOperator, FilterTranslator, TableFilter};

    // === Entities ===
    pub use crate::entities::{BlogServices, Comment, Message, Post, PostTag, Profile, Tag};

    // === Storage ===
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::{DefaultSort, QueryConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;
}
