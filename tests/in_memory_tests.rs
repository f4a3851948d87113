//! Integration tests for InMemoryRepository using the storage test harness.
//!
//! This file invokes `repository_tests!` to validate that InMemoryRepository
//! fully conforms to the Repository<T> contract.

#[macro_use]
mod storage_harness;

use blogspec::storage::InMemoryRepository;
use storage_harness::*;

repository_tests!(InMemoryRepository::<TestArticle>::new());
