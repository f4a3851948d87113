//! Macro-generated test suite for `Repository<TestArticle>` contract validation.
//!
//! The `repository_tests!` macro generates a test module that validates any
//! `Repository<TestArticle>` implementation against the full contract: CRUD
//! operations, search (filter, order, count, page) and concurrent access.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use blogspec::storage::InMemoryRepository;
//!
//! repository_tests!(InMemoryRepository::<TestArticle>::new());
//! ```
//!
//! # Generated Tests
//!
//! ## CRUD
//! - `test_create_and_get`: create then retrieve, verify all fields
//! - `test_get_nonexistent`: get with random UUID returns None
//! - `test_list_empty` / `test_list_multiple`
//! - `test_update_existing` / `test_update_nonexistent`
//! - `test_delete_existing` / `test_delete_nonexistent`
//! - `test_create_duplicate_id`
//!
//! ## Search
//! - `test_search_counts_before_paging`: 37 matches, skip 10 take 5
//! - `test_search_last_partial_page`
//! - `test_search_unbounded`: take 0 returns every match, no flags
//! - `test_search_then_by_ordering`: category asc, rating desc
//! - `test_search_unknown_sort_field`
//! - `test_search_empty_store`
//!
//! ## Edge Cases
//! - `test_concurrent_access`: parallel creates from spawned tasks
//! - `test_concurrent_searches`: one query shared by parallel searches

/// Generate a full `Repository<TestArticle>` conformance test suite.
///
/// `$factory` must be an expression that evaluates to an instance implementing
/// `Repository<TestArticle>`. It is re-evaluated for each test to ensure
/// isolation. For the concurrency tests, the returned repository must also
/// implement `Clone + 'static` (shared state via Arc pattern).
#[macro_export]
macro_rules! repository_tests {
    ($factory:expr) => {
        mod repository_contract_tests {
            use super::*;
            use blogspec::core::entity::Entity;
            use blogspec::core::error::{QueryError, StoreError};
            use blogspec::core::query::SearchQuery;
            use blogspec::core::repository::Repository;
            use blogspec::core::sort::SortDirective;
            use blogspec::core::specification::Specification;
            use std::sync::Arc;
            use uuid::Uuid;

            async fn seeded(n: usize) -> impl Repository<TestArticle> + Clone + 'static {
                let repo = $factory;
                for article in sample_batch(n) {
                    repo.create(article).await.unwrap();
                }
                repo
            }

            // ==================================================================
            // CRUD
            // ==================================================================

            #[tokio::test]
            async fn test_create_and_get() {
                let repo = $factory;
                let article = create_test_article("Rust", "A", 5, 4.5, true);
                let original_id = article.id;

                let created = repo.create(article).await.unwrap();
                assert_eq!(created.id(), original_id);

                let retrieved = repo.get(&original_id).await.unwrap();
                assert!(retrieved.is_some(), "Entity should exist after create");
                let retrieved = retrieved.unwrap();
                assert_eq!(retrieved.title, "Rust");
                assert_eq!(retrieved.category, "A");
                assert_eq!(retrieved.rating, 5);
                assert!((retrieved.score - 4.5).abs() < f64::EPSILON);
                assert!(retrieved.featured);
                assert_eq!(retrieved.subtitle, None);
            }

            #[tokio::test]
            async fn test_get_nonexistent() {
                let repo = $factory;
                let result = repo.get(&Uuid::new_v4()).await.unwrap();
                assert!(result.is_none());
            }

            #[tokio::test]
            async fn test_list_empty() {
                let repo = $factory;
                assert!(repo.list().await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_list_multiple() {
                let repo = $factory;
                let batch = sample_batch(5);
                let mut expected: Vec<Uuid> = batch.iter().map(|a| a.id).collect();
                for article in batch {
                    repo.create(article).await.unwrap();
                }

                let mut returned: Vec<Uuid> =
                    repo.list().await.unwrap().iter().map(|a| a.id()).collect();
                expected.sort();
                returned.sort();
                assert_eq!(returned, expected);
            }

            #[tokio::test]
            async fn test_update_existing() {
                let repo = $factory;
                let mut article = repo
                    .create(create_test_article("Draft", "A", 1, 1.0, false))
                    .await
                    .unwrap();

                article.title = "Final".to_string();
                article.touch();
                repo.update(&article.id, article.clone()).await.unwrap();

                let retrieved = repo.get(&article.id).await.unwrap().unwrap();
                assert_eq!(retrieved.title, "Final");
                assert_eq!(retrieved.updated_at, article.updated_at);
            }

            #[tokio::test]
            async fn test_update_nonexistent() {
                let repo = $factory;
                let article = create_test_article("Ghost", "A", 1, 1.0, false);
                let err = repo.update(&article.id, article.clone()).await.unwrap_err();
                assert!(matches!(err, StoreError::NotFound { .. }));
            }

            #[tokio::test]
            async fn test_delete_existing() {
                let repo = $factory;
                let article = repo
                    .create(create_test_article("Doomed", "A", 1, 1.0, false))
                    .await
                    .unwrap();

                repo.delete(&article.id).await.unwrap();
                assert!(repo.get(&article.id).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_delete_nonexistent() {
                let repo = $factory;
                assert!(repo.delete(&Uuid::new_v4()).await.is_ok());
            }

            #[tokio::test]
            async fn test_create_duplicate_id() {
                let repo = $factory;
                let article = create_test_article("Once", "A", 1, 1.0, false);
                repo.create(article.clone()).await.unwrap();

                let err = repo.create(article).await.unwrap_err();
                assert!(matches!(err, StoreError::AlreadyExists { .. }));
                assert_eq!(repo.list().await.unwrap().len(), 1);
            }

            // ==================================================================
            // Search
            // ==================================================================

            #[tokio::test]
            async fn test_search_counts_before_paging() {
                let repo = seeded(37).await;
                let query = SearchQuery::new()
                    .with_sort(SortDirective::asc("rating"))
                    .with_paging(10, 5);

                let page = repo.search(&query).await.unwrap();
                assert_page(&page, &[10, 11, 12, 13, 14], 37, true, true);
            }

            #[tokio::test]
            async fn test_search_last_partial_page() {
                let repo = seeded(37).await;
                let query = SearchQuery::new()
                    .with_sort(SortDirective::asc("rating"))
                    .with_paging(35, 5);

                let page = repo.search(&query).await.unwrap();
                assert_page(&page, &[35, 36], 37, false, true);
            }

            #[tokio::test]
            async fn test_search_unbounded() {
                let repo = seeded(6).await;
                let query = SearchQuery::new()
                    .with_filter(Specification::new(|a: &TestArticle| a.featured))
                    .with_sort(SortDirective::desc("rating"));

                let page = repo.search(&query).await.unwrap();
                assert_page(&page, &[3, 0], 2, false, false);
            }

            #[tokio::test]
            async fn test_search_then_by_ordering() {
                let repo = seeded(7).await;
                let query = SearchQuery::new()
                    .with_sort(SortDirective::asc("category"))
                    .with_sort(SortDirective::desc("rating"));

                let page = repo.search(&query).await.unwrap();
                // A: 0,3,6  B: 1,4  C: 2,5
                assert_eq!(ratings(&page), vec![6, 3, 0, 4, 1, 5, 2]);
            }

            #[tokio::test]
            async fn test_search_unknown_sort_field() {
                let repo = seeded(3).await;
                let query = SearchQuery::new().with_sort(SortDirective::asc("Rating"));

                let err = repo.search(&query).await.unwrap_err();
                assert!(
                    matches!(err, QueryError::FieldNotFound { ref field, .. } if field == "Rating"),
                    "unexpected error: {:?}",
                    err
                );
            }

            #[tokio::test]
            async fn test_search_empty_store() {
                let repo = $factory;
                let query = SearchQuery::new()
                    .with_sort(SortDirective::asc("title"))
                    .with_paging(0, 10);

                let page = repo.search(&query).await.unwrap();
                assert_page(&page, &[], 0, false, false);
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_access() {
                let repo = $factory;
                let mut handles = Vec::new();

                for article in sample_batch(10) {
                    let repo = repo.clone();
                    handles.push(tokio::spawn(async move { repo.create(article).await }));
                }

                for handle in handles {
                    handle.await.unwrap().unwrap();
                }

                assert_eq!(repo.list().await.unwrap().len(), 10);
            }

            #[tokio::test]
            async fn test_concurrent_searches() {
                let repo = seeded(20).await;
                let query = Arc::new(
                    SearchQuery::new()
                        .with_filter(Specification::new(|a: &TestArticle| a.rating % 2 == 0))
                        .with_sort(SortDirective::asc("rating"))
                        .with_paging(0, 3),
                );

                let searches = (0..8).map(|_| {
                    let repo = repo.clone();
                    let query = Arc::clone(&query);
                    async move { repo.search(&query).await }
                });

                for page in futures::future::join_all(searches).await {
                    let page = page.unwrap();
                    assert_page(&page, &[0, 2, 4], 10, true, false);
                }
            }
        }
    };
}
