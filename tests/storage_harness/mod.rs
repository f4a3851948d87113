//! Shared test harness for repository testing
//!
//! Provides `TestArticle`, an entity whose registered fields cover every
//! scalar `FieldValue` variant, plus helpers for creating test data.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod repository_tests;

use blogspec::core::field::FieldValue;
use blogspec::core::query::PagedResult;

// ---------------------------------------------------------------------------
// TestArticle: String, Integer, Float, Boolean, Uuid, DateTime and Null fields
// ---------------------------------------------------------------------------

blogspec::impl_entity!(
    TestArticle,
    "test_article",
    "test_articles",
    {
        title: String,
        category: String,
        rating: i64,
        score: f64,
        featured: bool,
        subtitle: Option<String>,
    }
);

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Create a `TestArticle` with a random ID and no subtitle
pub fn create_test_article(
    title: &str,
    category: &str,
    rating: i64,
    score: f64,
    featured: bool,
) -> TestArticle {
    TestArticle::new(
        title.to_string(),
        category.to_string(),
        rating,
        score,
        featured,
        None,
    )
}

/// Generate `n` articles with distinct ratings `0..n`.
///
/// Categories cycle through "A", "B", "C"; every third article is featured.
pub fn sample_batch(n: usize) -> Vec<TestArticle> {
    const CATEGORIES: [&str; 3] = ["A", "B", "C"];

    (0..n)
        .map(|i| {
            create_test_article(
                &format!("Article {:02}", i),
                CATEGORIES[i % CATEGORIES.len()],
                i as i64,
                (i as f64) * 1.5 + 0.5,
                i % 3 == 0,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Assertion helpers
// ---------------------------------------------------------------------------

/// Ratings of a page, in page order
pub fn ratings(page: &PagedResult<TestArticle>) -> Vec<i64> {
    page.entities().iter().map(|a| a.rating).collect()
}

/// Assert the page's window, count and navigation flags in one go
pub fn assert_page(
    page: &PagedResult<TestArticle>,
    expected_ratings: &[i64],
    count: usize,
    has_next: bool,
    has_previous: bool,
) {
    assert_eq!(ratings(page), expected_ratings, "unexpected page contents");
    assert_eq!(page.count(), count, "unexpected total count");
    assert_eq!(page.has_next(), has_next, "unexpected has_next");
    assert_eq!(page.has_previous(), has_previous, "unexpected has_previous");
}

pub fn assert_field_value_string(fv: &FieldValue, expected: &str) {
    match fv {
        FieldValue::String(s) => assert_eq!(s, expected),
        other => panic!("Expected FieldValue::String(\"{}\"), got {:?}", expected, other),
    }
}

pub fn assert_field_value_integer(fv: &FieldValue, expected: i64) {
    match fv {
        FieldValue::Integer(i) => assert_eq!(*i, expected),
        other => panic!("Expected FieldValue::Integer({}), got {:?}", expected, other),
    }
}
