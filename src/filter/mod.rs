//! Table filters: UI grid state translated into search queries

pub mod operator;
pub mod table_filter;
pub mod translator;

pub use operator::FilterOperator;
pub use table_filter::{FilterCondition, TableFilter};
pub use translator::{FilterTranslator, translate};
