//! Record operations module
//!
//! The [`RecordOperations`] trait every binding implements, plus the query
//! parameter types the facade hands to it.

pub mod operations;
pub mod params;

pub use operations::RecordOperations;
pub use params::{DEFAULT_PER_PAGE, Pagination, Param, ParameterMap, SearchBy};
