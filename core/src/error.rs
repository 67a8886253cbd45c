use sea_orm::DbErr;
use thiserror::Error;

/// Errors produced by the repository layer.
///
/// Validation variants are raised before any database round trip. Database
/// failures are carried verbatim in [`RepoError::Database`]; the only
/// translation this layer performs is turning a missing row on single-row
/// lookups into `Ok(None)`.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("page number must be zero or greater, got {0}")]
    InvalidPageNumber(i64),

    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(i64),

    #[error("page size {page_size} must not be smaller than page number {page_number}")]
    PageSizeBelowPageNumber { page_number: i64, page_size: i64 },

    #[error("sort direction must be 'asc' or 'desc', got '{0}'")]
    InvalidSortDirection(String),

    #[error("sort column must not be empty")]
    EmptySortColumn,

    #[error("batch size must be at least 1, got {0}")]
    InvalidBatchSize(usize),

    #[error("join clauses are not supported on bulk deletes")]
    UnsupportedJoin,

    #[error(transparent)]
    Database(#[from] DbErr),
}
