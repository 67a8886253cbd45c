//! Generic repository layer on top of SeaORM.
//!
//! The crate wraps a [`sea_orm::DatabaseConnection`] behind a small set of
//! traits ([`CudRepository`], [`ReadRepository`] and their union
//! [`Repository`]) and provides two ready-made implementations:
//!
//! * [`EntityRepository`], where the SeaORM entity model *is* the
//!   application model;
//! * [`ConvertingRepository`], where a [`Converter`] maps between a
//!   separate application model and the entity.
//!
//! Queries are described with plain values: [`Condition`] fragments combined
//! into a [`Where`], [`Order`] sort specs, an ordered [`Filter`] that skips
//! empty values, and a [`PageRequest`] bundling all of that with offset and
//! limit. A paginated read returns a [`Page`] carrying the filtered total
//! alongside the elements.

pub mod error;
pub mod query;
pub mod repository;

pub use error::RepoError;
pub use query::condition::Condition;
pub use query::filter::Filter;
pub use query::page::{Page, PageRequest};
pub use query::sort::{Direction, Order};
pub use query::where_clause::{Join, JoinKind, Where};
pub use repository::{
    Converter, ConvertingRepository, CudRepository, EntityRepository, Preload, ReadRepository,
    Repository,
};
