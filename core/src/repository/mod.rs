use std::future::Future;

use sea_orm::sea_query::JoinType;
use sea_orm::{EntityTrait, QuerySelect, RelationDef, Select};

use crate::error::RepoError;
use crate::query::page::{Page, PageRequest};
use crate::query::sort::Order;
use crate::query::where_clause::Where;

mod converting;
mod entity;

pub use converting::{Converter, ConvertingRepository};
pub use entity::EntityRepository;

/// An eager-loading hint: a relation pulled into the query so its table is
/// addressable by where clauses and sort orders. The repository forwards it
/// to the query without interpreting it.
///
/// The relation is given as a producer because `RelationDef` is built per
/// use:
///
/// ```ignore
/// let preload = Preload::new(|| users::Relation::Persons.def());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Preload {
    relation: fn() -> RelationDef,
    join: JoinType,
}

impl Preload {
    /// A LEFT JOIN preload, the default.
    pub fn new(relation: fn() -> RelationDef) -> Self {
        Self {
            relation,
            join: JoinType::LeftJoin,
        }
    }

    /// An INNER JOIN preload, for relations that must exist.
    pub fn inner(relation: fn() -> RelationDef) -> Self {
        Self {
            relation,
            join: JoinType::InnerJoin,
        }
    }

    fn apply<E: EntityTrait>(&self, select: Select<E>) -> Select<E> {
        select.join(self.join, (self.relation)())
    }
}

/// A select over `E` with all preloads applied.
pub(crate) fn select_with<E: EntityTrait>(preloads: &[Preload]) -> Select<E> {
    let mut select = E::find();
    for preload in preloads {
        select = preload.apply(select);
    }
    select
}

/// Create, update and delete operations over a model type `M`.
///
/// Every operation delegates to SeaORM against the wrapped connection and
/// propagates database errors verbatim; batch operations are not
/// transactional across batches at this layer.
pub trait CudRepository<M>: Send + Sync {
    /// Inserts a new row and writes the stored row (generated key included)
    /// back into the model.
    fn create(&self, model: &mut M) -> impl Future<Output = Result<(), RepoError>> + Send;

    /// Inserts the models in batches of `batch_size` (which must be at least
    /// 1), writing stored rows back. Earlier batches stay committed if a
    /// later one fails.
    fn create_all(
        &self,
        models: &mut [M],
        batch_size: usize,
    ) -> impl Future<Output = Result<(), RepoError>> + Send;

    /// Inserts or updates the row, writing the stored row back.
    fn save(&self, model: &mut M) -> impl Future<Output = Result<(), RepoError>> + Send;

    fn save_all(&self, models: &mut [M]) -> impl Future<Output = Result<(), RepoError>> + Send;

    /// Deletes the row identified by the model's key. No row-count feedback.
    fn delete(&self, model: &M) -> impl Future<Output = Result<(), RepoError>> + Send;

    fn delete_all(&self, models: &[M]) -> impl Future<Output = Result<(), RepoError>> + Send;

    /// Deletes every row matching the conditions. Fails with
    /// [`RepoError::UnsupportedJoin`] if the `Where` carries joins, since
    /// bulk deletes cannot join.
    fn delete_all_by(
        &self,
        where_clause: Where,
    ) -> impl Future<Output = Result<(), RepoError>> + Send;
}

/// Read operations over a model type `M`.
pub trait ReadRepository<M>: Send + Sync {
    fn count(&self) -> impl Future<Output = Result<u64, RepoError>> + Send;

    fn count_by(&self, where_clause: Where) -> impl Future<Output = Result<u64, RepoError>> + Send;

    /// Returns the first matching row, or `None` (not an error) when nothing
    /// matches.
    fn find_by(
        &self,
        where_clause: Where,
        preloads: &[Preload],
    ) -> impl Future<Output = Result<Option<M>, RepoError>> + Send;

    fn find_all(
        &self,
        preloads: &[Preload],
    ) -> impl Future<Output = Result<Vec<M>, RepoError>> + Send;

    fn find_all_by(
        &self,
        where_clause: Where,
        preloads: &[Preload],
    ) -> impl Future<Output = Result<Vec<M>, RepoError>> + Send;

    fn find_all_ordered(
        &self,
        orders: &[Order],
        preloads: &[Preload],
    ) -> impl Future<Output = Result<Vec<M>, RepoError>> + Send;

    /// Returns the filtered total plus one page of elements. When the total
    /// is zero the element query is skipped entirely.
    fn find_all_paginated(
        &self,
        page_request: &PageRequest,
        preloads: &[Preload],
    ) -> impl Future<Output = Result<Page<M>, RepoError>> + Send;

    fn find_all_paginated_by(
        &self,
        page_request: &PageRequest,
        where_clause: Where,
        preloads: &[Preload],
    ) -> impl Future<Output = Result<Page<M>, RepoError>> + Send;
}

/// The full repository contract: CUD plus read operations.
pub trait Repository<M>: CudRepository<M> + ReadRepository<M> {}

impl<T, M> Repository<M> for T where T: CudRepository<M> + ReadRepository<M> {}
