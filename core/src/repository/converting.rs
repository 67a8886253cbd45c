use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, PaginatorTrait, QueryFilter, TryIntoModel,
};
use tracing::error;

use crate::error::RepoError;
use crate::query::page::{Page, PageRequest};
use crate::query::sort::Order;
use crate::query::where_clause::Where;

use super::{CudRepository, Preload, ReadRepository, select_with};

/// Two-way mapping between an application model and its persistence entity.
///
/// Implemented by the model type. `to_entity` builds the active model for
/// writes and decides which columns are set, in particular whether a
/// generated key is `NotSet` so the database produces it. `from_entity`
/// rebuilds the model from a fetched row.
pub trait Converter<E: EntityTrait>: Sized {
    fn to_entity(&self) -> E::ActiveModel;

    fn from_entity(entity: E::Model) -> Self;
}

/// Repository flavor for the case where the persistence entity and the
/// application model are different types, bridged by a [`Converter`].
///
/// The repository owns entity values only for the duration of one
/// operation; models stay with the caller.
pub struct ConvertingRepository<E: EntityTrait, M> {
    db: Arc<DatabaseConnection>,
    marker: PhantomData<(E, M)>,
}

impl<E: EntityTrait, M> ConvertingRepository<E, M> {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self {
            db: db.into(),
            marker: PhantomData,
        }
    }
}

impl<E: EntityTrait, M> Clone for ConvertingRepository<E, M> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            marker: PhantomData,
        }
    }
}

impl<E, M> CudRepository<M> for ConvertingRepository<E, M>
where
    E: EntityTrait,
    M: Converter<E> + Send + Sync,
    E::Model: IntoActiveModel<E::ActiveModel> + FromQueryResult + Send + Sync,
    E::ActiveModel:
        ActiveModelTrait<Entity = E> + ActiveModelBehavior + TryIntoModel<E::Model> + Send,
{
    async fn create(&self, model: &mut M) -> Result<(), RepoError> {
        let created = model
            .to_entity()
            .insert(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to insert into {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        *model = M::from_entity(created);
        Ok(())
    }

    async fn create_all(&self, models: &mut [M], batch_size: usize) -> Result<(), RepoError> {
        if batch_size == 0 {
            return Err(RepoError::InvalidBatchSize(batch_size));
        }
        for chunk in models.chunks_mut(batch_size) {
            let rows: Vec<E::ActiveModel> = chunk.iter().map(Converter::to_entity).collect();
            let created = E::insert_many(rows)
                .exec_with_returning_many(self.db.as_ref())
                .await
                .map_err(|err| {
                    error!(
                        "failed to batch-insert into {}: {err}",
                        E::default().table_name()
                    );
                    RepoError::from(err)
                })?;
            for (slot, row) in chunk.iter_mut().zip(created) {
                *slot = M::from_entity(row);
            }
        }
        Ok(())
    }

    async fn save(&self, model: &mut M) -> Result<(), RepoError> {
        let saved = model
            .to_entity()
            .save(self.db.as_ref())
            .await
            .and_then(|active| active.try_into_model())
            .map_err(|err| {
                error!("failed to save into {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        *model = M::from_entity(saved);
        Ok(())
    }

    async fn save_all(&self, models: &mut [M]) -> Result<(), RepoError> {
        for model in models.iter_mut() {
            self.save(model).await?;
        }
        Ok(())
    }

    async fn delete(&self, model: &M) -> Result<(), RepoError> {
        model
            .to_entity()
            .delete(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to delete from {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(())
    }

    async fn delete_all(&self, models: &[M]) -> Result<(), RepoError> {
        for model in models {
            self.delete(model).await?;
        }
        Ok(())
    }

    async fn delete_all_by(&self, where_clause: Where) -> Result<(), RepoError> {
        if where_clause.has_joins() {
            return Err(RepoError::UnsupportedJoin);
        }
        E::delete_many()
            .filter(where_clause.to_condition())
            .exec(self.db.as_ref())
            .await
            .map_err(|err| {
                error!(
                    "failed to bulk-delete from {}: {err}",
                    E::default().table_name()
                );
                RepoError::from(err)
            })?;
        Ok(())
    }
}

impl<E, M> ReadRepository<M> for ConvertingRepository<E, M>
where
    E: EntityTrait,
    M: Converter<E> + Send + Sync,
    E::Model: FromQueryResult + Send + Sync,
{
    async fn count(&self) -> Result<u64, RepoError> {
        let total = E::find().count(self.db.as_ref()).await.map_err(|err| {
            error!("failed to count {}: {err}", E::default().table_name());
            RepoError::from(err)
        })?;
        Ok(total)
    }

    async fn count_by(&self, where_clause: Where) -> Result<u64, RepoError> {
        let total = where_clause
            .apply(E::find())
            .count(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to count {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(total)
    }

    async fn find_by(
        &self,
        where_clause: Where,
        preloads: &[Preload],
    ) -> Result<Option<M>, RepoError> {
        let row = where_clause
            .apply(select_with::<E>(preloads))
            .one(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(row.map(M::from_entity))
    }

    async fn find_all(&self, preloads: &[Preload]) -> Result<Vec<M>, RepoError> {
        let rows = select_with::<E>(preloads)
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(rows.into_iter().map(M::from_entity).collect())
    }

    async fn find_all_by(
        &self,
        where_clause: Where,
        preloads: &[Preload],
    ) -> Result<Vec<M>, RepoError> {
        let rows = where_clause
            .apply(select_with::<E>(preloads))
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(rows.into_iter().map(M::from_entity).collect())
    }

    async fn find_all_ordered(
        &self,
        orders: &[Order],
        preloads: &[Preload],
    ) -> Result<Vec<M>, RepoError> {
        let mut select = select_with::<E>(preloads);
        for order in orders {
            select = order.apply(select);
        }
        let rows = select.all(self.db.as_ref()).await.map_err(|err| {
            error!("failed to query {}: {err}", E::default().table_name());
            RepoError::from(err)
        })?;
        Ok(rows.into_iter().map(M::from_entity).collect())
    }

    async fn find_all_paginated(
        &self,
        page_request: &PageRequest,
        preloads: &[Preload],
    ) -> Result<Page<M>, RepoError> {
        let total = page_request
            .apply_filter(select_with::<E>(preloads))
            .count(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to count {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        if total == 0 {
            return Ok(Page::empty());
        }
        let rows = page_request
            .paginate(select_with::<E>(preloads))
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(Page {
            total,
            elements: rows.into_iter().map(M::from_entity).collect(),
        })
    }

    async fn find_all_paginated_by(
        &self,
        page_request: &PageRequest,
        where_clause: Where,
        preloads: &[Preload],
    ) -> Result<Page<M>, RepoError> {
        let total = page_request
            .apply_filter(where_clause.apply(select_with::<E>(preloads)))
            .count(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to count {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        if total == 0 {
            return Ok(Page::empty());
        }
        let rows = page_request
            .paginate(where_clause.apply(select_with::<E>(preloads)))
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(Page {
            total,
            elements: rows.into_iter().map(M::from_entity).collect(),
        })
    }
}
