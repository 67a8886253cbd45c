use std::marker::PhantomData;
use std::sync::Arc;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, FromQueryResult,
    IntoActiveModel, Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryFilter,
    TryIntoModel,
};
use tracing::error;

use crate::error::RepoError;
use crate::query::page::{Page, PageRequest};
use crate::query::sort::Order;
use crate::query::where_clause::Where;

use super::{CudRepository, Preload, ReadRepository, select_with};

/// Repository flavor for the case where the persistence entity *is* the
/// application model: operations take and return `E::Model` directly, with
/// no converter involved.
pub struct EntityRepository<E: EntityTrait> {
    db: Arc<DatabaseConnection>,
    entity: PhantomData<E>,
}

impl<E: EntityTrait> EntityRepository<E> {
    pub fn new(db: impl Into<Arc<DatabaseConnection>>) -> Self {
        Self {
            db: db.into(),
            entity: PhantomData,
        }
    }
}

impl<E: EntityTrait> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            entity: PhantomData,
        }
    }
}

/// Active model for inserting a brand-new row. Auto-increment key columns
/// are cleared so the database generates them.
fn new_row<E>(model: &E::Model) -> E::ActiveModel
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E>,
{
    let mut active = model.clone().into_active_model();
    if <E::PrimaryKey as PrimaryKeyTrait>::auto_increment() {
        for key in E::PrimaryKey::iter() {
            active.not_set(key.into_column());
        }
    }
    active
}

impl<E> CudRepository<E::Model> for EntityRepository<E>
where
    E: EntityTrait,
    E::Model: IntoActiveModel<E::ActiveModel> + FromQueryResult + Send + Sync,
    E::ActiveModel:
        ActiveModelTrait<Entity = E> + ActiveModelBehavior + TryIntoModel<E::Model> + Send,
{
    async fn create(&self, model: &mut E::Model) -> Result<(), RepoError> {
        let created = new_row::<E>(model)
            .insert(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to insert into {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        *model = created;
        Ok(())
    }

    async fn create_all(&self, models: &mut [E::Model], batch_size: usize) -> Result<(), RepoError> {
        if batch_size == 0 {
            return Err(RepoError::InvalidBatchSize(batch_size));
        }
        for chunk in models.chunks_mut(batch_size) {
            let rows: Vec<E::ActiveModel> = chunk.iter().map(new_row::<E>).collect();
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
                *slot = row;
            }
        }
        Ok(())
    }

    async fn save(&self, model: &mut E::Model) -> Result<(), RepoError> {
        let saved = model
            .clone()
            .into_active_model()
            .reset_all()
            .save(self.db.as_ref())
            .await
            .and_then(|active| active.try_into_model())
            .map_err(|err| {
                error!("failed to save into {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        *model = saved;
        Ok(())
    }

    async fn save_all(&self, models: &mut [E::Model]) -> Result<(), RepoError> {
        for model in models.iter_mut() {
            self.save(model).await?;
        }
        Ok(())
    }

    async fn delete(&self, model: &E::Model) -> Result<(), RepoError> {
        model
            .clone()
            .into_active_model()
            .delete(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to delete from {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(())
    }

    async fn delete_all(&self, models: &[E::Model]) -> Result<(), RepoError> {
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

impl<E> ReadRepository<E::Model> for EntityRepository<E>
where
    E: EntityTrait,
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
    ) -> Result<Option<E::Model>, RepoError> {
        let row = where_clause
            .apply(select_with::<E>(preloads))
            .one(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(row)
    }

    async fn find_all(&self, preloads: &[Preload]) -> Result<Vec<E::Model>, RepoError> {
        let rows = select_with::<E>(preloads)
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(rows)
    }

    async fn find_all_by(
        &self,
        where_clause: Where,
        preloads: &[Preload],
    ) -> Result<Vec<E::Model>, RepoError> {
        let rows = where_clause
            .apply(select_with::<E>(preloads))
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(rows)
    }

    async fn find_all_ordered(
        &self,
        orders: &[Order],
        preloads: &[Preload],
    ) -> Result<Vec<E::Model>, RepoError> {
        let mut select = select_with::<E>(preloads);
        for order in orders {
            select = order.apply(select);
        }
        let rows = select.all(self.db.as_ref()).await.map_err(|err| {
            error!("failed to query {}: {err}", E::default().table_name());
            RepoError::from(err)
        })?;
        Ok(rows)
    }

    async fn find_all_paginated(
        &self,
        page_request: &PageRequest,
        preloads: &[Preload],
    ) -> Result<Page<E::Model>, RepoError> {
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
        let elements = page_request
            .paginate(select_with::<E>(preloads))
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(Page { total, elements })
    }

    async fn find_all_paginated_by(
        &self,
        page_request: &PageRequest,
        where_clause: Where,
        preloads: &[Preload],
    ) -> Result<Page<E::Model>, RepoError> {
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
        let elements = page_request
            .paginate(where_clause.apply(select_with::<E>(preloads)))
            .all(self.db.as_ref())
            .await
            .map_err(|err| {
                error!("failed to query {}: {err}", E::default().table_name());
                RepoError::from(err)
            })?;
        Ok(Page { total, elements })
    }
}
