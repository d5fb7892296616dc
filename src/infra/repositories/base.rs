//! Generic repository over any SeaORM entity.
//!
//! Implementors only provide access to the [`Session`] they were built with;
//! every query and staging operation is a default method. Reads go straight
//! to the store and return detached models. Writes are only recorded on the
//! session and reach the store when the unit of work commits.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    PrimaryKeyTrait, QueryFilter, QuerySelect, Select,
};

use super::paging::paginate;
use crate::errors::{AppError, AppResult};
use crate::infra::session::{Session, StagedWrite};
use crate::types::{PageRequest, PagedList};

/// Query and staged-mutation contract for one entity type.
///
/// `E` is the entity, `A` its active model.
#[async_trait]
pub trait Repository<E, A>: Send + Sync
where
    E: EntityTrait,
    E::Model: IntoActiveModel<A> + Sync,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
{
    /// Session shared with the owning unit of work
    fn session(&self) -> &Session;

    /// Lazy query over every row; nothing runs until it is executed.
    fn get(&self) -> Select<E> {
        E::find()
    }

    /// Find entity by primary key
    async fn get_by_id(
        &self,
        id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType,
    ) -> AppResult<Option<E::Model>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Send,
    {
        E::find_by_id(id)
            .one(self.session().connection())
            .await
            .map_err(Into::into)
    }

    /// Find the one row matching `filter`.
    ///
    /// Zero matches is `Ok(None)`. More than one match is a caller error
    /// and fails with [`AppError::MultipleMatches`].
    async fn find_single(&self, filter: Condition) -> AppResult<Option<E::Model>> {
        let mut rows = self
            .get()
            .filter(filter)
            .limit(2)
            .all(self.session().connection())
            .await?;

        if rows.len() > 1 {
            return Err(AppError::multiple_matches(E::default().table_name()));
        }
        Ok(rows.pop())
    }

    /// First row in store order, if any
    async fn first(&self) -> AppResult<Option<E::Model>> {
        self.get()
            .one(self.session().connection())
            .await
            .map_err(Into::into)
    }

    /// Count all entities
    async fn count(&self) -> AppResult<u64> {
        self.get()
            .count(self.session().connection())
            .await
            .map_err(Into::into)
    }

    /// Page through an ordered query.
    ///
    /// Count and fetch share one read transaction, so a page never
    /// duplicates or skips rows because of a concurrent writer. This holds
    /// only as far as the store isolates readers; a read-uncommitted store
    /// gives no such guarantee.
    async fn get_page(
        &self,
        query: Select<E>,
        request: &PageRequest,
    ) -> AppResult<PagedList<E::Model>> {
        request.validate()?;

        let txn = self.session().begin_snapshot().await?;
        let page = paginate(query, &txn, request).await?;
        txn.commit().await?;

        Ok(page)
    }

    /// Stage an insert
    fn add(&self, entity: A) {
        self.session().stage(StagedWrite::insert(entity));
    }

    /// Stage a full replacement of the row with this entity's identity
    fn update(&self, entity: E::Model) {
        self.session()
            .stage(StagedWrite::update(entity.into_active_model()));
    }

    /// Stage removal of the row with this entity's identity
    fn delete(&self, entity: E::Model) {
        self.session()
            .stage(StagedWrite::delete(entity.into_active_model()));
    }
}
