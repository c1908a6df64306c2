//! Generic repository traits over SeaORM entities.
//!
//! Split by concern so a store only implements what it needs: the user
//! store is read-only, the report store implements all three.
//! `Select<E>` is the composable query: stores narrow it with `filter`
//! before handing it to [`ReadRepository::fetch_all`] or
//! [`ReadRepository::fetch_one`].

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, Select,
};
use std::fmt::Debug;

use common::AppResult;

/// Read operations (Query)
#[async_trait]
pub trait ReadRepository<E>: Send + Sync
where
    E: EntityTrait,
    E::Model: Send + Sync,
{
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Unfiltered query over every row of `E`
    fn query(&self) -> Select<E> {
        E::find()
    }

    /// Run a query and collect all rows, in store order
    async fn fetch_all(&self, query: Select<E>) -> AppResult<Vec<E::Model>> {
        query.all(self.db()).await.map_err(Into::into)
    }

    /// Run a query and return the first row, if any
    async fn fetch_one(&self, query: Select<E>) -> AppResult<Option<E::Model>> {
        query.one(self.db()).await.map_err(Into::into)
    }

    /// Find entity by primary key
    async fn get(&self, id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType) -> AppResult<Option<E::Model>>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send,
    {
        E::find_by_id(id).one(self.db()).await.map_err(Into::into)
    }
}

/// Write operations (Command)
///
/// Each call is a single auto-committed statement.
#[async_trait]
pub trait WriteRepository<E, A>: Send + Sync
where
    E: EntityTrait,
    E::Model: Send + Sync + IntoActiveModel<A>,
    A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + 'static,
{
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Insert new entity, returning the stored row
    async fn insert(&self, model: A) -> AppResult<E::Model> {
        model.insert(self.db()).await.map_err(Into::into)
    }

    /// Update the set columns of an existing entity, returning the stored row
    async fn save(&self, model: A) -> AppResult<E::Model> {
        model.update(self.db()).await.map_err(Into::into)
    }
}

/// Delete operations
#[async_trait]
pub trait DeleteRepository<E>: Send + Sync
where
    E: EntityTrait,
{
    /// Get database connection reference
    fn db(&self) -> &DatabaseConnection;

    /// Delete entity by primary key, returning the number of removed rows
    async fn delete_by_id(&self, id: <E::PrimaryKey as PrimaryKeyTrait>::ValueType) -> AppResult<u64>
    where
        <E::PrimaryKey as PrimaryKeyTrait>::ValueType: Clone + Send + Debug,
    {
        let result = E::delete_by_id(id).exec(self.db()).await?;
        Ok(result.rows_affected)
    }
}
