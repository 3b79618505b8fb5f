//! PostgreSQL-backed [`Store`] delegating to the repositories.

use async_trait::async_trait;
use tasktrack_core::types::DbId;

use crate::error::StoreError;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::user::{CreateUser, User};
use crate::repositories::{TaskRepo, UserRepo, UQ_USERNAME};
use crate::store::{CredentialStore, Store, TaskStore};
use crate::DbPool;

/// Store backed by a shared connection pool. Cheap to clone.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgStore {
    async fn create_user(&self, input: CreateUser) -> Result<User, StoreError> {
        UserRepo::create(&self.pool, &input)
            .await
            .map_err(|e| StoreError::from_unique(e, UQ_USERNAME, "username"))
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(UserRepo::find_by_username(&self.pool, username).await?)
    }
}

#[async_trait]
impl TaskStore for PgStore {
    async fn create_task(&self, owner_id: DbId, input: CreateTask) -> Result<Task, StoreError> {
        Ok(TaskRepo::create(&self.pool, owner_id, &input).await?)
    }

    async fn find_owned_task(
        &self,
        owner_id: DbId,
        task_id: DbId,
    ) -> Result<Option<Task>, StoreError> {
        Ok(TaskRepo::find_owned(&self.pool, owner_id, task_id).await?)
    }

    async fn list_tasks_by_owner(
        &self,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, StoreError> {
        Ok(TaskRepo::list_by_owner(&self.pool, owner_id, limit, offset).await?)
    }

    async fn update_owned_task(
        &self,
        owner_id: DbId,
        task_id: DbId,
        input: UpdateTask,
    ) -> Result<bool, StoreError> {
        Ok(TaskRepo::update_owned(&self.pool, owner_id, task_id, &input).await?)
    }

    async fn delete_owned_task(&self, owner_id: DbId, task_id: DbId) -> Result<bool, StoreError> {
        Ok(TaskRepo::delete_owned(&self.pool, owner_id, task_id).await?)
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
