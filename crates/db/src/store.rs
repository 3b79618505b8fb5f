//! Storage traits the API layer programs against.
//!
//! Handlers hold an `Arc<dyn Store>`; production wires in [`PgStore`] and
//! tests (or `DATABASE_URL=memory://`) use [`MemoryStore`].
//!
//! [`PgStore`]: crate::pg::PgStore
//! [`MemoryStore`]: crate::memory::MemoryStore

use async_trait::async_trait;
use tasktrack_core::types::DbId;

use crate::error::StoreError;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::user::{CreateUser, User};

/// Username/password-hash persistence. Usernames are unique and matched
/// case-sensitively.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Insert a user. Fails with [`StoreError::Duplicate`] if the username
    /// is taken.
    async fn create_user(&self, input: CreateUser) -> Result<User, StoreError>;

    /// Look up a user by exact username.
    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Owner-scoped task persistence.
///
/// Every method that addresses an existing task takes the owner id; a task
/// owned by someone else is indistinguishable from a missing one.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Insert a task for `owner_id`.
    async fn create_task(&self, owner_id: DbId, input: CreateTask) -> Result<Task, StoreError>;

    /// Fetch one task if it exists and belongs to `owner_id`.
    async fn find_owned_task(&self, owner_id: DbId, task_id: DbId)
        -> Result<Option<Task>, StoreError>;

    /// List `owner_id`'s tasks ordered by `(created_at, id)`.
    async fn list_tasks_by_owner(
        &self,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, StoreError>;

    /// Merge the provided fields into the owned task. Returns whether a task
    /// matched; a miss is not an error.
    async fn update_owned_task(
        &self,
        owner_id: DbId,
        task_id: DbId,
        input: UpdateTask,
    ) -> Result<bool, StoreError>;

    /// Remove the owned task. Returns whether a task was removed.
    async fn delete_owned_task(&self, owner_id: DbId, task_id: DbId) -> Result<bool, StoreError>;
}

/// Everything the HTTP layer needs from storage.
#[async_trait]
pub trait Store: CredentialStore + TaskStore {
    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
