//! In-process [`Store`] used by the test suites and `DATABASE_URL=memory://`.
//!
//! Tasks live in a single insertion-ordered vector, which matches the
//! `(created_at, id)` order the Postgres store returns since ids are UUID v7.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tasktrack_core::types::{new_id, DbId};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::models::user::{CreateUser, User};
use crate::store::{CredentialStore, Store, TaskStore};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
    tasks: RwLock<Vec<Task>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn create_user(&self, input: CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&input.username) {
            return Err(StoreError::Duplicate("username"));
        }
        let user = User {
            id: new_id(),
            username: input.username,
            password_hash: input.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn create_task(&self, owner_id: DbId, input: CreateTask) -> Result<Task, StoreError> {
        let now = Utc::now();
        let task = Task {
            id: new_id(),
            owner_id,
            text: input.text,
            priority: input.priority,
            status: input.status,
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn find_owned_task(
        &self,
        owner_id: DbId,
        task_id: DbId,
    ) -> Result<Option<Task>, StoreError> {
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .find(|t| t.id == task_id && t.owner_id == owner_id)
            .cloned())
    }

    async fn list_tasks_by_owner(
        &self,
        owner_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Task>, StoreError> {
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(0);
        let tasks = self.tasks.read().await;
        Ok(tasks
            .iter()
            .filter(|t| t.owner_id == owner_id)
            .skip(skip)
            .take(take)
            .cloned()
            .collect())
    }

    async fn update_owned_task(
        &self,
        owner_id: DbId,
        task_id: DbId,
        input: UpdateTask,
    ) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        match tasks
            .iter_mut()
            .find(|t| t.id == task_id && t.owner_id == owner_id)
        {
            Some(task) => {
                input.apply_to(task);
                task.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_owned_task(&self, owner_id: DbId, task_id: DbId) -> Result<bool, StoreError> {
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| !(t.id == task_id && t.owner_id == owner_id));
        Ok(tasks.len() < before)
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tasktrack_core::task::{Priority, Status};

    use super::*;

    fn new_task(text: &str) -> CreateTask {
        CreateTask {
            text: text.to_string(),
            priority: Priority::Medium,
            status: Status::Todo,
        }
    }

    fn new_user(username: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        store.create_user(new_user("alice")).await.unwrap();

        let err = store.create_user(new_user("alice")).await.unwrap_err();
        assert_matches!(err, StoreError::Duplicate("username"));
    }

    #[tokio::test]
    async fn username_lookup_is_case_sensitive() {
        let store = MemoryStore::new();
        store.create_user(new_user("alice")).await.unwrap();

        assert!(store.find_user_by_username("Alice").await.unwrap().is_none());
        assert!(store.find_user_by_username("alice").await.unwrap().is_some());
        // A different case is a different user.
        store.create_user(new_user("Alice")).await.unwrap();
    }

    #[tokio::test]
    async fn tasks_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let (a, b) = (new_id(), new_id());
        let task = store.create_task(a, new_task("a's task")).await.unwrap();

        assert!(store.find_owned_task(b, task.id).await.unwrap().is_none());
        assert!(!store
            .update_owned_task(b, task.id, UpdateTask::default())
            .await
            .unwrap());
        assert!(!store.delete_owned_task(b, task.id).await.unwrap());
        assert!(store.list_tasks_by_owner(b, 10, 0).await.unwrap().is_empty());

        // Still intact for the owner.
        let found = store.find_owned_task(a, task.id).await.unwrap().unwrap();
        assert_eq!(found, task);
    }

    #[tokio::test]
    async fn list_pages_in_creation_order() {
        let store = MemoryStore::new();
        let owner = new_id();
        let first = store.create_task(owner, new_task("first")).await.unwrap();
        let second = store.create_task(owner, new_task("second")).await.unwrap();
        store.create_task(new_id(), new_task("someone else")).await.unwrap();

        let page1 = store.list_tasks_by_owner(owner, 1, 0).await.unwrap();
        let page2 = store.list_tasks_by_owner(owner, 1, 1).await.unwrap();
        let page3 = store.list_tasks_by_owner(owner, 1, 2).await.unwrap();

        assert_eq!(page1, vec![first]);
        assert_eq!(page2, vec![second]);
        assert!(page3.is_empty());
    }

    #[tokio::test]
    async fn delete_then_lookup_misses() {
        let store = MemoryStore::new();
        let owner = new_id();
        let task = store.create_task(owner, new_task("gone soon")).await.unwrap();

        assert!(store.delete_owned_task(owner, task.id).await.unwrap());
        assert!(store.find_owned_task(owner, task.id).await.unwrap().is_none());
        // Deleting again is a quiet miss.
        assert!(!store.delete_owned_task(owner, task.id).await.unwrap());
    }
}
