//! CRUD operations composed from `TodoStore` round trips.
//!
//! # Design
//! `TodoGateway` holds the store behind an `Arc<dyn TodoStore>` built once at
//! startup and shared read-only by every request. It performs no retries and
//! wraps nothing in transactions: concurrent updates to one todo resolve as
//! last write wins inside the store.

use std::sync::Arc;

use tracing::debug;

use crate::error::{StoreError, TodoError};
use crate::store::TodoStore;
use crate::types::{now, Todo, TodoChanges, TodoCreate, TodoId, TodoUpdate};

#[derive(Clone)]
pub struct TodoGateway {
    store: Arc<dyn TodoStore>,
}

impl TodoGateway {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub fn database_name(&self) -> &str {
        self.store.database_name()
    }

    /// Insert a todo and return it as read back from the store.
    pub async fn create(&self, input: TodoCreate) -> Result<Todo, TodoError> {
        let id = self.store.insert_one(input.into_draft(now())).await?;
        debug!(%id, "todo inserted");
        self.read_back(&id).await
    }

    /// Every stored todo. No ordering is imposed.
    pub async fn list(&self) -> Result<Vec<Todo>, TodoError> {
        let docs = self.store.find_many().await?;
        Ok(docs.into_iter().map(Todo::from).collect())
    }

    /// Merge the supplied fields into the todo with `id` and stamp
    /// `updated_at`. An update with no field set is rejected before the
    /// store is touched.
    pub async fn update(&self, id: &TodoId, fields: TodoUpdate) -> Result<Todo, TodoError> {
        if fields.is_empty() {
            return Err(TodoError::EmptyUpdate);
        }
        let changes = TodoChanges {
            fields,
            updated_at: now(),
        };
        if self.store.update_one(id, &changes).await? == 0 {
            return Err(TodoError::NotFound);
        }
        self.read_back(id).await
    }

    pub async fn delete(&self, id: &TodoId) -> Result<(), TodoError> {
        if self.store.delete_one(id).await? == 0 {
            return Err(TodoError::NotFound);
        }
        Ok(())
    }

    pub async fn collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.store.list_collection_names().await
    }

    async fn read_back(&self, id: &TodoId) -> Result<Todo, TodoError> {
        match self.store.find_one(id).await? {
            Some(doc) => Ok(doc.into()),
            // Removed between the write and the read.
            None => Err(TodoError::NotFound),
        }
    }
}

impl std::fmt::Debug for TodoGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoGateway")
            .field("database", &self.database_name())
            .finish()
    }
}
