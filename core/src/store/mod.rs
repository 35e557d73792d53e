//! Persistence port for todo documents.
//!
//! # Design
//! `TodoStore` mirrors the handful of document-store calls the service makes
//! against its single collection. Each method is one round trip and reports
//! the backend's outcome (matched / deleted counts) without interpretation;
//! deciding what a zero count means is left to `TodoGateway`.

mod memory;
mod mongo;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::types::{StoredTodo, TodoChanges, TodoDraft, TodoId};

pub use memory::MemoryTodoStore;
pub use mongo::MongoTodoStore;

/// Name of the collection holding todo documents.
pub const TODO_COLLECTION: &str = "todo";

#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Name of the database the store is bound to.
    fn database_name(&self) -> &str;

    /// Insert a new record and return the identifier the store assigned.
    async fn insert_one(&self, draft: TodoDraft) -> Result<TodoId, StoreError>;

    async fn find_one(&self, id: &TodoId) -> Result<Option<StoredTodo>, StoreError>;

    /// Every stored record, in the backend's natural order.
    async fn find_many(&self) -> Result<Vec<StoredTodo>, StoreError>;

    /// Merge `changes` into the record with `id`. Returns the matched count.
    async fn update_one(&self, id: &TodoId, changes: &TodoChanges) -> Result<u64, StoreError>;

    /// Remove the record with `id`. Returns the deleted count.
    async fn delete_one(&self, id: &TodoId) -> Result<u64, StoreError>;

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError>;
}
