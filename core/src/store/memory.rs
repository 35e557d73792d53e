use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{TodoStore, TODO_COLLECTION};
use crate::error::StoreError;
use crate::types::{StoredTodo, TodoChanges, TodoDraft, TodoId};

#[derive(Debug, Default)]
struct Collection {
    docs: HashMap<TodoId, StoredTodo>,
    // A document collection exists from its first write on, even once emptied.
    created: bool,
}

/// Process-local store. Cloning shares the same collection.
#[derive(Debug, Clone)]
pub struct MemoryTodoStore {
    name: String,
    collection: Arc<RwLock<Collection>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::named("memory")
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: Arc::new(RwLock::new(Collection::default())),
        }
    }
}

impl Default for MemoryTodoStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    fn database_name(&self) -> &str {
        &self.name
    }

    async fn insert_one(&self, draft: TodoDraft) -> Result<TodoId, StoreError> {
        let id = TodoId::new();
        let mut collection = self.collection.write().await;
        collection.docs.insert(id, StoredTodo::from_draft(id, draft));
        collection.created = true;
        Ok(id)
    }

    async fn find_one(&self, id: &TodoId) -> Result<Option<StoredTodo>, StoreError> {
        Ok(self.collection.read().await.docs.get(id).cloned())
    }

    async fn find_many(&self) -> Result<Vec<StoredTodo>, StoreError> {
        Ok(self.collection.read().await.docs.values().cloned().collect())
    }

    async fn update_one(&self, id: &TodoId, changes: &TodoChanges) -> Result<u64, StoreError> {
        let mut collection = self.collection.write().await;
        match collection.docs.get_mut(id) {
            Some(doc) => {
                doc.apply(changes);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_one(&self, id: &TodoId) -> Result<u64, StoreError> {
        let mut collection = self.collection.write().await;
        Ok(collection.docs.remove(id).map_or(0, |_| 1))
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        let collection = self.collection.read().await;
        if collection.created {
            Ok(vec![TODO_COLLECTION.to_string()])
        } else {
            Ok(Vec::new())
        }
    }
}
