//! MongoDB adapter for `TodoStore`.
//!
//! Documents live in the `todo` collection of the configured database. The
//! driver assigns each new document an `ObjectId` `_id`, and timestamps are
//! stored as BSON dates. Mapping to and from `Document` is kept in free
//! functions so it can be tested without a running server.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, Collection, Database};
use tracing::{debug, warn};

use super::{TodoStore, TODO_COLLECTION};
use crate::error::StoreError;
use crate::types::{StoredTodo, TodoChanges, TodoDraft, TodoId};

#[derive(Debug, Clone)]
pub struct MongoTodoStore {
    database: Database,
    collection: Collection<Document>,
}

impl MongoTodoStore {
    pub fn new(database: Database) -> Self {
        let collection = database.collection::<Document>(TODO_COLLECTION);
        Self {
            database,
            collection,
        }
    }

    /// Build a client from a connection string and bind it to `database`.
    ///
    /// The driver connects lazily, so an unreachable server surfaces on the
    /// first operation rather than here.
    pub async fn connect(uri: &str, database: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(StoreError::backend)?;
        debug!(database, "mongodb client created");
        Ok(Self::new(client.database(database)))
    }
}

#[async_trait]
impl TodoStore for MongoTodoStore {
    fn database_name(&self) -> &str {
        self.database.name()
    }

    async fn insert_one(&self, draft: TodoDraft) -> Result<TodoId, StoreError> {
        let result = self
            .collection
            .insert_one(draft_document(&draft))
            .await
            .map_err(StoreError::backend)?;
        match result.inserted_id {
            Bson::ObjectId(oid) => Ok(TodoId::from(oid)),
            other => Err(StoreError::Corrupt(format!("inserted _id {other:?}"))),
        }
    }

    async fn find_one(&self, id: &TodoId) -> Result<Option<StoredTodo>, StoreError> {
        let found = self
            .collection
            .find_one(id_filter(id))
            .await
            .map_err(StoreError::backend)?;
        found.as_ref().map(stored_from_document).transpose()
    }

    async fn find_many(&self) -> Result<Vec<StoredTodo>, StoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .await
            .map_err(StoreError::backend)?;
        let documents: Vec<Document> = cursor.try_collect().await.map_err(StoreError::backend)?;
        Ok(readable_documents(&documents))
    }

    async fn update_one(&self, id: &TodoId, changes: &TodoChanges) -> Result<u64, StoreError> {
        let result = self
            .collection
            .update_one(id_filter(id), set_document(changes))
            .await
            .map_err(StoreError::backend)?;
        Ok(result.matched_count)
    }

    async fn delete_one(&self, id: &TodoId) -> Result<u64, StoreError> {
        let result = self
            .collection
            .delete_one(id_filter(id))
            .await
            .map_err(StoreError::backend)?;
        Ok(result.deleted_count)
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, StoreError> {
        self.database
            .list_collection_names()
            .await
            .map_err(StoreError::backend)
    }
}

fn id_filter(id: &TodoId) -> Document {
    doc! { "_id": id.object_id() }
}

fn to_bson_datetime(at: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(at.timestamp_millis())
}

fn from_bson_datetime(at: &bson::DateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(at.timestamp_millis())
}

fn draft_document(draft: &TodoDraft) -> Document {
    doc! {
        "title": draft.title.as_str(),
        "description": draft.description.clone(),
        "completed": draft.completed,
        "priority": draft.priority,
        "created_at": to_bson_datetime(draft.created_at),
    }
}

fn set_document(changes: &TodoChanges) -> Document {
    let fields = &changes.fields;
    let mut set = Document::new();
    if let Some(title) = &fields.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &fields.description {
        set.insert("description", description.as_str());
    }
    if let Some(completed) = fields.completed {
        set.insert("completed", completed);
    }
    if let Some(priority) = fields.priority {
        set.insert("priority", priority);
    }
    set.insert("updated_at", to_bson_datetime(changes.updated_at));
    doc! { "$set": set }
}

/// Map every document that is a todo. Documents written by other clients
/// with a non-`ObjectId` `_id` are skipped rather than failing the listing.
fn readable_documents(documents: &[Document]) -> Vec<StoredTodo> {
    documents
        .iter()
        .filter_map(|document| match stored_from_document(document) {
            Ok(stored) => Some(stored),
            Err(err) => {
                warn!(error = %err, "skipping unreadable todo document");
                None
            }
        })
        .collect()
}

fn stored_from_document(document: &Document) -> Result<StoredTodo, StoreError> {
    let id = match document.get("_id") {
        Some(Bson::ObjectId(oid)) => TodoId::from(*oid),
        other => return Err(StoreError::Corrupt(format!("unsupported _id {other:?}"))),
    };
    let priority = match document.get("priority") {
        Some(Bson::Int32(value)) => Some(i64::from(*value)),
        Some(Bson::Int64(value)) => Some(*value),
        _ => None,
    };

    Ok(StoredTodo {
        id,
        title: document.get_str("title").ok().map(str::to_owned),
        description: document.get_str("description").ok().map(str::to_owned),
        completed: document.get_bool("completed").ok(),
        priority,
        created_at: document
            .get_datetime("created_at")
            .ok()
            .and_then(from_bson_datetime),
        updated_at: document
            .get_datetime("updated_at")
            .ok()
            .and_then(from_bson_datetime),
    })
}
