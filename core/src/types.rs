//! Domain types for the todo service.
//!
//! # Design
//! Inbound payloads (`TodoCreate`, `TodoUpdate`), the records a store writes
//! (`TodoDraft`, `TodoChanges`), the record a store reads back (`StoredTodo`)
//! and the wire shape (`Todo`) are separate types. Every read path funnels
//! through `From<StoredTodo> for Todo`, which is where the field defaults of
//! the serialized shape live.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::InvalidTodoId;

/// Priority given to a todo when the creator does not pick one, and reported
/// for stored records that carry none.
pub const DEFAULT_PRIORITY: i64 = 2;

/// Current time at the precision a document store keeps (milliseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(3)
}

/// Opaque, immutable identifier of a stored todo. Rendered as the 24-digit
/// hex form of the document's `ObjectId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TodoId(ObjectId);

impl TodoId {
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse the textual form used in URLs.
    pub fn parse(raw: &str) -> Result<Self, InvalidTodoId> {
        ObjectId::parse_str(raw).map(Self).map_err(|_| InvalidTodoId)
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for TodoId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for TodoId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for TodoId {
    type Err = InvalidTodoId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for TodoId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for TodoId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(de::Error::custom)
    }
}

/// A todo as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoCreate {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Option<i64>,
}

impl TodoCreate {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
            priority: None,
        }
    }

    /// Resolve defaults and stamp the creation time.
    pub fn into_draft(self, created_at: DateTime<Utc>) -> TodoDraft {
        TodoDraft {
            title: self.title,
            description: self.description,
            completed: self.completed,
            priority: self.priority.unwrap_or(DEFAULT_PRIORITY),
            created_at,
        }
    }
}

/// Request payload for a partial update. Only the fields present (and not
/// `null`) in the JSON are applied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
}

impl TodoUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
    }
}

/// A fully resolved new record. The store assigns its id on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoDraft {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: i64,
    pub created_at: DateTime<Utc>,
}

/// Field-level merge applied by `TodoStore::update_one`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoChanges {
    pub fields: TodoUpdate,
    pub updated_at: DateTime<Utc>,
}

/// A record as read back from a store. Any field but the id may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredTodo {
    pub id: TodoId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub priority: Option<i64>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl StoredTodo {
    pub fn from_draft(id: TodoId, draft: TodoDraft) -> Self {
        Self {
            id,
            title: Some(draft.title),
            description: draft.description,
            completed: Some(draft.completed),
            priority: Some(draft.priority),
            created_at: Some(draft.created_at),
            updated_at: None,
        }
    }

    pub fn apply(&mut self, changes: &TodoChanges) {
        let fields = &changes.fields;
        if let Some(title) = &fields.title {
            self.title = Some(title.clone());
        }
        if let Some(description) = &fields.description {
            self.description = Some(description.clone());
        }
        if let Some(completed) = fields.completed {
            self.completed = Some(completed);
        }
        if let Some(priority) = fields.priority {
            self.priority = Some(priority);
        }
        self.updated_at = Some(changes.updated_at);
    }
}

impl From<StoredTodo> for Todo {
    fn from(stored: StoredTodo) -> Self {
        Self {
            id: stored.id,
            title: stored.title,
            description: stored.description,
            completed: stored.completed.unwrap_or(false),
            priority: stored.priority.unwrap_or(DEFAULT_PRIORITY),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_id_serializes_as_hex_string() {
        let id = TodoId::parse("507f1f77bcf86cd799439011").unwrap();
        let json = serde_json::to_value(id).unwrap();
        assert_eq!(json, "507f1f77bcf86cd799439011");
        assert_eq!(id.to_string(), "507f1f77bcf86cd799439011");

        let back: TodoId = serde_json::from_value(json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn todo_id_rejects_malformed_input() {
        assert!(TodoId::parse("not-an-id").is_err());
        assert!(TodoId::parse("").is_err());
        assert!(TodoId::parse("507f1f77bcf86cd79943901").is_err());
        assert!(TodoId::parse("00000000-0000-0000-0000-000000000000").is_err());
        assert!("507f1f77bcf86cd799439011".parse::<TodoId>().is_ok());
    }

    #[test]
    fn create_applies_defaults() {
        let input: TodoCreate = serde_json::from_str(r#"{"title":"Buy milk"}"#).unwrap();
        let created_at = now();
        let draft = input.into_draft(created_at);
        assert_eq!(draft.title, "Buy milk");
        assert_eq!(draft.description, None);
        assert!(!draft.completed);
        assert_eq!(draft.priority, DEFAULT_PRIORITY);
        assert_eq!(draft.created_at, created_at);
    }

    #[test]
    fn create_null_priority_falls_back_to_default() {
        let input: TodoCreate =
            serde_json::from_str(r#"{"title":"x","priority":null}"#).unwrap();
        assert_eq!(input.into_draft(now()).priority, DEFAULT_PRIORITY);
    }

    #[test]
    fn create_rejects_missing_or_non_string_title() {
        assert!(serde_json::from_str::<TodoCreate>(r#"{"completed":true}"#).is_err());
        assert!(serde_json::from_str::<TodoCreate>(r#"{"title":42}"#).is_err());
        assert!(serde_json::from_str::<TodoCreate>(r#"{"title":"x","completed":null}"#).is_err());
    }

    #[test]
    fn update_treats_null_as_absent() {
        let input: TodoUpdate =
            serde_json::from_str(r#"{"title":null,"description":null}"#).unwrap();
        assert!(input.is_empty());

        let input: TodoUpdate = serde_json::from_str(r#"{"priority":1}"#).unwrap();
        assert!(!input.is_empty());
        assert_eq!(input.priority, Some(1));
        assert!(input.title.is_none());
    }

    #[test]
    fn apply_merges_only_supplied_fields() {
        let created_at = now();
        let mut stored = StoredTodo::from_draft(
            TodoId::new(),
            TodoCreate::new("Walk dog").into_draft(created_at),
        );
        let before = stored.clone();
        let updated_at = now();
        stored.apply(&TodoChanges {
            fields: TodoUpdate {
                completed: Some(true),
                ..TodoUpdate::default()
            },
            updated_at,
        });

        assert_eq!(stored.completed, Some(true));
        assert_eq!(stored.updated_at, Some(updated_at));
        assert_eq!(stored.title, before.title);
        assert_eq!(stored.priority, before.priority);
        assert_eq!(stored.created_at, Some(created_at));
    }

    #[test]
    fn sparse_record_serializes_with_defaults() {
        let stored = StoredTodo {
            id: TodoId::parse("507f1f77bcf86cd799439011").unwrap(),
            ..StoredTodo::default()
        };
        let json = serde_json::to_value(Todo::from(stored)).unwrap();
        assert_eq!(json["id"], "507f1f77bcf86cd799439011");
        assert_eq!(json["title"], serde_json::Value::Null);
        assert_eq!(json["description"], serde_json::Value::Null);
        assert_eq!(json["completed"], false);
        assert_eq!(json["priority"], 2);
        assert_eq!(json["created_at"], serde_json::Value::Null);
        assert_eq!(json["updated_at"], serde_json::Value::Null);
    }
}
