//! Domain core for the todo service.
//!
//! # Overview
//! Defines the todo record in its inbound, stored and wire forms, the
//! `TodoStore` persistence port with in-memory and MongoDB adapters, and the
//! `TodoGateway` that turns the create / list / update / delete operations
//! into store round trips.
//!
//! # Design
//! - The store is injected as `Arc<dyn TodoStore>`; nothing here is global.
//! - A malformed identifier (`InvalidTodoId`) and a missing record
//!   (`TodoError::NotFound`) are distinct errors.
//! - Partial updates are explicit optional-field structs; `null` and absent
//!   mean the same thing.

pub mod error;
pub mod gateway;
pub mod store;
pub mod types;

pub use error::{InvalidTodoId, StoreError, TodoError};
pub use gateway::TodoGateway;
pub use store::{MemoryTodoStore, MongoTodoStore, TodoStore, TODO_COLLECTION};
pub use types::{StoredTodo, Todo, TodoChanges, TodoCreate, TodoDraft, TodoId, TodoUpdate};
