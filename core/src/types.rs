//! Domain DTOs for the todo/label API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.
//!
//! The service expands a todo's label references into full `Label` objects
//! when responding, but accepts plain label ids in request payloads. The
//! payload structs therefore carry `label_ids` serialized under the wire name
//! `labels`.

use serde::{Deserialize, Serialize};

/// A label used to tag and filter todos.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Label {
    pub id: i32,
    pub name: String,
}

/// A single todo item returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    pub id: i32,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Todo {
    pub fn has_label(&self, label_id: i32) -> bool {
        self.labels.iter().any(|label| label.id == label_id)
    }

    pub fn label_ids(&self) -> Vec<i32> {
        self.labels.iter().map(|label| label.id).collect()
    }
}

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateTodo {
    pub text: String,
    #[serde(rename = "labels", default)]
    pub label_ids: Vec<i32>,
}

impl CreateTodo {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label_ids: Vec::new(),
        }
    }

    /// Attach the ids of the given labels, in selection order.
    pub fn with_labels(mut self, labels: &[Label]) -> Self {
        self.label_ids = labels.iter().map(|label| label.id).collect();
        self
    }
}

/// Request payload for updating an existing todo. Carries the full todo
/// shape; the server replaces text, completion and label set wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateTodo {
    pub id: i32,
    pub text: String,
    pub completed: bool,
    #[serde(rename = "labels", default)]
    pub label_ids: Vec<i32>,
}

impl UpdateTodo {
    /// Snapshot of `todo` with nothing changed yet.
    pub fn from_todo(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            text: todo.text.clone(),
            completed: todo.completed,
            label_ids: todo.label_ids(),
        }
    }

    pub fn toggled(mut self) -> Self {
        self.completed = !self.completed;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_labels(mut self, labels: &[Label]) -> Self {
        self.label_ids = labels.iter().map(|label| label.id).collect();
        self
    }
}

/// Body of a successful update. Services acknowledge either with the updated
/// todo or with the full todo list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum UpdateResponse {
    Todo(Todo),
    List(Vec<Todo>),
}

/// Request payload for creating a new label.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateLabel {
    pub name: String,
}

impl CreateLabel {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
