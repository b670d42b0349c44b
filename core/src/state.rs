//! In-memory application state and its derived views.

use crate::types::{Label, Todo};

/// Everything the UI renders from. Mutated only by `TodoApp`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub todos: Vec<Todo>,
    pub labels: Vec<Label>,
    /// `None` shows every todo.
    pub filter_label_id: Option<i32>,
    pub delete_error: Option<String>,
    pub loading: bool,
}

impl AppState {
    /// Initial state of a session: empty collections, waiting on the first fetch.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn visible_todos(&self) -> Vec<&Todo> {
        filter_by_label(&self.todos, self.filter_label_id)
    }

    pub fn label_name_taken(&self, name: &str) -> bool {
        self.labels.iter().any(|label| label.name == name)
    }

    pub fn active_label(&self) -> Option<&Label> {
        let id = self.filter_label_id?;
        self.labels.iter().find(|label| label.id == id)
    }
}

/// Todos carrying `label_id`, or all of them when no filter is set.
pub fn filter_by_label(todos: &[Todo], label_id: Option<i32>) -> Vec<&Todo> {
    match label_id {
        None => todos.iter().collect(),
        Some(id) => todos.iter().filter(|todo| todo.has_label(id)).collect(),
    }
}

/// Message shown when the service refuses to delete a label.
pub fn label_in_use_message(name: &str) -> String {
    format!("[{name}] is still attached to one or more todos.\nRemove it from every todo before deleting it.")
}
