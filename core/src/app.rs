//! The application state controller.
//!
//! # Design
//! `TodoApp` owns the `AppState` and the `TodoApi`. Every user intent maps to
//! one method taking `&mut self`, so only one operation is ever in flight and
//! a second submission cannot start before the first has resolved.
//!
//! Refresh strategy: a created todo or label is appended from the create
//! response, while updating or deleting a todo replaces the whole todo list
//! with a fresh fetch. On error the state is left as it was before the failed
//! request, except for `delete_label`, which turns the failure into
//! `delete_error` instead of returning it.

use crate::api::TodoApi;
use crate::error::ApiError;
use crate::state::{label_in_use_message, AppState};
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateLabel, CreateTodo, Label, Todo, UpdateTodo};

#[derive(Debug)]
pub struct TodoApp<T> {
    api: TodoApi<T>,
    state: AppState,
}

impl TodoApp<UreqTransport> {
    pub fn from_env() -> Self {
        Self::new(TodoApi::from_env())
    }
}

impl<T: Transport> TodoApp<T> {
    /// A controller with empty collections, marked as loading until
    /// `initialize` completes.
    pub fn new(api: TodoApi<T>) -> Self {
        Self {
            api,
            state: AppState::loading(),
        }
    }

    pub fn api(&self) -> &TodoApi<T> {
        &self.api
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn todos(&self) -> &[Todo] {
        &self.state.todos
    }

    pub fn labels(&self) -> &[Label] {
        &self.state.labels
    }

    pub fn filter_label_id(&self) -> Option<i32> {
        self.state.filter_label_id
    }

    pub fn delete_error(&self) -> Option<&str> {
        self.state.delete_error.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn visible_todos(&self) -> Vec<&Todo> {
        self.state.visible_todos()
    }

    /// Fetch todos, then labels. `loading` stays set if either fetch fails.
    pub fn initialize(&mut self) -> Result<(), ApiError> {
        self.state.loading = true;
        let todos = self.api.list_todos()?;
        let labels = self.api.list_labels()?;
        log::debug!("loaded {} todos and {} labels", todos.len(), labels.len());
        self.state.todos = todos;
        self.state.labels = labels;
        self.state.loading = false;
        Ok(())
    }

    /// Returns the created todo, or `None` when `text` is blank and nothing
    /// was sent.
    pub fn create_todo(&mut self, payload: CreateTodo) -> Result<Option<&Todo>, ApiError> {
        if payload.text.trim().is_empty() {
            return Ok(None);
        }
        let todo = self.api.create_todo(&payload)?;
        self.state.todos.push(todo);
        Ok(self.state.todos.last())
    }

    pub fn update_todo(&mut self, payload: &UpdateTodo) -> Result<(), ApiError> {
        self.api.update_todo(payload)?;
        self.refresh_todos()
    }

    pub fn toggle_completed(&mut self, todo: &Todo) -> Result<(), ApiError> {
        self.update_todo(&UpdateTodo::from_todo(todo).toggled())
    }

    /// Save an edit of text and labels. Text is sent as given; the service
    /// validates it.
    pub fn edit_todo(&mut self, todo: &Todo, text: &str, labels: &[Label]) -> Result<(), ApiError> {
        let payload = UpdateTodo::from_todo(todo).with_text(text).with_labels(labels);
        self.update_todo(&payload)
    }

    pub fn delete_todo(&mut self, id: i32) -> Result<(), ApiError> {
        self.api.delete_todo(id)?;
        self.refresh_todos()
    }

    pub fn refresh_todos(&mut self) -> Result<(), ApiError> {
        self.state.todos = self.api.list_todos()?;
        Ok(())
    }

    pub fn select_label_filter(&mut self, label: Option<&Label>) {
        self.state.filter_label_id = label.map(|label| label.id);
    }

    /// Select `label`, or clear the filter if it is already the active one.
    pub fn toggle_label_filter(&mut self, label: &Label) {
        if self.state.filter_label_id == Some(label.id) {
            self.select_label_filter(None);
        } else {
            self.select_label_filter(Some(label));
        }
    }

    /// Returns the created label, or `None` when the name is blank or already
    /// used by a known label and nothing was sent.
    pub fn create_label(&mut self, payload: CreateLabel) -> Result<Option<&Label>, ApiError> {
        if payload.name.trim().is_empty() {
            return Ok(None);
        }
        if self.state.label_name_taken(&payload.name) {
            log::debug!("label {:?} already exists, skipping", payload.name);
            return Ok(None);
        }
        let label = self.api.create_label(&payload)?;
        self.state.labels.push(label);
        Ok(self.state.labels.last())
    }

    /// Delete a label. A rejection is reported through `delete_error`, which
    /// names the label and stays until `reset_error`.
    pub fn delete_label(&mut self, id: i32, name: &str) {
        self.state.delete_error = None;
        match self.api.delete_label(id) {
            Ok(()) => self.state.labels.retain(|label| label.id != id),
            Err(e) => {
                log::warn!("deleting label {id} ({name}) failed: {e}");
                self.state.delete_error = Some(label_in_use_message(name));
            }
        }
    }

    pub fn reset_error(&mut self) {
        self.state.delete_error = None;
    }

    pub fn open_label_editor(&mut self) {
        self.reset_error();
    }

    pub fn close_label_editor(&mut self) {
        self.reset_error();
    }
}
