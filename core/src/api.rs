//! One function per remote operation.
//!
//! Each call builds a request with `TodoClient`, executes it exactly once
//! through the `Transport` and parses the response. No retry, no caching.

use crate::client::TodoClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateLabel, CreateTodo, Label, Todo, UpdateResponse, UpdateTodo};

#[derive(Debug, Clone)]
pub struct TodoApi<T> {
    client: TodoClient,
    transport: T,
}

impl TodoApi<UreqTransport> {
    /// API bound to `TODO_API_URL` over a blocking ureq agent.
    pub fn from_env() -> Self {
        Self::new(TodoClient::from_config(&ClientConfig::from_env()), UreqTransport::new())
    }
}

impl<T: Transport> TodoApi<T> {
    pub fn new(client: TodoClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn list_todos(&self) -> Result<Vec<Todo>, ApiError> {
        let response = self.send(Operation::ListTodos, self.client.build_list_todos())?;
        self.client.parse_list_todos(response)
    }

    pub fn get_todo(&self, id: i32) -> Result<Todo, ApiError> {
        let response = self.send(Operation::GetTodo, self.client.build_get_todo(id))?;
        self.client.parse_get_todo(response)
    }

    pub fn create_todo(&self, input: &CreateTodo) -> Result<Todo, ApiError> {
        let response = self.send(Operation::CreateTodo, self.client.build_create_todo(input)?)?;
        self.client.parse_create_todo(response)
    }

    pub fn update_todo(&self, input: &UpdateTodo) -> Result<UpdateResponse, ApiError> {
        let response = self.send(Operation::UpdateTodo, self.client.build_update_todo(input)?)?;
        self.client.parse_update_todo(response)
    }

    pub fn delete_todo(&self, id: i32) -> Result<(), ApiError> {
        let response = self.send(Operation::DeleteTodo, self.client.build_delete_todo(id))?;
        self.client.parse_delete_todo(response)
    }

    pub fn list_labels(&self) -> Result<Vec<Label>, ApiError> {
        let response = self.send(Operation::ListLabels, self.client.build_list_labels())?;
        self.client.parse_list_labels(response)
    }

    pub fn create_label(&self, input: &CreateLabel) -> Result<Label, ApiError> {
        let response = self.send(Operation::CreateLabel, self.client.build_create_label(input)?)?;
        self.client.parse_create_label(response)
    }

    pub fn delete_label(&self, id: i32) -> Result<(), ApiError> {
        let response = self.send(Operation::DeleteLabel, self.client.build_delete_label(id))?;
        self.client.parse_delete_label(response)
    }

    fn send(&self, operation: Operation, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        log::debug!("{} {}", request.method, request.path);
        let response = self
            .transport
            .execute(request)
            .map_err(|e| ApiError::transport(operation, e.to_string()))?;
        if !response.is_success() {
            log::debug!("{operation}: status {}", response.status);
        }
        Ok(response)
    }
}
