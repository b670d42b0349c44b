//! Stateless HTTP request builder and response parser for the todo/label API.
//!
//! # Design
//! `TodoClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`.
//! Any 2xx status counts as success; everything else becomes
//! `ApiError::Request` for the matching `Operation`.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateLabel, CreateTodo, Label, Todo, UpdateResponse, UpdateTodo};

/// Synchronous, stateless client for the todo/label API.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // --- todos ---

    pub fn build_list_todos(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/todos".to_string())
    }

    pub fn build_get_todo(&self, id: i32) -> HttpRequest {
        self.bare(HttpMethod::Get, format!("/todos/{id}"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/todos".to_string(), input)
    }

    pub fn build_update_todo(&self, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Patch, format!("/todos/{}", input.id), input)
    }

    pub fn build_delete_todo(&self, id: i32) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/todos/{id}"))
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(Operation::ListTodos, response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(Operation::GetTodo, response)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(Operation::CreateTodo, response)
    }

    /// The service may answer with the updated todo or with the whole list.
    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<UpdateResponse, ApiError> {
        parse_json(Operation::UpdateTodo, response)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(Operation::DeleteTodo, &response)
    }

    // --- labels ---

    pub fn build_list_labels(&self) -> HttpRequest {
        self.bare(HttpMethod::Get, "/labels".to_string())
    }

    pub fn build_create_label(&self, input: &CreateLabel) -> Result<HttpRequest, ApiError> {
        self.json(HttpMethod::Post, "/labels".to_string(), input)
    }

    pub fn build_delete_label(&self, id: i32) -> HttpRequest {
        self.bare(HttpMethod::Delete, format!("/labels/{id}"))
    }

    pub fn parse_list_labels(&self, response: HttpResponse) -> Result<Vec<Label>, ApiError> {
        parse_json(Operation::ListLabels, response)
    }

    pub fn parse_create_label(&self, response: HttpResponse) -> Result<Label, ApiError> {
        parse_json(Operation::CreateLabel, response)
    }

    pub fn parse_delete_label(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(Operation::DeleteLabel, &response)
    }

    fn bare(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    fn json<B: Serialize>(&self, method: HttpMethod, path: String, input: &B) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Serialization)?;
        Ok(HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map a non-2xx status to `ApiError::Request`.
fn check_status(operation: Operation, response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Request {
        operation,
        status: response.status,
        body: response.body.clone(),
    })
}

fn parse_json<T: DeserializeOwned>(operation: Operation, response: HttpResponse) -> Result<T, ApiError> {
    check_status(operation, &response)?;
    serde_json::from_str(&response.body).map_err(ApiError::Deserialization)
}
