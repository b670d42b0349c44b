//! Error types for the todo/label API client.
//!
//! # Design
//! Every failure the service can report collapses into `ApiError::Request`,
//! tagged with the `Operation` that failed. There is no distinction between
//! transient and permanent failures and nothing is retried. The raw status and
//! body are kept for debugging only.

use std::fmt;

use thiserror::Error;

/// The API call an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    ListTodos,
    GetTodo,
    CreateTodo,
    UpdateTodo,
    DeleteTodo,
    ListLabels,
    CreateLabel,
    DeleteLabel,
}

impl Operation {
    /// Static, user-facing description of a failed call.
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListTodos => "get todo request failed",
            Operation::GetTodo => "find todo request failed",
            Operation::CreateTodo => "add todo request failed",
            Operation::UpdateTodo => "update todo request failed",
            Operation::DeleteTodo => "delete todo request failed",
            Operation::ListLabels => "get label request failed",
            Operation::CreateLabel => "add label request failed",
            Operation::DeleteLabel => "delete label request failed",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_message())
    }
}

/// Errors returned by `TodoClient` parse methods and `TodoApi` calls.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-2xx status.
    #[error("{operation} (HTTP {status})")]
    Request {
        operation: Operation,
        status: u16,
        body: String,
    },

    /// The request never produced a response (connection refused, DNS, ...).
    #[error("{operation}: {message}")]
    Transport {
        operation: Operation,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl ApiError {
    pub fn transport(operation: Operation, message: impl Into<String>) -> Self {
        Self::Transport {
            operation,
            message: message.into(),
        }
    }

    /// The failed operation, when the error is tied to one.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::Request { operation, .. } | ApiError::Transport { operation, .. } => Some(*operation),
            ApiError::Deserialization(_) | ApiError::Serialization(_) => None,
        }
    }

    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}
