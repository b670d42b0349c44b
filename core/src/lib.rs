//! Client core for the todo/label service.
//!
//! # Overview
//! Keeps an in-memory view of todos and labels in sync with a remote HTTP
//! API. `TodoApp` is the controller a UI drives: it owns the state, forwards
//! user intents to `TodoApi`, and exposes derived views such as the
//! label-filtered todo list.
//!
//! # Design
//! - `TodoClient` is stateless and never touches the network: each operation
//!   is a `build_*` / `parse_*` pair over plain-data `HttpRequest` /
//!   `HttpResponse` values.
//! - `Transport` executes those requests. `UreqTransport` is the blocking
//!   network implementation; tests swap in scripted transports.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod selection;
pub mod state;
pub mod transport;
pub mod types;

pub use api::TodoApi;
pub use app::TodoApp;
pub use client::TodoClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use selection::toggle_labels;
pub use state::{filter_by_label, AppState};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{CreateLabel, CreateTodo, Label, Todo, UpdateResponse, UpdateTodo};
