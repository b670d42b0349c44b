use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

const ERR_EMPTY: &str = "Error!: Can not be Empty";
const ERR_OVER: &str = "Error!: Over text length";
const ERR_TODO_NOT_FOUND: &str = "Todo not found";
const ERR_LABEL_NOT_FOUND: &str = "Label not found";
const ERR_UNKNOWN_LABEL: &str = "Error!: Unknown label";
const ERR_LABEL_EXISTS: &str = "Error!: Label already exists";
const ERR_LABEL_IN_USE: &str = "Error!: Label is attached to a todo";

const MAX_TEXT_LEN: usize = 100;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Todo {
    pub id: i32,
    pub text: String,
    pub completed: bool,
    pub labels: Vec<Label>,
}

#[derive(Deserialize)]
pub struct CreateTodo {
    pub text: String,
    #[serde(default)]
    pub labels: Vec<i32>,
}

#[derive(Deserialize)]
pub struct UpdateTodo {
    pub text: Option<String>,
    pub completed: Option<bool>,
    pub labels: Option<Vec<i32>>,
}

#[derive(Deserialize)]
pub struct CreateLabel {
    pub name: String,
}

struct TodoRecord {
    id: i32,
    text: String,
    completed: bool,
    label_ids: BTreeSet<i32>,
}

#[derive(Default)]
pub struct Store {
    todos: BTreeMap<i32, TodoRecord>,
    labels: BTreeMap<i32, Label>,
    last_todo_id: i32,
    last_label_id: i32,
}

impl Store {
    fn expand(&self, record: &TodoRecord) -> Todo {
        Todo {
            id: record.id,
            text: record.text.clone(),
            completed: record.completed,
            labels: record
                .label_ids
                .iter()
                .filter_map(|id| self.labels.get(id).cloned())
                .collect(),
        }
    }

    fn known_labels(&self, ids: &[i32]) -> Option<BTreeSet<i32>> {
        ids.iter()
            .map(|id| self.labels.contains_key(id).then_some(*id))
            .collect()
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).patch(update_todo).delete(delete_todo))
        .route("/labels", get(list_labels).post(create_label))
        .route("/labels/{id}", delete(delete_label))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn reject(status: StatusCode, message: &'static str) -> Response {
    log::debug!("rejecting request: {status} {message}");
    (status, message).into_response()
}

fn validate_text(text: &str) -> Result<(), Response> {
    if text.trim().is_empty() {
        return Err(reject(StatusCode::BAD_REQUEST, ERR_EMPTY));
    }
    if text.chars().count() > MAX_TEXT_LEN {
        return Err(reject(StatusCode::BAD_REQUEST, ERR_OVER));
    }
    Ok(())
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().map(|record| store.expand(record)).collect())
}

async fn create_todo(State(db): State<Db>, Json(input): Json<CreateTodo>) -> Result<(StatusCode, Json<Todo>), Response> {
    validate_text(&input.text)?;
    let mut store = db.write().await;
    let label_ids = store
        .known_labels(&input.labels)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, ERR_UNKNOWN_LABEL))?;
    store.last_todo_id += 1;
    let record = TodoRecord {
        id: store.last_todo_id,
        text: input.text,
        completed: false,
        label_ids,
    };
    let todo = store.expand(&record);
    store.todos.insert(record.id, record);
    Ok((StatusCode::CREATED, Json(todo)))
}

async fn get_todo(State(db): State<Db>, Path(id): Path<i32>) -> Result<Json<Todo>, Response> {
    let store = db.read().await;
    store
        .todos
        .get(&id)
        .map(|record| Json(store.expand(record)))
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ERR_TODO_NOT_FOUND))
}

async fn update_todo(
    State(db): State<Db>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateTodo>,
) -> Result<Json<Todo>, Response> {
    if let Some(text) = &input.text {
        validate_text(text)?;
    }
    let mut guard = db.write().await;
    let store = &mut *guard;
    let label_ids = match &input.labels {
        Some(ids) => Some(
            store
                .known_labels(ids)
                .ok_or_else(|| reject(StatusCode::BAD_REQUEST, ERR_UNKNOWN_LABEL))?,
        ),
        None => None,
    };
    let record = store
        .todos
        .get_mut(&id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ERR_TODO_NOT_FOUND))?;
    if let Some(text) = input.text {
        record.text = text;
    }
    if let Some(completed) = input.completed {
        record.completed = completed;
    }
    if let Some(label_ids) = label_ids {
        record.label_ids = label_ids;
    }
    let record = &store.todos[&id];
    Ok(Json(store.expand(record)))
}

async fn delete_todo(State(db): State<Db>, Path(id): Path<i32>) -> Result<StatusCode, Response> {
    let mut store = db.write().await;
    store
        .todos
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, ERR_TODO_NOT_FOUND))
}

async fn list_labels(State(db): State<Db>) -> Json<Vec<Label>> {
    let store = db.read().await;
    Json(store.labels.values().cloned().collect())
}

async fn create_label(State(db): State<Db>, Json(input): Json<CreateLabel>) -> Result<(StatusCode, Json<Label>), Response> {
    validate_text(&input.name)?;
    let mut store = db.write().await;
    if store.labels.values().any(|label| label.name == input.name) {
        return Err(reject(StatusCode::CONFLICT, ERR_LABEL_EXISTS));
    }
    store.last_label_id += 1;
    let label = Label {
        id: store.last_label_id,
        name: input.name,
    };
    store.labels.insert(label.id, label.clone());
    Ok((StatusCode::CREATED, Json(label)))
}

async fn delete_label(State(db): State<Db>, Path(id): Path<i32>) -> Result<StatusCode, Response> {
    let mut store = db.write().await;
    if !store.labels.contains_key(&id) {
        return Err(reject(StatusCode::NOT_FOUND, ERR_LABEL_NOT_FOUND));
    }
    if store.todos.values().any(|record| record.label_ids.contains(&id)) {
        return Err(reject(StatusCode::CONFLICT, ERR_LABEL_IN_USE));
    }
    store.labels.remove(&id);
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_serializes_with_expanded_labels() {
        let todo = Todo {
            id: 1,
            text: "Test".to_string(),
            completed: false,
            labels: vec![Label {
                id: 2,
                name: "work".to_string(),
            }],
        };
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["text"], "Test");
        assert_eq!(json["completed"], false);
        assert_eq!(json["labels"][0]["name"], "work");
    }

    #[test]
    fn create_todo_defaults_labels_to_empty() {
        let input: CreateTodo = serde_json::from_str(r#"{"text":"No labels"}"#).unwrap();
        assert_eq!(input.text, "No labels");
        assert!(input.labels.is_empty());
    }

    #[test]
    fn create_todo_rejects_missing_text() {
        let result: Result<CreateTodo, _> = serde_json::from_str(r#"{"labels":[1]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_todo_accepts_full_todo_shape() {
        let input: UpdateTodo =
            serde_json::from_str(r#"{"id":3,"text":"a","completed":true,"labels":[1,2]}"#).unwrap();
        assert_eq!(input.text.as_deref(), Some("a"));
        assert_eq!(input.completed, Some(true));
        assert_eq!(input.labels, Some(vec![1, 2]));
    }

    #[test]
    fn update_todo_all_fields_optional() {
        let input: UpdateTodo = serde_json::from_str(r#"{}"#).unwrap();
        assert!(input.text.is_none());
        assert!(input.completed.is_none());
        assert!(input.labels.is_none());
    }

    #[test]
    fn text_validation_limits() {
        assert!(validate_text("ok").is_ok());
        assert!(validate_text("  ").is_err());
        assert!(validate_text(&"x".repeat(MAX_TEXT_LEN)).is_ok());
        assert!(validate_text(&"x".repeat(MAX_TEXT_LEN + 1)).is_err());
    }

    #[test]
    fn unknown_label_ids_are_refused() {
        let mut store = Store::default();
        store.labels.insert(
            1,
            Label {
                id: 1,
                name: "work".to_string(),
            },
        );
        assert_eq!(store.known_labels(&[1]), Some(BTreeSet::from([1])));
        assert_eq!(store.known_labels(&[1, 2]), None);
    }
}
