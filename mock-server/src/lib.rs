//! Local stand-in for the hosted todos service.
//!
//! Serves a fixed collection of 200 seeded todos under `/todos`. Writes are
//! faked the way the hosted service fakes them: POST, PUT, PATCH and DELETE
//! answer as if they succeeded but never change the collection, so every
//! client sees the same 200 records for the lifetime of the process.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

/// Number of seeded todos.
pub const TODOS_MAX: u64 = 200;
/// Seeded todos per user; user ids run `1..=TODOS_MAX / TODOS_PER_USER`.
pub const TODOS_PER_USER: u64 = 20;

/// Titles pinned to fixed ids so title filtering has known matches.
pub const PINNED_TITLES: [(u64, &str); 5] = [
    (9, "ut cupiditate sequi aliquam fuga maiores"),
    (47, "inventore saepe cumque et aut illum enim"),
    (88, "excepturi a et neque qui expedita vel voluptate"),
    (131, "numquam repellendus a magnam"),
    (176, "ipsam aperiam voluptates qui"),
];

const WORDS: [&str; 32] = [
    "delectus", "autem", "quis", "facilis", "officia", "fugiat", "veniam", "minus", "porro",
    "tempora", "laboriosam", "mollitia", "quasi", "adipisci", "provident", "illum", "ullam",
    "ratione", "quibusdam", "voluptatem", "expedita", "consequatur", "molestiae", "perspiciatis",
    "doloremque", "vero", "rerum", "temporibus", "dolor", "repellendus", "fugit", "nisi",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

impl Todo {
    /// The value a query filter on `field` is compared against, or `None` for
    /// fields a todo does not have.
    fn filter_value(&self, field: &str) -> Option<String> {
        match field {
            "userId" => Some(self.user_id.to_string()),
            "id" => Some(self.id.to_string()),
            "title" => Some(self.title.clone()),
            "completed" => Some(self.completed.to_string()),
            _ => None,
        }
    }

    fn to_object(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

pub type Db = Arc<BTreeMap<u64, Todo>>;

/// Build the 200-record fixture.
pub fn seed() -> BTreeMap<u64, Todo> {
    (1..=TODOS_MAX)
        .map(|id| {
            let title = PINNED_TITLES
                .iter()
                .find(|(pinned, _)| *pinned == id)
                .map(|(_, title)| title.to_string())
                .unwrap_or_else(|| generated_title(id));
            let todo = Todo {
                user_id: (id - 1) / TODOS_PER_USER + 1,
                id,
                title,
                completed: (id * 7 + id / 5) % 3 == 0,
            };
            (id, todo)
        })
        .collect()
}

fn generated_title(id: u64) -> String {
    let mut state = id.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let len = 3 + (id % 5) as usize;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            WORDS[(state >> 33) as usize % WORDS.len()]
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn app() -> Router {
    let db: Db = Arc::new(seed());
    info!(todos = db.len(), "seeded todo fixture");
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo)
                .put(replace_todo)
                .patch(patch_todo)
                .delete(delete_todo),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type JsonError = (StatusCode, Json<Value>);

fn not_found() -> JsonError {
    (StatusCode::NOT_FOUND, Json(json!({})))
}

/// Only the canonical decimal spelling of an id addresses a record: `2.5`,
/// `01` and ` 1` all miss.
fn lookup<'a>(db: &'a Db, segment: &str) -> Option<&'a Todo> {
    let id: u64 = segment.parse().ok()?;
    if id.to_string() != segment {
        return None;
    }
    db.get(&id)
}

async fn list_todos(
    State(db): State<Db>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Vec<Todo>> {
    // Repeats of one field are OR'd, different fields are AND'd.
    let mut filters: HashMap<&str, Vec<&str>> = HashMap::new();
    for (field, value) in &params {
        filters.entry(field.as_str()).or_default().push(value.as_str());
    }
    debug!(?filters, "list todos");
    let todos = db
        .values()
        .filter(|todo| {
            filters.iter().all(|(field, values)| {
                todo.filter_value(field)
                    .is_some_and(|actual| values.iter().any(|v| *v == actual))
            })
        })
        .cloned()
        .collect();
    Json(todos)
}

async fn create_todo(
    State(db): State<Db>,
    Json(mut input): Json<Map<String, Value>>,
) -> (StatusCode, Json<Value>) {
    let id = db.keys().next_back().copied().unwrap_or(0) + 1;
    input.insert("id".to_string(), json!(id));
    debug!(id, "create todo (not stored)");
    (StatusCode::CREATED, Json(Value::Object(input)))
}

async fn get_todo(
    State(db): State<Db>,
    Path(segment): Path<String>,
) -> Result<Json<Todo>, JsonError> {
    lookup(&db, &segment).cloned().map(Json).ok_or_else(not_found)
}

/// Echoes the payload with `id` forced to the path id. An unknown id fails
/// with 500, as the hosted service does.
async fn replace_todo(
    State(db): State<Db>,
    Path(segment): Path<String>,
    Json(mut input): Json<Map<String, Value>>,
) -> Result<Json<Value>, JsonError> {
    let Some(todo) = lookup(&db, &segment) else {
        debug!(%segment, "replace of unknown todo");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": format!("cannot replace todo {segment:?}") })),
        ));
    };
    input.insert("id".to_string(), json!(todo.id));
    Ok(Json(Value::Object(input)))
}

async fn patch_todo(
    State(db): State<Db>,
    Path(segment): Path<String>,
    Json(input): Json<Map<String, Value>>,
) -> Result<Json<Value>, JsonError> {
    let todo = lookup(&db, &segment).ok_or_else(not_found)?;
    let mut merged = todo.to_object();
    merged.extend(input);
    merged.insert("id".to_string(), json!(todo.id));
    Ok(Json(Value::Object(merged)))
}

async fn delete_todo(
    State(db): State<Db>,
    Path(segment): Path<String>,
) -> Result<Json<Value>, JsonError> {
    lookup(&db, &segment).ok_or_else(not_found)?;
    Ok(Json(json!({})))
}
