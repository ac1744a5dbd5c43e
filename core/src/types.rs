//! Domain DTOs for the todos API.
//!
//! These mirror the hosted service's schema (camelCase `userId` on the wire)
//! but are defined independently of the mock-server crate. The integration
//! tests catch schema drift between the two.

use serde::{Deserialize, Serialize};

use crate::fixture::Fixture;

/// A single todo record as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

/// Request payload for creating a todo. The server assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    pub user_id: u64,
}

/// Full replacement payload sent with PUT.
///
/// `user_id` and `id` are fixtures rather than integers: the service echoes
/// whatever it is given for these fields, and probing that requires sending
/// strings, floats and out-of-range numbers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoReplacement {
    pub title: String,
    pub completed: bool,
    pub user_id: Fixture,
    pub id: Fixture,
}

/// Partial update sent with PATCH. Only the fields present in the JSON are
/// applied; omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            completed: None,
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            title: None,
            completed: Some(completed),
        }
    }
}
