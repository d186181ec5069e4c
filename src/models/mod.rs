use serde::{Deserialize, Serialize};

pub const DELETE_CONFIRMATION: &str = "Player deleted successfully";

/// Row of the `player` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    pub id: i32,
    pub name: Option<String>,
    pub position: Option<String>,
}

/// Body of `POST /players` and `PUT /players/{id}`.
///
/// Both columns are always written. A field left out of the body is
/// stored as NULL rather than keeping its previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlayerPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

impl Default for DeleteConfirmation {
    fn default() -> Self {
        DeleteConfirmation {
            message: DELETE_CONFIRMATION.to_string(),
        }
    }
}
