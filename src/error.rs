use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// The statement a handler was running when the database failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListPlayers,
    GetPlayer,
    UpdatePlayer,
    CreatePlayer,
    DeletePlayer,
}

impl Action {
    /// Message shown to the caller. Never carries driver detail.
    pub fn failure_message(self) -> &'static str {
        match self {
            Action::ListPlayers => "Error retrieving players",
            Action::GetPlayer => "Error retrieving player",
            Action::UpdatePlayer => "Error updating player",
            Action::CreatePlayer => "Error creating player",
            Action::DeletePlayer => "Error deleting player",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("player not found")]
    NotFound,
    #[error("{}: {source}", .action.failure_message())]
    Database {
        action: Action,
        #[source]
        source: sqlx::Error,
    },
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    /// Adapter for `map_err` on a query result.
    pub fn database(action: Action) -> impl FnOnce(sqlx::Error) -> ApiError {
        move |source| ApiError::Database { action, source }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Serialize)]
struct ErrorBody {
    kind: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                "not_found",
                "Player not found".to_string(),
            ),
            ApiError::Database { action, source } => {
                tracing::error!(?action, error = %source, "database error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database",
                    action.failure_message().to_string(),
                )
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "bad_request", message),
        };

        let body = Json(ErrorResponse {
            error: ErrorBody { kind, message },
        });

        (status, body).into_response()
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(%rejection, "rejected path");
        ApiError::BadRequest("Invalid player id".to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected body");
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::{json, Value};

    async fn render(err: ApiError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_envelope() {
        let (status, body) = render(ApiError::NotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body,
            json!({"error": {"kind": "not_found", "message": "Player not found"}})
        );
    }

    #[tokio::test]
    async fn database_error_hides_driver_detail() {
        let err = ApiError::Database {
            action: Action::UpdatePlayer,
            source: sqlx::Error::Protocol("password authentication failed for user \"admin\"".into()),
        };
        let (status, body) = render(err).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            json!({"error": {"kind": "database", "message": "Error updating player"}})
        );
        assert!(!body.to_string().contains("password"));
    }

    #[tokio::test]
    async fn bad_request_envelope() {
        let (status, body) = render(ApiError::BadRequest("Invalid player id".into())).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["kind"], "bad_request");
        assert_eq!(body["error"]["message"], "Invalid player id");
    }

    #[test]
    fn every_action_has_its_own_message() {
        let actions = [
            Action::ListPlayers,
            Action::GetPlayer,
            Action::UpdatePlayer,
            Action::CreatePlayer,
            Action::DeletePlayer,
        ];
        let mut messages: Vec<_> = actions.iter().map(|a| a.failure_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), actions.len());
    }

    #[test]
    fn display_keeps_detail_for_logs() {
        let err = ApiError::Database {
            action: Action::ListPlayers,
            source: sqlx::Error::PoolTimedOut,
        };
        assert!(err.to_string().starts_with("Error retrieving players: "));
    }
}
