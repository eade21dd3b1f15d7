//! HTTP client for the board service.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use taskboard_core::{AppConfig, TaskboardError, TaskboardResult};
use taskboard_domain::{
    Board, BoardId, BoardUpdate, Column, ColumnId, ColumnUpdate, Credentials, NewBoard,
    NewColumn, NewTask, Registration, Task, TaskId, TaskUpdate, User,
};

use crate::credentials::CredentialStore;

pub const BAD_CREDENTIALS_MESSAGE: &str = "Incorrect username or password";
pub const SESSION_EXPIRED_MESSAGE: &str = "Session expired";
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Every remote call the client makes. Sessions and the auth context talk
/// to this trait so they can run against a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Exchanges credentials for an access token.
    async fn login(&self, credentials: &Credentials) -> TaskboardResult<String>;
    async fn register(&self, registration: &Registration) -> TaskboardResult<()>;
    async fn current_user(&self) -> TaskboardResult<User>;

    async fn list_boards(&self) -> TaskboardResult<Vec<Board>>;
    async fn create_board(&self, board: &NewBoard) -> TaskboardResult<Board>;
    async fn update_board(&self, board_id: BoardId, update: &BoardUpdate)
        -> TaskboardResult<Board>;
    async fn inbox(&self) -> TaskboardResult<Board>;

    async fn list_columns(&self, board_id: BoardId) -> TaskboardResult<Vec<Column>>;
    async fn create_column(&self, board_id: BoardId, column: &NewColumn)
        -> TaskboardResult<Column>;
    async fn update_column(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        update: &ColumnUpdate,
    ) -> TaskboardResult<Column>;
    async fn delete_column(&self, board_id: BoardId, column_id: ColumnId) -> TaskboardResult<()>;

    async fn create_task(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        task: &NewTask,
    ) -> TaskboardResult<Task>;
    async fn update_task(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
        update: &TaskUpdate,
    ) -> TaskboardResult<Task>;
    async fn delete_task(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
    ) -> TaskboardResult<()>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Pulls a readable message out of an error body.
///
/// The service answers with `{"detail": "..."}`, or for rejected payloads
/// `{"detail": [{"msg": "..."}, ...]}`.
fn extract_detail(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        serde_json::Value::String(detail) => Some(detail.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

fn transport_error(e: reqwest::Error) -> TaskboardError {
    if e.is_decode() {
        TaskboardError::Serialization(e.to_string())
    } else {
        TaskboardError::Transport(e.to_string())
    }
}

/// Which request produced a 401: a rejected login means bad credentials,
/// anything else means the stored session is no longer valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthFailure {
    Login,
    Session,
}

pub struct HttpApi {
    client: Client,
    base_url: String,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpApi {
    pub fn new(
        base_url: &str,
        credentials: Arc<dyn CredentialStore>,
        timeout: Duration,
    ) -> TaskboardResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(transport_error)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            credentials,
        })
    }

    pub fn from_config(
        config: &AppConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> TaskboardResult<Self> {
        Self::new(
            config.effective_api_url(),
            credentials,
            Duration::from_secs(config.effective_request_timeout_secs()),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> TaskboardResult<RequestBuilder> {
        Ok(match self.credentials.get()? {
            Some(token) => request.bearer_auth(token),
            None => request,
        })
    }

    async fn send(
        &self,
        request: RequestBuilder,
        auth_failure: AuthFailure,
    ) -> TaskboardResult<Response> {
        let response = self
            .authorize(request)?
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request to {} failed: {}", self.base_url, e);
                transport_error(e)
            })?;
        self.check_response(response, auth_failure).await
    }

    /// Maps a non-2xx response to the matching error.
    async fn check_response(
        &self,
        response: Response,
        auth_failure: AuthFailure,
    ) -> TaskboardResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().clone();

        if status == StatusCode::UNAUTHORIZED {
            if let Err(e) = self.credentials.clear() {
                tracing::warn!("Could not clear stored credentials: {}", e);
            }
            let message = match auth_failure {
                AuthFailure::Login => BAD_CREDENTIALS_MESSAGE,
                AuthFailure::Session => SESSION_EXPIRED_MESSAGE,
            };
            tracing::warn!("{} rejected with 401: {}", url, message);
            return Err(TaskboardError::Unauthorized(message.to_string()));
        }

        let body = response.text().await.unwrap_or_default();
        let detail = extract_detail(&body).unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string());
        tracing::error!("{} failed with {}: {}", url, status, detail);
        Err(TaskboardError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> TaskboardResult<T> {
        response.json::<T>().await.map_err(|e| {
            tracing::error!("Unexpected response body: {}", e);
            TaskboardError::Serialization(e.to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> TaskboardResult<T> {
        tracing::debug!("GET {}", path);
        let response = self
            .send(self.client.get(self.url(path)), AuthFailure::Session)
            .await?;
        Self::read_json(response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> TaskboardResult<T> {
        tracing::debug!("POST {}", path);
        let response = self
            .send(self.client.post(self.url(path)).json(body), AuthFailure::Session)
            .await?;
        Self::read_json(response).await
    }

    async fn patch_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> TaskboardResult<T> {
        tracing::debug!("PATCH {}", path);
        let response = self
            .send(self.client.patch(self.url(path)).json(body), AuthFailure::Session)
            .await?;
        Self::read_json(response).await
    }

    async fn delete(&self, path: &str) -> TaskboardResult<()> {
        tracing::debug!("DELETE {}", path);
        self.send(self.client.delete(self.url(path)), AuthFailure::Session)
            .await?;
        Ok(())
    }
}

fn lists_path(board_id: BoardId) -> String {
    format!("/boards/{}/lists", board_id)
}

fn list_path(board_id: BoardId, column_id: ColumnId) -> String {
    format!("/boards/{}/lists/{}", board_id, column_id)
}

fn cards_path(board_id: BoardId, column_id: ColumnId) -> String {
    format!("/boards/{}/lists/{}/cards", board_id, column_id)
}

fn card_path(board_id: BoardId, column_id: ColumnId, task_id: TaskId) -> String {
    format!("/boards/{}/lists/{}/cards/{}", board_id, column_id, task_id)
}

#[async_trait]
impl BoardApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> TaskboardResult<String> {
        tracing::debug!("POST /auth/login");
        let request = self.client.post(self.url("/auth/login")).form(credentials);
        let response = self.send(request, AuthFailure::Login).await?;
        let token: TokenResponse = Self::read_json(response).await?;
        Ok(token.access_token)
    }

    async fn register(&self, registration: &Registration) -> TaskboardResult<()> {
        tracing::debug!("POST /auth/register");
        let request = self.client.post(self.url("/auth/register")).json(registration);
        self.send(request, AuthFailure::Session).await?;
        Ok(())
    }

    async fn current_user(&self) -> TaskboardResult<User> {
        self.get_json("/users/me").await
    }

    async fn list_boards(&self) -> TaskboardResult<Vec<Board>> {
        self.get_json("/boards").await
    }

    async fn create_board(&self, board: &NewBoard) -> TaskboardResult<Board> {
        self.post_json("/boards", board).await
    }

    async fn update_board(
        &self,
        board_id: BoardId,
        update: &BoardUpdate,
    ) -> TaskboardResult<Board> {
        self.patch_json(&format!("/boards/{}", board_id), update)
            .await
    }

    async fn inbox(&self) -> TaskboardResult<Board> {
        let inbox: Board = self.get_json("/inbox").await?;
        Ok(inbox.into_inbox())
    }

    async fn list_columns(&self, board_id: BoardId) -> TaskboardResult<Vec<Column>> {
        self.get_json(&lists_path(board_id)).await
    }

    async fn create_column(
        &self,
        board_id: BoardId,
        column: &NewColumn,
    ) -> TaskboardResult<Column> {
        self.post_json(&lists_path(board_id), column).await
    }

    async fn update_column(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        update: &ColumnUpdate,
    ) -> TaskboardResult<Column> {
        self.patch_json(&list_path(board_id, column_id), update)
            .await
    }

    async fn delete_column(&self, board_id: BoardId, column_id: ColumnId) -> TaskboardResult<()> {
        self.delete(&list_path(board_id, column_id)).await
    }

    async fn create_task(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        task: &NewTask,
    ) -> TaskboardResult<Task> {
        self.post_json(&cards_path(board_id, column_id), task).await
    }

    async fn update_task(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
        update: &TaskUpdate,
    ) -> TaskboardResult<Task> {
        self.patch_json(&card_path(board_id, column_id, task_id), update)
            .await
    }

    async fn delete_task(
        &self,
        board_id: BoardId,
        column_id: ColumnId,
        task_id: TaskId,
    ) -> TaskboardResult<()> {
        self.delete(&card_path(board_id, column_id, task_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_string_detail() {
        assert_eq!(
            extract_detail(r#"{"detail": "Board with id 4 not found."}"#).as_deref(),
            Some("Board with id 4 not found.")
        );
    }

    #[test]
    fn test_extract_validation_detail() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "too short"},
                                  {"loc": ["body", "text"], "msg": "too long"}]}"#;
        assert_eq!(
            extract_detail(body).as_deref(),
            Some("too short; too long")
        );
    }

    #[test]
    fn test_extract_detail_missing() {
        assert_eq!(extract_detail("<html>502</html>"), None);
        assert_eq!(extract_detail(r#"{"error": "x"}"#), None);
        assert_eq!(extract_detail(r#"{"detail": []}"#), None);
    }

    #[test]
    fn test_paths() {
        assert_eq!(lists_path(1), "/boards/1/lists");
        assert_eq!(list_path(1, 2), "/boards/1/lists/2");
        assert_eq!(cards_path(1, 2), "/boards/1/lists/2/cards");
        assert_eq!(card_path(1, 2, 3), "/boards/1/lists/2/cards/3");
    }
}
