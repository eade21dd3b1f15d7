use std::sync::Arc;
use taskboard_client::{
    AuthContext, BoardApi, BoardSession, CredentialStore, FileCredentialStore, HttpApi,
};
use taskboard_core::{AppConfig, TaskboardError, TaskboardResult};
use taskboard_domain::{BoardId, ColumnId};

use crate::cli::{Cli, TaskTarget};

/// Everything a subcommand needs: the resolved config and an auth context
/// wired to the HTTP client.
pub struct CliContext {
    pub config: AppConfig,
    pub auth: AuthContext,
}

impl CliContext {
    /// Config file first, then environment, then command-line flags.
    pub fn from_cli(cli: &Cli) -> TaskboardResult<Self> {
        let mut config = AppConfig::load();
        if let Some(url) = &cli.api_url {
            config.api_url = Some(url.clone());
        }
        if let Some(path) = &cli.credentials {
            config.credentials_path = Some(path.clone());
        }

        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(
            config.effective_credentials_path()?,
        ));
        let api: Arc<dyn BoardApi> =
            Arc::new(HttpApi::from_config(&config, Arc::clone(&credentials))?);
        tracing::debug!("Using API at {}", config.effective_api_url());

        Ok(Self {
            auth: AuthContext::new(api, credentials),
            config,
        })
    }

    pub fn api(&self) -> Arc<dyn BoardApi> {
        self.auth.api()
    }

    pub async fn board(&self, board_id: BoardId) -> TaskboardResult<BoardSession> {
        BoardSession::load(self.api(), board_id).await
    }

    pub async fn inbox(&self) -> TaskboardResult<BoardSession> {
        BoardSession::load_inbox(self.api()).await
    }

    /// Loads the board or inbox a task command points at and resolves its
    /// list id.
    pub async fn task_session(
        &self,
        target: TaskTarget,
    ) -> TaskboardResult<(BoardSession, ColumnId)> {
        let session = match target.board_id {
            Some(board_id) if !target.inbox => self.board(board_id).await?,
            _ => self.inbox().await?,
        };

        let column_id = match target.column_id {
            Some(column_id) => column_id,
            None if session.is_inbox() => session
                .snapshot()
                .inbox_column()
                .map(|c| c.id)
                .ok_or_else(|| TaskboardError::NotFound("The inbox has no list".to_string()))?,
            None => {
                return Err(TaskboardError::validation(
                    "--column-id is required for board tasks",
                ))
            }
        };

        if session.snapshot().column(column_id).is_none() {
            return Err(TaskboardError::NotFound(format!(
                "List {} not found",
                column_id
            )));
        }
        Ok((session, column_id))
    }
}
