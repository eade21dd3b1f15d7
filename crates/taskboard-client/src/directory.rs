use std::sync::Arc;
use taskboard_core::{TaskboardError, TaskboardResult};
use taskboard_domain::{Board, BoardId, NewBoard};

use crate::api::BoardApi;

/// The dashboard's list of boards owned by the current user.
pub struct BoardDirectory {
    api: Arc<dyn BoardApi>,
    boards: Vec<Board>,
}

impl BoardDirectory {
    pub fn new(api: Arc<dyn BoardApi>) -> Self {
        Self {
            api,
            boards: Vec::new(),
        }
    }

    pub async fn load(api: Arc<dyn BoardApi>) -> TaskboardResult<Self> {
        let mut directory = Self::new(api);
        directory.refresh().await?;
        Ok(directory)
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn get(&self, board_id: BoardId) -> Option<&Board> {
        self.boards.iter().find(|b| b.id == board_id)
    }

    pub async fn refresh(&mut self) -> TaskboardResult<()> {
        self.boards = self.api.list_boards().await?;
        tracing::debug!("Loaded {} boards", self.boards.len());
        Ok(())
    }

    pub async fn create(&mut self, name: &str, image_url: Option<String>) -> TaskboardResult<&Board> {
        let board = NewBoard::new(name).with_image_url(image_url);
        board.validate()?;
        let created = self.api.create_board(&board).await?;
        tracing::info!("Created board {} ({})", created.name, created.id);
        self.boards.push(created);
        self.boards
            .last()
            .ok_or_else(|| TaskboardError::Internal("board list empty after push".to_string()))
    }
}
