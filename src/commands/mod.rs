pub mod auth;
pub mod board;
pub mod day;
pub mod work;

use anyhow::Result;
use bronto_client::{ApiClient, Board, BoardStore, SessionStore};

/// Client against the configured API base, injecting from the default
/// durable token slot.
pub fn api() -> Result<ApiClient> {
    let session = SessionStore::default_path()?;
    Ok(ApiClient::from_env(session))
}

/// Load the user's boards and make one of them the store's current board.
pub async fn select_board(store: &mut BoardStore, user: &str, board_id: &str) -> Result<Board> {
    store.load_boards_for_user(user).await?;

    let board = match store.boards().iter().find(|b| b.id == board_id) {
        Some(board) => board.clone(),
        None => {
            let available: Vec<_> = store.boards().iter().map(|b| b.id.clone()).collect();
            anyhow::bail!(
                "Board '{}' not found. Available: {}",
                board_id,
                available.join(", ")
            );
        }
    };

    store.set_current_board(board.clone());
    Ok(board)
}
