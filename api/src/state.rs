//! Application state shared across Axum route handlers.
//!
//! Holds the database connection, the chat client used by the content
//! generators and the media storage layout. Cloning is cheap: the
//! connection is pooled and the chat client sits behind an `Arc`.

use ai::ChatClient;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use util::paths::Storage;

#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    llm: Arc<dyn ChatClient>,
    storage: Storage,
}

impl AppState {
    pub fn new(db: DatabaseConnection, llm: Arc<dyn ChatClient>, storage: Storage) -> Self {
        Self { db, llm, storage }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// The language model client used by the exercise and slide generators.
    pub fn llm(&self) -> &dyn ChatClient {
        self.llm.as_ref()
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }
}
