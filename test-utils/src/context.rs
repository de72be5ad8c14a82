use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use std::sync::Arc;
use time::Duration;
use tower_sessions::{Expiry, Session};
use tower_sessions_sqlx_store::SqliteStore;

use crate::error::TestError;

/// Isolated test environment: an in-memory SQLite database plus a session stored in it.
///
/// Both are created lazily and live as long as the context.
pub struct TestContext {
    /// In-memory SQLite connection, opened on first use.
    pub db: Option<DatabaseConnection>,

    /// Session backed by the same database, created on first use.
    pub session: Option<Session>,
}

impl TestContext {
    /// Creates an empty context; nothing is opened until requested.
    pub fn new() -> Self {
        Self {
            db: None,
            session: None,
        }
    }

    /// Gets or opens the in-memory database connection.
    ///
    /// # Returns
    /// - `Ok(&DatabaseConnection)` - Shared connection for this context
    /// - `Err(TestError::Database)` - SQLite could not be opened
    pub async fn database(&mut self) -> Result<&DatabaseConnection, TestError> {
        match self.db {
            Some(ref db) => Ok(db),
            None => {
                let db = Database::connect("sqlite::memory:").await?;

                Ok(&*self.db.insert(db))
            }
        }
    }

    /// Executes CREATE TABLE statements in order.
    ///
    /// Normally called by `TestBuilder::build()`.
    pub async fn with_tables(&mut self, stmts: Vec<TableCreateStatement>) -> Result<(), TestError> {
        let db = self.database().await?;

        for stmt in stmts {
            db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Gets or creates a session stored in the context database.
    ///
    /// The first call migrates the `tower_sessions` table and creates a fresh
    /// session with the same 7 day inactivity expiry the server uses.
    ///
    /// # Returns
    /// - `Ok(&Session)` - Session for this context
    /// - `Err(TestError)` - Database or session table setup failed
    pub async fn session(&mut self) -> Result<&Session, TestError> {
        match self.session {
            Some(ref session) => Ok(session),
            None => {
                let db = self.database().await?;

                let pool = db.get_sqlite_connection_pool();
                let session_store = SqliteStore::new(pool.clone());

                session_store
                    .migrate()
                    .await
                    .map_err(|e| TestError::Session(e.to_string()))?;

                let session = Session::new(
                    None,
                    Arc::new(session_store),
                    Some(Expiry::OnInactivity(Duration::days(7))),
                );

                Ok(&*self.session.insert(session))
            }
        }
    }

    /// Gets both the database and the session in one borrow.
    ///
    /// Calling `database()` and `session()` separately would hold two mutable
    /// borrows of the context.
    pub async fn db_and_session(&mut self) -> Result<(&DatabaseConnection, &Session), TestError> {
        self.session().await?;

        match (self.db.as_ref(), self.session.as_ref()) {
            (Some(db), Some(session)) => Ok((db, session)),
            _ => Err(TestError::Session(
                "context was not initialised".to_string(),
            )),
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
