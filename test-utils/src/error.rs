use thiserror::Error;

/// Errors raised while preparing a test context.
#[derive(Error, Debug)]
pub enum TestError {
    /// In-memory database could not be opened or a table could not be created.
    #[error(transparent)]
    Database(#[from] sea_orm::DbErr),

    /// The session table could not be created.
    #[error("Failed to prepare session store: {0}")]
    Session(String),
}
