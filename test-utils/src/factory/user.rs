//! Factory for `user` rows.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for `user` rows with overridable defaults.
pub struct UserFactory<'a> {
    db: &'a DatabaseConnection,
    discord_id: String,
    username: String,
    avatar: Option<String>,
    email: Option<String>,
}

impl<'a> UserFactory<'a> {
    /// Creates a factory with defaults.
    ///
    /// Defaults:
    /// - discord_id: a unique numeric string
    /// - username: `"user{id}"`
    /// - avatar / email: `None`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            discord_id: (100_000_000_000_000_000 + id).to_string(),
            username: format!("user{}", id),
            avatar: None,
            email: None,
        }
    }

    pub fn discord_id(mut self, discord_id: impl Into<String>) -> Self {
        self.discord_id = discord_id.into();
        self
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    pub fn avatar(mut self, avatar: impl Into<String>) -> Self {
        self.avatar = Some(avatar.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Inserts the row.
    ///
    /// # Returns
    /// - `Ok(entity::user::Model)` - Inserted row
    /// - `Err(DbErr)` - Insert failed
    pub async fn build(self) -> Result<entity::user::Model, DbErr> {
        entity::user::ActiveModel {
            discord_id: ActiveValue::Set(self.discord_id),
            username: ActiveValue::Set(self.username),
            avatar: ActiveValue::Set(self.avatar),
            email: ActiveValue::Set(self.email),
            last_login_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a user with default values.
pub async fn create_user(db: &DatabaseConnection) -> Result<entity::user::Model, DbErr> {
    UserFactory::new(db).build().await
}
