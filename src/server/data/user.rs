//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for the durable record of every Discord
//! identity that has completed the OAuth login at least once.

use chrono::Utc;
use migration::OnConflict;
use sea_orm::{ActiveValue, DatabaseConnection, EntityTrait};

use crate::server::{
    error::AppError,
    model::user::{UpsertUserParam, User},
};

/// Repository providing database operations for users.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Upserts a user after a successful OAuth callback.
    ///
    /// Inserts a new row or refreshes the profile fields of an existing one. The
    /// login timestamp is always moved to now.
    ///
    /// # Arguments
    /// - `param` - Profile fields from Discord's `/users/@me`
    ///
    /// # Returns
    /// - `Ok(User)` - The created or updated user
    /// - `Err(AppError::DbErr)` - Database error during insert or update
    pub async fn upsert(&self, param: UpsertUserParam) -> Result<User, AppError> {
        let entity = entity::prelude::User::insert(entity::user::ActiveModel {
            discord_id: ActiveValue::Set(param.discord_id.to_string()),
            username: ActiveValue::Set(param.username),
            avatar: ActiveValue::Set(param.avatar),
            email: ActiveValue::Set(param.email),
            last_login_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::user::Column::DiscordId)
                .update_columns([
                    entity::user::Column::Username,
                    entity::user::Column::Avatar,
                    entity::user::Column::Email,
                    entity::user::Column::LastLoginAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(User::from_entity(entity)?)
    }

    /// Finds a user by their Discord ID.
    ///
    /// # Arguments
    /// - `discord_id` - Discord user ID as u64
    ///
    /// # Returns
    /// - `Ok(Some(User))` - User found
    /// - `Ok(None)` - No user has logged in with that Discord ID
    /// - `Err(AppError)` - Database error during query
    pub async fn find_by_discord_id(&self, discord_id: u64) -> Result<Option<User>, AppError> {
        let entity = entity::prelude::User::find_by_id(discord_id.to_string())
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity).transpose()?)
    }
}
