//! Action log repository.
//!
//! Every dispatched action that reaches the authorization step leaves one row
//! here with its terminal outcome.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::{
    error::AppError,
    model::action_log::{ActionLogEntry, CreateActionLogParam},
};

pub struct ActionLogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ActionLogRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records the outcome of an action.
    ///
    /// # Arguments
    /// - `param` - Requester, action kind, outcome and optional detail message
    ///
    /// # Returns
    /// - `Ok(ActionLogEntry)` - The inserted entry
    /// - `Err(AppError)` - Database error during insert
    pub async fn create(&self, param: CreateActionLogParam) -> Result<ActionLogEntry, AppError> {
        let entity = entity::action_log::ActiveModel {
            requester_id: ActiveValue::Set(param.requester_id.to_string()),
            kind: ActiveValue::Set(param.kind.as_str().to_string()),
            outcome: ActiveValue::Set(param.outcome.as_str().to_string()),
            detail: ActiveValue::Set(param.detail),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(ActionLogEntry::from_entity(entity)?)
    }

    /// Gets the most recent entries of a requester, newest first.
    ///
    /// # Arguments
    /// - `requester_id` - Discord ID of the requester
    /// - `limit` - Maximum number of entries returned
    ///
    /// # Returns
    /// - `Ok(Vec<ActionLogEntry>)` - Entries ordered by creation time descending
    /// - `Err(AppError)` - Database error during query
    pub async fn get_recent_by_requester(
        &self,
        requester_id: u64,
        limit: u64,
    ) -> Result<Vec<ActionLogEntry>, AppError> {
        let entities = entity::prelude::ActionLog::find()
            .filter(entity::action_log::Column::RequesterId.eq(requester_id.to_string()))
            .order_by_desc(entity::action_log::Column::CreatedAt)
            .order_by_desc(entity::action_log::Column::Id)
            .limit(limit)
            .all(self.db)
            .await?;

        entities
            .into_iter()
            .map(|entity| ActionLogEntry::from_entity(entity).map_err(AppError::from))
            .collect()
    }
}
