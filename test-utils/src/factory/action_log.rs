//! Factory for `action_log` rows.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Builder for `action_log` rows with overridable defaults.
pub struct ActionLogFactory<'a> {
    db: &'a DatabaseConnection,
    requester_id: String,
    kind: String,
    outcome: String,
    detail: Option<String>,
    created_at: DateTime<Utc>,
}

impl<'a> ActionLogFactory<'a> {
    /// Creates a factory for a successful `create_structure` entry made now.
    pub fn new(db: &'a DatabaseConnection, requester_id: impl Into<String>) -> Self {
        Self {
            db,
            requester_id: requester_id.into(),
            kind: "create_structure".to_string(),
            outcome: "succeeded".to_string(),
            detail: None,
            created_at: Utc::now(),
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn outcome(mut self, outcome: impl Into<String>) -> Self {
        self.outcome = outcome.into();
        self
    }

    pub fn detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Inserts the row.
    pub async fn build(self) -> Result<entity::action_log::Model, DbErr> {
        entity::action_log::ActiveModel {
            requester_id: ActiveValue::Set(self.requester_id),
            kind: ActiveValue::Set(self.kind),
            outcome: ActiveValue::Set(self.outcome),
            detail: ActiveValue::Set(self.detail),
            created_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default `action_log` row for the requester.
pub async fn create_action_log(
    db: &DatabaseConnection,
    requester_id: &str,
) -> Result<entity::action_log::Model, DbErr> {
    ActionLogFactory::new(db, requester_id).build().await
}
