//! Audit trail of dispatched actions.

use chrono::{DateTime, Utc};

use crate::{
    model::discord::ActionLogDto,
    server::{
        error::internal::InternalError, model::action::ActionKind,
        util::parse::parse_u64_from_string,
    },
};

/// Terminal state of a dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    Succeeded,
    Failed,
    Forbidden,
    Invalid,
}

impl ActionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Forbidden => "forbidden",
            Self::Invalid => "invalid",
        }
    }
}

/// One audited action.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionLogEntry {
    pub id: i32,
    pub requester_id: u64,
    pub kind: String,
    pub outcome: String,
    pub detail: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActionLogEntry {
    /// Converts an entity model at the repository boundary.
    pub fn from_entity(entity: entity::action_log::Model) -> Result<Self, InternalError> {
        Ok(Self {
            id: entity.id,
            requester_id: parse_u64_from_string(entity.requester_id)?,
            kind: entity.kind,
            outcome: entity.outcome,
            detail: entity.detail,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> ActionLogDto {
        ActionLogDto {
            kind: self.kind,
            outcome: self.outcome,
            detail: self.detail,
            created_at: self.created_at,
        }
    }
}

/// Parameters for recording an action outcome.
#[derive(Debug, Clone)]
pub struct CreateActionLogParam {
    pub requester_id: u64,
    pub kind: ActionKind,
    pub outcome: ActionOutcome,
    /// Curated message for non-successful outcomes.
    pub detail: Option<String>,
}
