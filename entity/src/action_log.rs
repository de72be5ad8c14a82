use sea_orm::entity::prelude::*;

/// Audit row written for every dispatched action that reached authorization.
///
/// `requester_id` is not a foreign key: slash-command requesters may never have
/// logged in through the dashboard.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "action_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub requester_id: String,
    pub kind: String,
    pub outcome: String,
    pub detail: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
