use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ActionLog::Table)
                    .if_not_exists()
                    .col(pk_auto(ActionLog::Id))
                    .col(string(ActionLog::RequesterId))
                    .col(string(ActionLog::Kind))
                    .col(string(ActionLog::Outcome))
                    .col(string_null(ActionLog::Detail))
                    .col(timestamp_with_time_zone(ActionLog::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_action_log_requester_id")
                    .table(ActionLog::Table)
                    .col(ActionLog::RequesterId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ActionLog::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ActionLog {
    Table,
    Id,
    RequesterId,
    Kind,
    Outcome,
    Detail,
    CreatedAt,
}
