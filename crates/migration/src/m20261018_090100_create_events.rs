use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Events::RequestId).text().not_null())
                    .col(ColumnDef::new(Events::Author).text().not_null())
                    .col(
                        ColumnDef::new(Events::Action)
                            .custom(Alias::new("event_action"))
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::FromBranch).text().not_null())
                    .col(ColumnDef::new(Events::ToBranch).text().not_null())
                    .col(
                        ColumnDef::new(Events::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Serves the polling query: timestamp > $1 ORDER BY timestamp, id
        manager
            .create_index(
                Index::create()
                    .name("idx_events_timestamp_id")
                    .table(Events::Table)
                    .col(Events::Timestamp)
                    .col(Events::Id)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    RequestId,
    Author,
    Action,
    FromBranch,
    ToBranch,
    Timestamp,
    CreatedAt,
}
