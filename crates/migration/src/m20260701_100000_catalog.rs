use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
pub enum Events {
    Table,
    Id,
    Title,
    Description,
    Category,
    DefaultPriceMinor,
    DefaultLocation,
    Status,
    CreatedAt,
}

#[derive(Iden)]
pub enum EventSessions {
    Table,
    Id,
    EventId,
    Date,
    Time,
    Location,
    PriceMinor,
    Capacity,
    Status,
    CreatedAt,
}

#[derive(Iden)]
pub enum Facilitators {
    Table,
    Id,
    Name,
    Role,
    Email,
    Phone,
    BaseFeeMinor,
    CommissionPerMille,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Events::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(ColumnDef::new(Events::Description).string())
                    .col(ColumnDef::new(Events::Category).string())
                    .col(
                        ColumnDef::new(Events::DefaultPriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::DefaultLocation).string())
                    .col(ColumnDef::new(Events::Status).string().not_null())
                    .col(ColumnDef::new(Events::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(EventSessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(EventSessions::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(EventSessions::EventId).string().not_null())
                    .col(ColumnDef::new(EventSessions::Date).date().not_null())
                    .col(ColumnDef::new(EventSessions::Time).string().not_null())
                    .col(ColumnDef::new(EventSessions::Location).string())
                    .col(
                        ColumnDef::new(EventSessions::PriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(EventSessions::Capacity).integer().not_null())
                    .col(ColumnDef::new(EventSessions::Status).string().not_null())
                    .col(
                        ColumnDef::new(EventSessions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-event_sessions-event_id")
                            .from(EventSessions::Table, EventSessions::EventId)
                            .to(Events::Table, Events::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-event_sessions-event_id")
                    .table(EventSessions::Table)
                    .col(EventSessions::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-event_sessions-status-date")
                    .table(EventSessions::Table)
                    .col(EventSessions::Status)
                    .col(EventSessions::Date)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Facilitators::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Facilitators::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Facilitators::Name).string().not_null())
                    .col(ColumnDef::new(Facilitators::Role).string())
                    .col(ColumnDef::new(Facilitators::Email).string())
                    .col(ColumnDef::new(Facilitators::Phone).string())
                    .col(
                        ColumnDef::new(Facilitators::BaseFeeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Facilitators::CommissionPerMille)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Facilitators::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EventSessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Facilitators::Table).to_owned())
            .await?;
        Ok(())
    }
}
