use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    SessionId,
    EventName,
    EventDate,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    NumberOfPeople,
    TotalPriceMinor,
    OjasenFeeMinor,
    FacilitatorFeeMinor,
    FacilitatorId,
    UserId,
    Status,
    SpecialRequests,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // session_id and facilitator_id/user_id are weak references on
        // purpose: bookings keep their snapshot when the referenced rows
        // change or disappear.
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::SessionId).string().not_null())
                    .col(ColumnDef::new(Bookings::EventName).string().not_null())
                    .col(ColumnDef::new(Bookings::EventDate).date().not_null())
                    .col(ColumnDef::new(Bookings::CustomerName).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerEmail).string().not_null())
                    .col(ColumnDef::new(Bookings::CustomerPhone).string())
                    .col(
                        ColumnDef::new(Bookings::NumberOfPeople)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::TotalPriceMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::OjasenFeeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Bookings::FacilitatorFeeMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Bookings::FacilitatorId).string())
                    .col(ColumnDef::new(Bookings::UserId).string())
                    .col(ColumnDef::new(Bookings::Status).string().not_null())
                    .col(ColumnDef::new(Bookings::SpecialRequests).string())
                    .col(ColumnDef::new(Bookings::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bookings-user_id")
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bookings-session_id")
                    .table(Bookings::Table)
                    .col(Bookings::SessionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-bookings-event_date")
                    .table(Bookings::Table)
                    .col(Bookings::EventDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await?;
        Ok(())
    }
}
