use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Campaigns {
    Table,
    Id,
    Name,
    CampaignType,
    Status,
    StartDate,
    EndDate,
    DiscountPerMille,
    TargetAudience,
    UsageCount,
    RevenueMinor,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campaigns::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campaigns::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campaigns::Name).string().not_null())
                    .col(ColumnDef::new(Campaigns::CampaignType).string().not_null())
                    .col(ColumnDef::new(Campaigns::Status).string().not_null())
                    .col(ColumnDef::new(Campaigns::StartDate).date().not_null())
                    .col(ColumnDef::new(Campaigns::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Campaigns::DiscountPerMille)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Campaigns::TargetAudience)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaigns::UsageCount).big_integer().not_null())
                    .col(
                        ColumnDef::new(Campaigns::RevenueMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Campaigns::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Campaigns::Table).to_owned())
            .await?;
        Ok(())
    }
}
