use sea_orm_migration::prelude::*;

use crate::m20260701_100000_catalog::Facilitators;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Invoices {
    Table,
    Id,
    InvoiceNumber,
    CustomerId,
    CustomerName,
    CustomerEmail,
    CustomerPhone,
    DueDate,
    SubtotalMinor,
    TaxMinor,
    TotalMinor,
    AmountPaidMinor,
    AmountDueMinor,
    Currency,
    Status,
    Notes,
    Terms,
    CreatedAt,
}

#[derive(Iden)]
enum PurchaseOrders {
    Table,
    Id,
    PoNumber,
    FacilitatorId,
    DueDate,
    SubtotalMinor,
    TaxMinor,
    TotalMinor,
    AmountPaidMinor,
    AmountDueMinor,
    Currency,
    Status,
    Notes,
    Terms,
    CreatedAt,
}

#[derive(Iden)]
enum Payments {
    Table,
    Id,
    PaymentNumber,
    InvoiceId,
    PurchaseOrderId,
    AmountMinor,
    PaymentMethod,
    PaymentDate,
    ReferenceNumber,
    Notes,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoices::InvoiceNumber).string().not_null())
                    .col(ColumnDef::new(Invoices::CustomerId).string())
                    .col(ColumnDef::new(Invoices::CustomerName).string().not_null())
                    .col(ColumnDef::new(Invoices::CustomerEmail).string())
                    .col(ColumnDef::new(Invoices::CustomerPhone).string())
                    .col(ColumnDef::new(Invoices::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Invoices::SubtotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::TaxMinor).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::TotalMinor).big_integer().not_null())
                    .col(
                        ColumnDef::new(Invoices::AmountPaidMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::AmountDueMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::Currency).string().not_null())
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(ColumnDef::new(Invoices::Notes).string())
                    .col(ColumnDef::new(Invoices::Terms).string())
                    .col(ColumnDef::new(Invoices::CreatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-invoices-invoice_number")
                    .table(Invoices::Table)
                    .col(Invoices::InvoiceNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PurchaseOrders::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PurchaseOrders::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PurchaseOrders::PoNumber).string().not_null())
                    .col(
                        ColumnDef::new(PurchaseOrders::FacilitatorId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseOrders::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(PurchaseOrders::SubtotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::TaxMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::TotalMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::AmountPaidMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PurchaseOrders::AmountDueMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PurchaseOrders::Currency).string().not_null())
                    .col(ColumnDef::new(PurchaseOrders::Status).string().not_null())
                    .col(ColumnDef::new(PurchaseOrders::Notes).string())
                    .col(ColumnDef::new(PurchaseOrders::Terms).string())
                    .col(
                        ColumnDef::new(PurchaseOrders::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-purchase_orders-facilitator_id")
                            .from(PurchaseOrders::Table, PurchaseOrders::FacilitatorId)
                            .to(Facilitators::Table, Facilitators::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-purchase_orders-po_number")
                    .table(PurchaseOrders::Table)
                    .col(PurchaseOrders::PoNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::PaymentNumber).string().not_null())
                    .col(ColumnDef::new(Payments::InvoiceId).string())
                    .col(ColumnDef::new(Payments::PurchaseOrderId).string())
                    .col(ColumnDef::new(Payments::AmountMinor).big_integer().not_null())
                    .col(ColumnDef::new(Payments::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Payments::PaymentDate).timestamp().not_null())
                    .col(ColumnDef::new(Payments::ReferenceNumber).string())
                    .col(ColumnDef::new(Payments::Notes).string())
                    .col(ColumnDef::new(Payments::CreatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payments-invoice_id")
                            .from(Payments::Table, Payments::InvoiceId)
                            .to(Invoices::Table, Invoices::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-payments-purchase_order_id")
                            .from(Payments::Table, Payments::PurchaseOrderId)
                            .to(PurchaseOrders::Table, PurchaseOrders::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payments-payment_number")
                    .table(Payments::Table)
                    .col(Payments::PaymentNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payments-invoice_id")
                    .table(Payments::Table)
                    .col(Payments::InvoiceId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-payments-purchase_order_id")
                    .table(Payments::Table)
                    .col(Payments::PurchaseOrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        Ok(())
    }
}
