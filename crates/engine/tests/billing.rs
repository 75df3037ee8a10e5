use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use sea_orm::{Database, DatabaseConnection};
use uuid::Uuid;

use engine::{
    DocumentStatus, Engine, EngineError, Money, NewFacilitator, NewInvoice, NewPayment,
    NewPurchaseOrder, PaymentPatch,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    (engine, db)
}

async fn engine_with_file_db() -> (Engine, DatabaseConnection, std::path::PathBuf) {
    let root = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../target/test_dbs");
    std::fs::create_dir_all(&root).unwrap();

    let path = root.join(format!("billing_{}.db", Uuid::new_v4()));
    let url = format!("sqlite:{}?mode=rwc", path.display());

    let db = Database::connect(&url).await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();

    (engine, db, path)
}

fn due(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn assert_document_number(number: &str, prefix: &str) {
    let parts: Vec<&str> = number.split('-').collect();
    assert_eq!(parts.len(), 3, "unexpected number shape: {number}");
    assert_eq!(parts[0], prefix);
    assert_eq!(parts[1].len(), 8);
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2].len(), 3);
    assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
}

async fn facilitator_id(engine: &Engine) -> String {
    let facilitator = engine
        .create_facilitator(NewFacilitator {
            name: Some("Sahan".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    facilitator.id.to_string()
}

#[tokio::test]
async fn create_invoice_initializes_balances_and_number() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("Amara Perera", due(2026, 9, 30), Money::new(10_000)))
        .await
        .unwrap();

    assert_document_number(&invoice.invoice_number, "INV");
    assert_eq!(invoice.total, Money::new(10_000));
    assert_eq!(invoice.amount_paid, Money::ZERO);
    assert_eq!(invoice.amount_due, Money::new(10_000));
    assert_eq!(invoice.status, DocumentStatus::Draft);
    assert_eq!(invoice.currency.code(), "LKR");
}

#[tokio::test]
async fn invoice_numbers_increment_within_a_day() {
    let (engine, _db) = engine_with_db().await;

    let first = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(100)))
        .await
        .unwrap();
    let second = engine
        .create_invoice(NewInvoice::new("B", due(2026, 9, 1), Money::new(100)))
        .await
        .unwrap();

    let suffix = |number: &str| {
        number
            .rsplit('-')
            .next()
            .unwrap()
            .parse::<u64>()
            .unwrap()
    };
    assert_eq!(suffix(&second.invoice_number), suffix(&first.invoice_number) + 1);
}

#[tokio::test]
async fn invoice_missing_fields_are_reported() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.create_invoice(NewInvoice::default()).await.unwrap_err();
    match err {
        EngineError::Validation(msg) => {
            assert!(msg.contains("customer_name"), "{msg}");
            assert!(msg.contains("due_date"), "{msg}");
            assert!(msg.contains("total"), "{msg}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn recording_payments_moves_balances_forward() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("Amara Perera", due(2026, 9, 30), Money::new(10_000)))
        .await
        .unwrap();

    let (invoice, payment) = engine
        .record_invoice_payment(
            &invoice.id.to_string(),
            NewPayment {
                amount: Some(Money::new(4_000)),
                payment_method: Some("card".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_document_number(&payment.payment_number, "PAY");
    assert_eq!(invoice.amount_paid, Money::new(4_000));
    assert_eq!(invoice.amount_due, Money::new(6_000));
    assert_eq!(invoice.status, DocumentStatus::Partial);

    let (invoice, _) = engine
        .record_invoice_payment(
            &invoice.id.to_string(),
            NewPayment {
                amount: Some(Money::new(6_000)),
                payment_method: Some("card".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(invoice.amount_paid, Money::new(10_000));
    assert_eq!(invoice.amount_due, Money::ZERO);
    assert_eq!(invoice.status, DocumentStatus::Paid);
    assert_eq!(invoice.amount_due, invoice.total - invoice.amount_paid);
}

#[tokio::test]
async fn overpayment_still_derives_paid() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(10_000)))
        .await
        .unwrap();
    let (invoice, _) = engine
        .record_invoice_payment(
            &invoice.id.to_string(),
            NewPayment {
                amount: Some(Money::new(12_000)),
                payment_method: Some("cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(invoice.amount_due, Money::new(-2_000));
    assert_eq!(invoice.status, DocumentStatus::Paid);
}

#[tokio::test]
async fn payment_on_missing_invoice_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .record_invoice_payment(
            &Uuid::new_v4().to_string(),
            NewPayment {
                amount: Some(Money::new(100)),
                payment_method: Some("cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn non_positive_payment_amounts_are_rejected() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(100)))
        .await
        .unwrap();
    let err = engine
        .record_invoice_payment(
            &invoice.id.to_string(),
            NewPayment {
                amount: Some(Money::ZERO),
                payment_method: Some("cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn purchase_order_payments_mirror_invoices() {
    let (engine, _db) = engine_with_db().await;
    let facilitator = facilitator_id(&engine).await;

    let po = engine
        .create_purchase_order(NewPurchaseOrder::new(&facilitator, due(2026, 10, 15), Money::new(5_000)))
        .await
        .unwrap();
    assert_document_number(&po.po_number, "PO");
    assert_eq!(po.amount_due, Money::new(5_000));

    let (po, _) = engine
        .record_po_payment(
            &po.id.to_string(),
            NewPayment {
                amount: Some(Money::new(5_000)),
                payment_method: Some("bank_transfer".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(po.amount_paid, Money::new(5_000));
    assert_eq!(po.amount_due, Money::ZERO);
    assert_eq!(po.status, DocumentStatus::Paid);
}

#[tokio::test]
async fn purchase_order_requires_existing_facilitator() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_purchase_order(NewPurchaseOrder::new(
            Uuid::new_v4().to_string(),
            due(2026, 10, 15),
            Money::new(5_000),
        ))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::KeyNotFound(_)));
}

#[tokio::test]
async fn concurrent_payments_do_not_lose_updates() {
    let (engine, _db, _path) = engine_with_file_db().await;
    let engine = Arc::new(engine);

    let invoice = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(100_000)))
        .await
        .unwrap();
    let invoice_id = invoice.id.to_string();

    let pay = |amount: i64| {
        let engine = Arc::clone(&engine);
        let invoice_id = invoice_id.clone();
        tokio::spawn(async move {
            engine
                .record_invoice_payment(
                    &invoice_id,
                    NewPayment {
                        amount: Some(Money::new(amount)),
                        payment_method: Some("cash".to_string()),
                        ..Default::default()
                    },
                )
                .await
        })
    };

    let (first, second) = tokio::join!(pay(1_000), pay(2_000));
    first.unwrap().unwrap();
    second.unwrap().unwrap();

    let invoices = engine.list_invoices().await.unwrap();
    let (invoice, payments) = invoices
        .into_iter()
        .find(|(inv, _)| inv.id.to_string() == invoice_id)
        .unwrap();
    assert_eq!(invoice.amount_paid, Money::new(3_000));
    assert_eq!(invoice.amount_due, Money::new(97_000));
    assert_eq!(payments.len(), 2);
}

#[tokio::test]
async fn delete_payment_leaves_parent_balances_untouched() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(10_000)))
        .await
        .unwrap();
    let (invoice, payment) = engine
        .record_invoice_payment(
            &invoice.id.to_string(),
            NewPayment {
                amount: Some(Money::new(10_000)),
                payment_method: Some("cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(invoice.status, DocumentStatus::Paid);

    engine.delete_payment(&payment.id.to_string()).await.unwrap();

    let invoices = engine.list_invoices().await.unwrap();
    let (invoice, payments) = invoices.into_iter().next().unwrap();
    assert!(payments.is_empty());
    // Balances and status stay as posted: deleting a payment never
    // re-derives the parent.
    assert_eq!(invoice.amount_paid, Money::new(10_000));
    assert_eq!(invoice.amount_due, Money::ZERO);
    assert_eq!(invoice.status, DocumentStatus::Paid);
}

#[tokio::test]
async fn update_payment_patches_metadata_only() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(10_000)))
        .await
        .unwrap();
    let (_, payment) = engine
        .record_invoice_payment(
            &invoice.id.to_string(),
            NewPayment {
                amount: Some(Money::new(4_000)),
                payment_method: Some("cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = engine
        .update_payment(
            &payment.id.to_string(),
            PaymentPatch {
                payment_method: Some("card".to_string()),
                reference_number: Some("REF-1".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.payment_method, "card");
    assert_eq!(updated.reference_number.as_deref(), Some("REF-1"));
    assert_eq!(updated.amount, Money::new(4_000));

    let invoices = engine.list_invoices().await.unwrap();
    let (invoice, _) = invoices.into_iter().next().unwrap();
    assert_eq!(invoice.amount_paid, Money::new(4_000));
}

#[tokio::test]
async fn status_override_is_free_form() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(10_000)))
        .await
        .unwrap();

    let invoice = engine
        .override_invoice_status(&invoice.id.to_string(), DocumentStatus::Overdue)
        .await
        .unwrap();
    assert_eq!(invoice.status, DocumentStatus::Overdue);

    // The override ignores the balance-derived machine entirely.
    let invoice = engine
        .override_invoice_status(&invoice.id.to_string(), DocumentStatus::Paid)
        .await
        .unwrap();
    assert_eq!(invoice.status, DocumentStatus::Paid);
    assert_eq!(invoice.amount_paid, Money::ZERO);
}

#[tokio::test]
async fn financial_summary_matches_underlying_rows() {
    let (engine, _db) = engine_with_db().await;
    let facilitator = facilitator_id(&engine).await;

    let first = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(10_000)))
        .await
        .unwrap();
    engine
        .create_invoice(NewInvoice::new("B", due(2026, 9, 2), Money::new(4_000)))
        .await
        .unwrap();
    let po = engine
        .create_purchase_order(NewPurchaseOrder::new(&facilitator, due(2026, 9, 3), Money::new(6_000)))
        .await
        .unwrap();

    engine
        .record_invoice_payment(
            &first.id.to_string(),
            NewPayment {
                amount: Some(Money::new(10_000)),
                payment_method: Some("cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    engine
        .record_po_payment(
            &po.id.to_string(),
            NewPayment {
                amount: Some(Money::new(1_000)),
                payment_method: Some("cash".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let summary = engine.financial_summary().await.unwrap();
    assert_eq!(summary.invoice_count, 2);
    assert_eq!(summary.invoices_total, Money::new(14_000));
    assert_eq!(summary.invoices_paid, Money::new(10_000));
    assert_eq!(summary.invoices_due, Money::new(4_000));
    assert_eq!(summary.paid_invoices, 1);
    assert_eq!(summary.overdue_invoices, 0);
    assert_eq!(summary.purchase_order_count, 1);
    assert_eq!(summary.purchase_orders_total, Money::new(6_000));
    assert_eq!(summary.purchase_orders_paid, Money::new(1_000));
    assert_eq!(summary.purchase_orders_due, Money::new(5_000));
    assert_eq!(summary.paid_purchase_orders, 0);
    assert_eq!(summary.payment_count, 2);
    assert_eq!(summary.payments_total, Money::new(11_000));
}

#[tokio::test]
async fn payments_list_carries_parent_numbers() {
    let (engine, _db) = engine_with_db().await;

    let invoice = engine
        .create_invoice(NewInvoice::new("A", due(2026, 9, 1), Money::new(10_000)))
        .await
        .unwrap();
    engine
        .record_invoice_payment(
            &invoice.id.to_string(),
            NewPayment {
                amount: Some(Money::new(1_000)),
                payment_method: Some("cash".to_string()),
                payment_date: Some(Utc::now()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let payments = engine.list_payments().await.unwrap();
    assert_eq!(payments.len(), 1);
    let (payment, parent_number) = &payments[0];
    assert_eq!(payment.amount, Money::new(1_000));
    assert_eq!(parent_number.as_deref(), Some(invoice.invoice_number.as_str()));
}
