use chrono::{NaiveDate, TimeZone, Utc};
use sea_orm::{Database, DatabaseConnection};

use engine::{
    DocumentStatus, Engine, Money, NewBooking, NewEvent, NewInvoice, NewSession,
};
use migration::MigratorTrait;

async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    (engine, db)
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// One session is enough: bookings carry their own event name/date snapshot.
async fn seed_session(engine: &Engine) -> String {
    let event = engine
        .create_event(NewEvent {
            title: Some("Sunrise Yoga".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let session = engine
        .create_session(NewSession {
            event_id: Some(event.id.to_string()),
            date: Some(date(2026, 8, 20)),
            time: Some("06:30".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    session.id.to_string()
}

async fn book(
    engine: &Engine,
    session_id: &str,
    event_name: &str,
    event_date: NaiveDate,
    total: i64,
    facilitator_fee: i64,
) {
    engine
        .create_booking(NewBooking {
            session_id: Some(session_id.to_string()),
            customer_name: Some("Guest".to_string()),
            customer_email: Some("guest@example.com".to_string()),
            event_name: Some(event_name.to_string()),
            event_date: Some(event_date),
            total_price: Some(Money::new(total)),
            ojasen_fee: Some(Money::new(total - facilitator_fee)),
            facilitator_fee: Some(Money::new(facilitator_fee)),
            ..Default::default()
        })
        .await
        .unwrap();
}

#[tokio::test]
async fn totals_and_gross_profit() {
    let (engine, _db) = engine_with_db().await;
    let session = seed_session(&engine).await;

    book(&engine, &session, "Sunrise Yoga", date(2026, 8, 20), 10_000, 4_000).await;
    book(&engine, &session, "Sound Bath", date(2026, 8, 21), 6_000, 1_500).await;

    let data = engine.financial_report(Utc::now()).await.unwrap();
    assert_eq!(data.revenue, Money::new(16_000));
    assert_eq!(data.facilitator_costs, Money::new(5_500));
    assert_eq!(data.gross_profit, Money::new(10_500));
}

#[tokio::test]
async fn season_buckets_use_northern_hemisphere_months() {
    let (engine, _db) = engine_with_db().await;
    let session = seed_session(&engine).await;

    // February 2025 is month index 1: Winter.
    book(&engine, &session, "Sunrise Yoga", date(2025, 2, 10), 5_000, 1_000).await;
    // July 2025 is month index 6: Summer.
    book(&engine, &session, "Sunrise Yoga", date(2025, 7, 10), 7_000, 2_000).await;
    book(&engine, &session, "Sound Bath", date(2025, 7, 12), 1_000, 0).await;

    let data = engine.financial_report(Utc::now()).await.unwrap();

    let winter = &data.season_breakdown["2025-Winter"];
    assert_eq!(winter.total_revenue, Money::new(5_000));
    assert_eq!(winter.facilitator_costs, Money::new(1_000));
    assert_eq!(winter.booking_count, 1);

    let summer = &data.season_breakdown["2025-Summer"];
    assert_eq!(summer.total_revenue, Money::new(8_000));
    assert_eq!(summer.facilitator_costs, Money::new(2_000));
    assert_eq!(summer.booking_count, 2);
}

#[tokio::test]
async fn revenue_over_time_is_a_fixed_six_month_series() {
    let (engine, _db) = engine_with_db().await;
    let session = seed_session(&engine).await;

    book(&engine, &session, "Sunrise Yoga", date(2026, 8, 5), 9_000, 3_000).await;
    book(&engine, &session, "Sunrise Yoga", date(2026, 7, 5), 4_000, 1_000).await;
    // Outside the window: seven months before the anchor.
    book(&engine, &session, "Sunrise Yoga", date(2026, 1, 5), 50_000, 0).await;

    let now = Utc.with_ymd_and_hms(2026, 8, 15, 12, 0, 0).unwrap();
    let data = engine.financial_report(now).await.unwrap();

    let months: Vec<&str> = data
        .revenue_over_time
        .iter()
        .map(|point| point.month.as_str())
        .collect();
    assert_eq!(months, vec!["Mar", "Apr", "May", "Jun", "Jul", "Aug"]);

    assert_eq!(data.revenue_over_time[4].revenue, Money::new(4_000));
    assert_eq!(data.revenue_over_time[4].profit, Money::new(3_000));
    assert_eq!(data.revenue_over_time[5].revenue, Money::new(9_000));
    assert_eq!(data.revenue_over_time[5].profit, Money::new(6_000));
    for point in &data.revenue_over_time[..4] {
        assert_eq!(point.revenue, Money::ZERO);
    }
}

#[tokio::test]
async fn series_crosses_year_boundaries() {
    let (engine, _db) = engine_with_db().await;
    let session = seed_session(&engine).await;

    book(&engine, &session, "Sunrise Yoga", date(2025, 11, 20), 2_000, 500).await;

    let now = Utc.with_ymd_and_hms(2026, 2, 10, 9, 0, 0).unwrap();
    let data = engine.financial_report(now).await.unwrap();

    let months: Vec<&str> = data
        .revenue_over_time
        .iter()
        .map(|point| point.month.as_str())
        .collect();
    assert_eq!(months, vec!["Sep", "Oct", "Nov", "Dec", "Jan", "Feb"]);
    assert_eq!(data.revenue_over_time[2].revenue, Money::new(2_000));
}

#[tokio::test]
async fn top_services_sorts_descending_and_truncates_to_five() {
    let (engine, _db) = engine_with_db().await;
    let session = seed_session(&engine).await;

    for (index, name) in [
        "Yoga", "Sound Bath", "Meditation", "Reiki", "Breathwork", "Ayurveda", "Massage",
    ]
    .iter()
    .enumerate()
    {
        book(
            &engine,
            &session,
            name,
            date(2026, 8, 1),
            1_000 * (index as i64 + 1),
            0,
        )
        .await;
    }
    // Second booking for the same display name accumulates in one bucket.
    book(&engine, &session, "Yoga", date(2026, 8, 2), 10_000, 0).await;

    let data = engine.financial_report(Utc::now()).await.unwrap();
    assert_eq!(data.top_services.len(), 5);
    assert_eq!(data.top_services[0].name, "Yoga");
    assert_eq!(data.top_services[0].revenue, Money::new(11_000));
    assert_eq!(data.top_services[0].bookings, 2);
    for pair in data.top_services.windows(2) {
        assert!(pair[0].revenue >= pair[1].revenue);
    }
}

#[tokio::test]
async fn outstanding_invoices_excludes_paid_and_cancelled() {
    let (engine, _db) = engine_with_db().await;

    let first = engine
        .create_invoice(NewInvoice::new("A", date(2026, 9, 1), Money::new(1_000)))
        .await
        .unwrap();
    let second = engine
        .create_invoice(NewInvoice::new("B", date(2026, 9, 2), Money::new(1_000)))
        .await
        .unwrap();
    engine
        .create_invoice(NewInvoice::new("C", date(2026, 9, 3), Money::new(1_000)))
        .await
        .unwrap();

    engine
        .override_invoice_status(&first.id.to_string(), DocumentStatus::Paid)
        .await
        .unwrap();
    engine
        .override_invoice_status(&second.id.to_string(), DocumentStatus::Cancelled)
        .await
        .unwrap();

    let data = engine.financial_report(Utc::now()).await.unwrap();
    assert_eq!(data.outstanding_invoices, 1);
}

#[tokio::test]
async fn empty_store_yields_zeroed_report() {
    let (engine, _db) = engine_with_db().await;

    let data = engine.financial_report(Utc::now()).await.unwrap();
    assert_eq!(data.revenue, Money::ZERO);
    assert_eq!(data.gross_profit, Money::ZERO);
    assert_eq!(data.outstanding_invoices, 0);
    assert!(data.season_breakdown.is_empty());
    assert_eq!(data.revenue_over_time.len(), 6);
    assert!(data.top_services.is_empty());
}
