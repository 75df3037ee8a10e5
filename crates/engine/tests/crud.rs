use chrono::NaiveDate;
use sea_orm::{Database, DatabaseConnection};

use engine::{
    BookingPatch, BookingStatus, CampaignStatus, Engine, EngineError, EventPatch, EventStatus,
    Money, NewBooking, NewCampaign, NewCustomer, NewEvent, NewFacilitator, NewSession, Role,
    SessionPatch, SessionStatus,
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

async fn seed_session(engine: &Engine, title: &str, on: NaiveDate) -> (String, String) {
    let event = engine
        .create_event(NewEvent {
            title: Some(title.to_string()),
            default_price: Some(Money::new(5_000)),
            ..Default::default()
        })
        .await
        .unwrap();
    let session = engine
        .create_session(NewSession {
            event_id: Some(event.id.to_string()),
            date: Some(on),
            time: Some("06:30".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    (event.id.to_string(), session.id.to_string())
}

#[tokio::test]
async fn campaign_create_validates_required_fields() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.create_campaign(NewCampaign::default()).await.unwrap_err();
    match err {
        EngineError::Validation(msg) => {
            for field in ["name", "type", "start_date", "end_date"] {
                assert!(msg.contains(field), "{msg} missing {field}");
            }
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn campaign_create_applies_defaults() {
    let (engine, _db) = engine_with_db().await;

    let campaign = engine
        .create_campaign(NewCampaign {
            name: Some("New Year Retreat".to_string()),
            campaign_type: Some("seasonal".to_string()),
            start_date: Some(date(2026, 12, 1)),
            end_date: Some(date(2027, 1, 15)),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(campaign.status, CampaignStatus::Draft);
    assert_eq!(campaign.discount_per_mille, 0);
    assert_eq!(campaign.target_audience, "All Customers");
    assert_eq!(campaign.usage_count, 0);
    assert_eq!(campaign.revenue, Money::ZERO);
}

#[tokio::test]
async fn duplicate_customer_email_conflicts() {
    let (engine, _db) = engine_with_db().await;

    engine
        .create_customer(NewCustomer {
            name: Some("Amara".to_string()),
            email: Some("amara@example.com".to_string()),
            phone: None,
        })
        .await
        .unwrap();

    let err = engine
        .create_customer(NewCustomer {
            name: Some("Other Amara".to_string()),
            email: Some("amara@example.com".to_string()),
            phone: None,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));
}

#[tokio::test]
async fn customer_create_requires_name_and_email() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.create_customer(NewCustomer::default()).await.unwrap_err();
    match err {
        EngineError::Validation(msg) => {
            assert!(msg.contains("name"), "{msg}");
            assert!(msg.contains("email"), "{msg}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_customer_is_blocked_by_bookings() {
    let (engine, _db) = engine_with_db().await;
    let (_, session_id) = seed_session(&engine, "Sunrise Yoga", date(2026, 8, 20)).await;

    let customer = engine
        .create_customer(NewCustomer {
            name: Some("Amara".to_string()),
            email: Some("amara@example.com".to_string()),
            phone: None,
        })
        .await
        .unwrap();

    let booking = engine
        .create_booking(NewBooking {
            session_id: Some(session_id),
            customer_name: Some("Amara".to_string()),
            customer_email: Some("amara@example.com".to_string()),
            user_id: Some(customer.id.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let err = engine.delete_customer(&customer.id.to_string()).await.unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));

    engine.delete_booking(&booking.id.to_string()).await.unwrap();
    engine.delete_customer(&customer.id.to_string()).await.unwrap();
}

#[tokio::test]
async fn customer_totals_follow_bookings() {
    let (engine, _db) = engine_with_db().await;
    let (_, session_id) = seed_session(&engine, "Sunrise Yoga", date(2026, 8, 20)).await;

    let customer = engine
        .create_customer(NewCustomer {
            name: Some("Amara".to_string()),
            email: Some("amara@example.com".to_string()),
            phone: None,
        })
        .await
        .unwrap();

    for total in [4_000, 6_000] {
        engine
            .create_booking(NewBooking {
                session_id: Some(session_id.clone()),
                customer_name: Some("Amara".to_string()),
                customer_email: Some("amara@example.com".to_string()),
                user_id: Some(customer.id.to_string()),
                total_price: Some(Money::new(total)),
                ..Default::default()
            })
            .await
            .unwrap();
    }

    let customers = engine.list_customers().await.unwrap();
    let (_, totals) = customers
        .iter()
        .find(|(user, _)| user.id == customer.id)
        .unwrap();
    assert_eq!(totals.total_bookings, 2);
    assert_eq!(totals.total_spent, Money::new(10_000));
}

#[tokio::test]
async fn booking_snapshots_event_name_and_date_from_session() {
    let (engine, _db) = engine_with_db().await;
    let (_, session_id) = seed_session(&engine, "Sunrise Yoga", date(2026, 8, 20)).await;

    let booking = engine
        .create_booking(NewBooking {
            session_id: Some(session_id.clone()),
            customer_name: Some("Guest".to_string()),
            customer_email: Some("guest@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(booking.event_name, "Sunrise Yoga");
    assert_eq!(booking.event_date, date(2026, 8, 20));
    // Price falls back to the session's.
    assert_eq!(booking.total_price, Money::new(5_000));
    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.number_of_people, 1);

    // The snapshot is historical: moving the session does not rewrite it.
    engine
        .update_session(
            &session_id,
            SessionPatch {
                date: Some(date(2026, 9, 5)),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let bookings = engine.list_bookings().await.unwrap();
    assert_eq!(bookings[0].event_date, date(2026, 8, 20));
}

#[tokio::test]
async fn booking_create_names_missing_fields() {
    let (engine, _db) = engine_with_db().await;

    let err = engine.create_booking(NewBooking::default()).await.unwrap_err();
    match err {
        EngineError::Validation(msg) => {
            assert!(msg.contains("session_id"), "{msg}");
            assert!(msg.contains("customer_name"), "{msg}");
            assert!(msg.contains("customer_email"), "{msg}");
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn booking_update_is_a_partial_patch() {
    let (engine, _db) = engine_with_db().await;
    let (_, session_id) = seed_session(&engine, "Sunrise Yoga", date(2026, 8, 20)).await;

    let booking = engine
        .create_booking(NewBooking {
            session_id: Some(session_id),
            customer_name: Some("Guest".to_string()),
            customer_email: Some("guest@example.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = engine
        .update_booking(
            &booking.id.to_string(),
            BookingPatch {
                status: Some(BookingStatus::Confirmed),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.status, BookingStatus::Confirmed);
    assert_eq!(updated.customer_name, "Guest");
    assert_eq!(updated.event_name, booking.event_name);
}

#[tokio::test]
async fn session_listing_filters_by_event() {
    let (engine, _db) = engine_with_db().await;
    let (yoga_event, _) = seed_session(&engine, "Sunrise Yoga", date(2026, 8, 20)).await;
    seed_session(&engine, "Sound Bath", date(2026, 8, 25)).await;

    let all = engine.list_sessions(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let filtered = engine.list_sessions(Some(&yoga_event)).await.unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].event_id.to_string(), yoga_event);
}

#[tokio::test]
async fn upcoming_sessions_exclude_past_and_cancelled() {
    let (engine, _db) = engine_with_db().await;
    let today = date(2026, 8, 10);

    let (_, past) = seed_session(&engine, "Past", date(2026, 8, 1)).await;
    let (_, upcoming) = seed_session(&engine, "Upcoming", date(2026, 8, 20)).await;
    let (_, cancelled) = seed_session(&engine, "Cancelled", date(2026, 8, 22)).await;
    engine
        .update_session(
            &cancelled,
            SessionPatch {
                status: Some(SessionStatus::Cancelled),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let sessions = engine.list_upcoming_sessions(today).await.unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].id.to_string(), upcoming);
    assert!(sessions.iter().all(|s| s.id.to_string() != past));
}

#[tokio::test]
async fn public_events_exclude_inactive() {
    let (engine, _db) = engine_with_db().await;

    let visible = engine
        .create_event(NewEvent {
            title: Some("Sunrise Yoga".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let hidden = engine
        .create_event(NewEvent {
            title: Some("Retired".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    engine
        .update_event(
            &hidden.id.to_string(),
            EventPatch {
                status: Some(EventStatus::Inactive),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let events = engine.list_active_events().await.unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].id, visible.id);
}

#[tokio::test]
async fn role_changes_apply() {
    let (engine, _db) = engine_with_db().await;

    let customer = engine
        .create_customer(NewCustomer {
            name: Some("Amara".to_string()),
            email: Some("amara@example.com".to_string()),
            phone: None,
        })
        .await
        .unwrap();
    assert_eq!(customer.role, Role::User);

    let promoted = engine
        .set_user_role(&customer.id.to_string(), Role::Admin)
        .await
        .unwrap();
    assert_eq!(promoted.role, Role::Admin);

    let users = engine.list_users().await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].role, Role::Admin);
}

#[tokio::test]
async fn facilitator_create_requires_name() {
    let (engine, _db) = engine_with_db().await;

    let err = engine
        .create_facilitator(NewFacilitator::default())
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::Validation(_)));
}

#[tokio::test]
async fn deleting_missing_records_is_not_found() {
    let (engine, _db) = engine_with_db().await;

    let id = uuid::Uuid::new_v4().to_string();
    assert!(matches!(
        engine.delete_booking(&id).await.unwrap_err(),
        EngineError::KeyNotFound(_)
    ));
    assert!(matches!(
        engine.delete_campaign(&id).await.unwrap_err(),
        EngineError::KeyNotFound(_)
    ));
    assert!(matches!(
        engine.delete_facilitator(&id).await.unwrap_err(),
        EngineError::KeyNotFound(_)
    ));
}
