use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Statement};
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, NewCustomer, Role};
use migration::MigratorTrait;

const ADMIN_TOKEN: &str = "admin-token";
const USER_TOKEN: &str = "user-token";

async fn insert_session(db: &DatabaseConnection, token: &str, user_id: &str) {
    let backend = db.get_database_backend();
    db.execute(Statement::from_sql_and_values(
        backend,
        "INSERT INTO auth_sessions (token, user_id, created_at, expires_at) \
         VALUES (?, ?, ?, NULL)",
        vec![
            token.into(),
            user_id.into(),
            "2026-01-01 00:00:00".into(),
        ],
    ))
    .await
    .unwrap();
}

/// App with one admin ("admin-token") and one regular user ("user-token").
async fn setup() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();

    let seeder = Engine::builder().database(db.clone()).build().await.unwrap();
    let admin = seeder
        .create_customer(NewCustomer {
            name: Some("Admin".to_string()),
            email: Some("admin@ojasen.lk".to_string()),
            phone: None,
        })
        .await
        .unwrap();
    seeder
        .set_user_role(&admin.id.to_string(), Role::Admin)
        .await
        .unwrap();
    let member = seeder
        .create_customer(NewCustomer {
            name: Some("Member".to_string()),
            email: Some("member@ojasen.lk".to_string()),
            phone: None,
        })
        .await
        .unwrap();

    insert_session(&db, ADMIN_TOKEN, &admin.id.to_string()).await;
    insert_session(&db, USER_TOKEN, &member.id.to_string()).await;

    let engine = Engine::builder().database(db.clone()).build().await.unwrap();
    server::app(engine, db)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(payload) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn assert_invoice_number_shape(number: &str) {
    let parts: Vec<&str> = number.split('-').collect();
    assert_eq!(parts.len(), 3, "unexpected invoice number: {number}");
    assert_eq!(parts[0], "INV");
    assert_eq!(parts[1].len(), 8);
    assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
    assert_eq!(parts[2].len(), 3);
    assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
}

#[tokio::test]
async fn admin_routes_require_a_session() {
    let app = setup().await;

    let (status, body) = send(&app, "GET", "/api/admin/bookings", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Unauthorized"));
}

#[tokio::test]
async fn admin_routes_reject_non_admins() {
    let app = setup().await;

    for path in [
        "/api/admin/bookings",
        "/api/admin/customers",
        "/api/admin/financial-reports",
        "/api/admin/metrics",
        "/api/admin/permissions",
    ] {
        let (status, body) = send(&app, "GET", path, Some(USER_TOKEN), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{path}");
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("Forbidden"));
    }
}

#[tokio::test]
async fn unknown_tokens_are_unauthorized() {
    let app = setup().await;

    let (status, body) = send(&app, "GET", "/api/admin/bookings", Some("nope"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Unauthorized"));
}

#[tokio::test]
async fn check_admin_reports_the_callers_role() {
    let app = setup().await;

    let (status, body) = send(&app, "GET", "/api/check-admin", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["isAdmin"], json!(true));
    assert_eq!(body["userEmail"], json!("admin@ojasen.lk"));
    assert!(body["userId"].as_str().is_some());

    let (status, body) = send(&app, "GET", "/api/check-admin", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isAdmin"], json!(false));

    let (status, _) = send(&app, "GET", "/api/check-admin", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invoice_payment_flow_over_http() {
    let app = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/invoices",
        Some(ADMIN_TOKEN),
        Some(json!({
            "customer_name": "Amara Perera",
            "due_date": "2026-09-30",
            "total_minor": 10_000,
            "currency": "LKR",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    let invoice = &body["invoice"];
    assert_invoice_number_shape(invoice["invoice_number"].as_str().unwrap());
    assert_eq!(invoice["amount_paid_minor"], json!(0));
    assert_eq!(invoice["amount_due_minor"], json!(10_000));
    assert_eq!(invoice["status"], json!("draft"));
    let invoice_id = invoice["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/payments",
        Some(ADMIN_TOKEN),
        Some(json!({
            "invoice_id": invoice_id,
            "amount_minor": 4_000,
            "payment_method": "card",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["payment"]["amount_minor"], json!(4_000));

    let (_, body) = send(&app, "GET", "/api/admin/invoices", Some(ADMIN_TOKEN), None).await;
    let invoice = &body["invoices"][0];
    assert_eq!(invoice["amount_paid_minor"], json!(4_000));
    assert_eq!(invoice["amount_due_minor"], json!(6_000));
    assert_eq!(invoice["status"], json!("partial"));

    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/payments",
        Some(ADMIN_TOKEN),
        Some(json!({
            "invoice_id": invoice_id,
            "amount_minor": 6_000,
            "payment_method": "card",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/api/admin/invoices", Some(ADMIN_TOKEN), None).await;
    let invoice = &body["invoices"][0];
    assert_eq!(invoice["amount_paid_minor"], json!(10_000));
    assert_eq!(invoice["amount_due_minor"], json!(0));
    assert_eq!(invoice["status"], json!("paid"));
    assert_eq!(invoice["payments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn payment_requires_exactly_one_parent() {
    let app = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/payments",
        Some(ADMIN_TOKEN),
        Some(json!({"amount_minor": 100, "payment_method": "cash"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn payment_on_unknown_invoice_is_404() {
    let app = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/payments",
        Some(ADMIN_TOKEN),
        Some(json!({
            "invoice_id": "3f0a5a5e-0000-0000-0000-000000000000",
            "amount_minor": 100,
            "payment_method": "cash",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn campaign_validation_maps_to_400() {
    let app = setup().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/campaigns",
        Some(ADMIN_TOKEN),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("missing required fields"), "{error}");
    assert!(error.contains("name"), "{error}");
    assert!(error.contains("start_date"), "{error}");
}

#[tokio::test]
async fn duplicate_customer_email_maps_to_409() {
    let app = setup().await;

    let payload = json!({"name": "Amara", "email": "amara@example.com"});
    let (status, _) = send(
        &app,
        "POST",
        "/api/admin/customers",
        Some(ADMIN_TOKEN),
        Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/customers",
        Some(ADMIN_TOKEN),
        Some(payload),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn public_endpoints_skip_auth() {
    let app = setup().await;

    let (status, body) = send(&app, "GET", "/api/events", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(body["events"].as_array().unwrap().is_empty());

    let (status, body) = send(&app, "GET", "/api/sessions", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
}

#[tokio::test]
async fn role_changes_take_effect_on_the_next_request() {
    let app = setup().await;

    let (_, body) = send(&app, "GET", "/api/admin/permissions", Some(ADMIN_TOKEN), None).await;
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    let member_id = users
        .iter()
        .find(|user| user["email"] == json!("member@ojasen.lk"))
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let (status, _) = send(&app, "GET", "/api/admin/bookings", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(
        &app,
        "PUT",
        "/api/admin/permissions",
        Some(ADMIN_TOKEN),
        Some(json!({"id": member_id, "role": "admin"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], json!("admin"));

    // The guard re-reads the user on every request, so the promotion is
    // visible immediately.
    let (status, _) = send(&app, "GET", "/api/admin/bookings", Some(USER_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn metrics_reflect_recorded_documents() {
    let app = setup().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/invoices",
        Some(ADMIN_TOKEN),
        Some(json!({
            "customer_name": "Amara",
            "due_date": "2026-09-30",
            "total_minor": 8_000,
        })),
    )
    .await;
    let invoice_id = body["invoice"]["id"].as_str().unwrap().to_string();

    send(
        &app,
        "POST",
        "/api/admin/payments",
        Some(ADMIN_TOKEN),
        Some(json!({
            "invoice_id": invoice_id,
            "amount_minor": 8_000,
            "payment_method": "cash",
        })),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/admin/metrics", Some(ADMIN_TOKEN), None).await;
    assert_eq!(status, StatusCode::OK);
    let summary = &body["summary"];
    assert_eq!(summary["invoice_count"], json!(1));
    assert_eq!(summary["invoices_paid_minor"], json!(8_000));
    assert_eq!(summary["paid_invoices"], json!(1));
    assert_eq!(summary["payment_count"], json!(1));

    let (status, body) = send(
        &app,
        "GET",
        "/api/admin/financial-reports",
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["outstanding_invoices"], json!(0));
    assert_eq!(body["data"]["revenue_over_time"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn session_crud_with_event_filter() {
    let app = setup().await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/admin/events",
        Some(ADMIN_TOKEN),
        Some(json!({"title": "Sunrise Yoga", "default_price_minor": 5_000})),
    )
    .await;
    let event_id = body["event"]["id"].as_str().unwrap().to_string();

    let (status, body) = send(
        &app,
        "POST",
        "/api/admin/sessions",
        Some(ADMIN_TOKEN),
        Some(json!({
            "event_id": event_id,
            "date": "2099-08-20",
            "time": "06:30",
            "capacity": 12,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session"]["price_minor"], json!(5_000));

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/admin/sessions?eventId={event_id}"),
        Some(ADMIN_TOKEN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessions"].as_array().unwrap().len(), 1);

    // The new session is publicly visible as upcoming.
    let (_, body) = send(&app, "GET", "/api/sessions", None, None).await;
    assert_eq!(body["sessions"].as_array().unwrap().len(), 1);
}
