use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use chrono::Utc;
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::{
    ErrorBody, auth_session, bookings, campaigns, customers, events, facilitators, invoices,
    payments, permissions, public, purchase_orders, reports, sessions,
};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub db: DatabaseConnection,
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorBody::new("Unauthorized")),
    )
        .into_response()
}

fn forbidden() -> Response {
    (StatusCode::FORBIDDEN, Json(ErrorBody::new("Forbidden"))).into_response()
}

/// Resolves the bearer session token to a user, fresh on every request.
///
/// No caching across requests: a revoked session or demoted role takes
/// effect on the very next call.
async fn auth(
    State(state): State<ServerState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(TypedHeader(bearer)) = bearer else {
        return unauthorized();
    };

    let session = match auth_session::Entity::find_by_id(bearer.token().to_string())
        .one(&state.db)
        .await
    {
        Ok(Some(session)) => session,
        Ok(None) => return unauthorized(),
        Err(err) => {
            tracing::error!("session lookup failed: {err}");
            return unauthorized();
        }
    };

    if let Some(expires_at) = session.expires_at {
        if expires_at < Utc::now() {
            return unauthorized();
        }
    }

    let user = match state.engine.find_user(&session.user_id).await {
        Ok(user) => user,
        Err(_) => return unauthorized(),
    };

    request.extensions_mut().insert(user);
    next.run(request).await
}

/// Rejects non-admin callers. Runs after [`auth`] has resolved the user.
async fn require_admin(request: Request, next: Next) -> Response {
    let is_admin = request
        .extensions()
        .get::<engine::User>()
        .map(|user| user.role == engine::Role::Admin)
        .unwrap_or(false);
    if !is_admin {
        return forbidden();
    }
    next.run(request).await
}

pub(crate) fn router(state: ServerState) -> Router {
    let admin = Router::new()
        .route(
            "/bookings",
            get(bookings::list)
                .post(bookings::create)
                .put(bookings::update)
                .delete(bookings::remove),
        )
        .route(
            "/campaigns",
            get(campaigns::list)
                .post(campaigns::create)
                .put(campaigns::update)
                .delete(campaigns::remove),
        )
        .route(
            "/customers",
            get(customers::list)
                .post(customers::create)
                .put(customers::update)
                .delete(customers::remove),
        )
        .route(
            "/facilitators",
            get(facilitators::list)
                .post(facilitators::create)
                .put(facilitators::update)
                .delete(facilitators::remove),
        )
        .route(
            "/events",
            get(events::list)
                .post(events::create)
                .put(events::update)
                .delete(events::remove),
        )
        .route(
            "/sessions",
            get(sessions::list)
                .post(sessions::create)
                .put(sessions::update)
                .delete(sessions::remove),
        )
        .route(
            "/invoices",
            get(invoices::list)
                .post(invoices::create)
                .put(invoices::override_status)
                .delete(invoices::remove),
        )
        .route(
            "/purchase-orders",
            get(purchase_orders::list)
                .post(purchase_orders::create)
                .put(purchase_orders::override_status)
                .delete(purchase_orders::remove),
        )
        .route(
            "/payments",
            get(payments::list)
                .post(payments::create)
                .put(payments::update)
                .delete(payments::remove),
        )
        .route("/financial-reports", get(reports::financial_reports))
        .route("/metrics", get(reports::metrics))
        .route(
            "/permissions",
            get(permissions::list)
                .put(permissions::set_role)
                .delete(permissions::remove),
        )
        .route_layer(middleware::from_fn(require_admin));

    Router::new()
        .nest("/api/admin", admin)
        .route("/api/check-admin", get(permissions::check_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth))
        .route("/api/events", get(public::events))
        .route("/api/sessions", get(public::sessions))
        .with_state(state)
}

/// Builds the application router over an engine and database handle.
///
/// Exposed for in-process testing; the binary goes through
/// [`run_with_listener`].
pub fn app(engine: Engine, db: DatabaseConnection) -> Router {
    router(ServerState {
        engine: Arc::new(engine),
        db,
    })
}

pub async fn run(engine: Engine, db: DatabaseConnection) {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:3000").await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::error!("failed to bind server listener: {err}");
            return;
        }
    };
    if let Err(err) = run_with_listener(engine, db, listener).await {
        tracing::error!("server failed: {err}");
    }
}

pub async fn run_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        db,
    };

    axum::serve(listener, router(state)).await
}

pub fn spawn_with_listener(
    engine: Engine,
    db: DatabaseConnection,
    listener: tokio::net::TcpListener,
) -> Result<std::net::SocketAddr, std::io::Error> {
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(err) = run_with_listener(engine, db, listener).await {
            tracing::error!("server failed: {err}");
        }
    });

    Ok(addr)
}
