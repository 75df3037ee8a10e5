//! User role management and the session probe endpoint.

use api_types::{
    Ack, DeleteRequest,
    user::{CheckAdminResponse, RoleUpdate, UserResponse, UsersResponse},
};
use axum::{Extension, Json, extract::State};

use crate::{ServerError, server::ServerState, views};

/// Lists all users with their roles.
pub async fn list(State(state): State<ServerState>) -> Result<Json<UsersResponse>, ServerError> {
    let users = state.engine.list_users().await?;
    Ok(Json(UsersResponse {
        success: true,
        users: users.into_iter().map(views::user_view).collect(),
    }))
}

/// Sets a user's role.
pub async fn set_role(
    State(state): State<ServerState>,
    Json(payload): Json<RoleUpdate>,
) -> Result<Json<UserResponse>, ServerError> {
    let user = state
        .engine
        .set_user_role(&payload.id, views::role_from_api(payload.role))
        .await?;
    Ok(Json(UserResponse {
        success: true,
        user: views::user_view(user),
    }))
}

/// Deletes a user; same booking guard as customer deletion.
pub async fn remove(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteRequest>,
) -> Result<Json<Ack>, ServerError> {
    state.engine.delete_customer(&payload.id).await?;
    Ok(Json(Ack { success: true }))
}

/// Reports whether the calling session belongs to an admin. Any
/// authenticated session may ask.
pub async fn check_admin(
    Extension(user): Extension<engine::User>,
) -> Result<Json<CheckAdminResponse>, ServerError> {
    Ok(Json(CheckAdminResponse {
        success: true,
        is_admin: user.role == engine::Role::Admin,
        user_id: user.id.to_string(),
        user_email: user.email,
    }))
}
