// src/web/handlers/system_handlers.rs
use crate::auth::{AuthenticatedUser, OptionalAuth};
use crate::web::types::{DataResponse, StandardErrorResponse, TextResponse, UserInfo};
use rocket::serde::json::Json;
use tracing::info;

pub async fn get_current_user_handler(auth: AuthenticatedUser) -> Json<DataResponse<UserInfo>> {
    Json(DataResponse::success(
        "User authenticated successfully".to_string(),
        UserInfo {
            uid: auth.claims.sub.clone(),
            email: auth.email().to_string(),
            role: auth.role().to_string(),
        },
        None,
    ))
}

pub async fn get_current_user_error_handler() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Authentication required".to_string(),
        "AUTHORIZATION_ERROR".to_string(),
        vec!["Login is required".to_string()],
        None,
    ))
}

pub async fn health_handler(auth: OptionalAuth) -> Json<TextResponse> {
    if let Some(user) = auth.user {
        info!("Health check by authenticated user: {}", user.email());
    } else {
        info!("Health check by anonymous user");
    }
    Json(TextResponse::success("OK".to_string(), None))
}
