//! Authentication Handlers
//!
//! Signup creates the account (and its role-specific record) and returns a
//! token immediately; no separate login round-trip is needed.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use shared::client::{
    AccountSummary, AdminSignupRequest, AuthResponse, LoginRequest, RestaurantSignupRequest,
    RiderSignupRequest,
};
use shared::types::Role;

use crate::AppError;
use crate::core::ServerState;
use crate::db::models::Account;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};

fn summary(account: &Account) -> AccountSummary {
    AccountSummary {
        id: account.id_string(),
        name: account.name.clone(),
        email: account.email.clone(),
        role: account.role,
    }
}

fn auth_response(
    state: &ServerState,
    account: &Account,
    message: &str,
) -> Result<AuthResponse, AppError> {
    let token = state
        .get_jwt_service()
        .generate_token(&account.id_string(), &account.name, &account.email, account.role)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    Ok(AuthResponse {
        message: message.to_string(),
        token,
        user: summary(account),
    })
}

/// POST /api/auth/restaurant-signup
///
/// Creates the manager account and its restaurant in one step. The
/// restaurant name doubles as the account display name.
pub async fn restaurant_signup(
    State(state): State<ServerState>,
    payload: Result<Json<RestaurantSignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(req) = payload?;
    validate_required_text(&req.restaurant_name, "restaurantName", MAX_NAME_LEN)?;
    validate_required_text(&req.signature_dish, "signatureDish", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let account = state
        .accounts
        .create(&req.restaurant_name, &req.email, &req.password, Role::Manager)
        .await?;
    let manager = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("account missing id"))?;
    state
        .restaurants
        .create(&req.restaurant_name, &req.signature_dish, manager)
        .await?;

    tracing::info!(email = %account.email, "restaurant registered");
    let body = auth_response(&state, &account, "Restaurant registered successfully")?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/auth/rider-signup
///
/// Creates the rider account plus its profile (available, no order).
pub async fn rider_signup(
    State(state): State<ServerState>,
    payload: Result<Json<RiderSignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(req) = payload?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let account = state
        .accounts
        .create(&req.name, &req.email, &req.password, Role::Rider)
        .await?;
    let account_id = account
        .id
        .clone()
        .ok_or_else(|| AppError::internal("account missing id"))?;
    state.riders.create(account_id, &req.name).await?;

    tracing::info!(email = %account.email, "rider registered");
    let body = auth_response(&state, &account, "Rider registered successfully")?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/auth/admin-signup
pub async fn admin_signup(
    State(state): State<ServerState>,
    payload: Result<Json<AdminSignupRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let Json(req) = payload?;
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let account = state
        .accounts
        .create(&req.name, &req.email, &req.password, Role::Admin)
        .await?;

    tracing::info!(email = %account.email, "admin registered");
    let body = auth_response(&state, &account, "Admin registered successfully")?;
    Ok((StatusCode::CREATED, Json(body)))
}

/// POST /api/auth/login
///
/// 统一错误消息，避免邮箱枚举：账号不存在与密码错误同样返回
/// "Invalid credentials"。
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AppError> {
    let Json(req) = payload?;
    let account = state
        .accounts
        .find_by_email(&req.email)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = account
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
    if !password_valid {
        tracing::warn!(email = %req.email, "login failed");
        return Err(AppError::invalid_credentials());
    }

    let body = auth_response(&state, &account, "Login successful")?;
    Ok(Json(body))
}
