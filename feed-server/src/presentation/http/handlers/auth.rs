use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::auth_service::AuthResult;
use crate::domain::user::{LoginRequest, SignupRequest};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorBody};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct SignupDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct LoginDto {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) email: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub(crate) password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthResponseDto {
    pub(crate) message: String,
    pub(crate) token: String,
    pub(crate) user: AuthUserDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct AuthUserDto {
    pub(crate) id: i64,
    pub(crate) username: String,
}

impl AuthResponseDto {
    fn new(message: &str, result: AuthResult) -> Self {
        Self {
            message: message.to_string(),
            token: result.access_token,
            user: AuthUserDto {
                id: result.user.id,
                username: result.user.username,
            },
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupDto,
    responses(
        (status = 201, description = "Signed up", body = AuthResponseDto),
        (status = 400, description = "Missing field or email already registered", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn signup(
    State(state): State<AppState>,
    Json(dto): Json<SignupDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = SignupRequest {
        username: dto.username,
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.signup(req).await?;

    Ok((
        StatusCode::CREATED,
        Json(AuthResponseDto::new("Signup successful", result)),
    ))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in", body = AuthResponseDto),
        (status = 400, description = "Missing field or invalid credentials", body = ErrorBody),
        (status = 500, description = "Internal error", body = ErrorBody)
    )
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> AppResult<(StatusCode, Json<AuthResponseDto>)> {
    dto.validate()?;

    let req = LoginRequest {
        email: dto.email,
        password: dto.password,
    };

    let result = state.auth_service.login(req).await?;

    Ok((
        StatusCode::OK,
        Json(AuthResponseDto::new("Login successful", result)),
    ))
}
