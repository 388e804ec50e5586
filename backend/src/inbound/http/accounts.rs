//! Account API handlers.
//!
//! ```text
//! POST /api/signup {"username":"bob","password":"secret"}
//! POST /api/login  {"username":"bob","password":"secret"}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Credentials, Error, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::require_credentials;

/// Body for `POST /api/signup` and `POST /api/login`.
///
/// Both fields are optional at the wire level so absence is reported as a
/// validation failure rather than a deserialisation error.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CredentialsRequest {
    #[schema(example = "bob")]
    pub username: Option<String>,
    #[schema(example = "correct horse battery staple")]
    pub password: Option<String>,
}

/// Public view of an account.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct AccountResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    #[schema(example = "bob")]
    pub username: String,
}

impl From<&User> for AccountResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            username: user.username().to_string(),
        }
    }
}

/// Body returned by a successful login.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    #[schema(example = "Login successful")]
    pub message: String,
    pub user: AccountResponse,
}

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/signup",
    request_body = CredentialsRequest,
    responses(
        (status = 201, description = "Account created", body = AccountResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "signup"
)]
#[post("/signup")]
pub async fn signup(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<HttpResponse> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let credentials = require_credentials(username.as_deref(), password.as_deref())?;
    let user = state.signup.register(&credentials).await?;
    Ok(HttpResponse::Created().json(AccountResponse::from(&user)))
}

/// Authenticate with username and password.
///
/// Blank fields, unknown usernames and wrong passwords are indistinguishable
/// to the caller.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = CredentialsRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["accounts"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<CredentialsRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let CredentialsRequest { username, password } = payload.into_inner();
    let credentials = Credentials::try_from_parts(
        username.as_deref().unwrap_or_default(),
        password.as_deref().unwrap_or_default(),
    )
    .map_err(|_| Error::unauthorized("invalid credentials"))?;
    let user = state.login.authenticate(&credentials).await?;
    info!(user_id = %user.id(), "login succeeded");
    Ok(web::Json(LoginResponse {
        success: true,
        message: "Login successful".to_owned(),
        user: AccountResponse::from(&user),
    }))
}
