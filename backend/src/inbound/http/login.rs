//! Login form handler.
//!
//! ```text
//! POST /login username=ada&password=difference-engine
//! ```

use actix_web::{post, web};
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginForm, LoginOut};
use crate::inbound::http::ApiResult;

/// Accept a login form and acknowledge the username.
///
/// No credential store is consulted; any well-formed form is accepted.
#[utoipa::path(
    post,
    path = "/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Login acknowledged", body = LoginOut),
        (status = 400, description = "Invalid request", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/login")]
pub async fn login(form: web::Form<LoginForm>) -> ApiResult<web::Json<LoginOut>> {
    let credentials = LoginCredentials::try_from(form.into_inner())?;
    info!(username = credentials.username().as_ref(), "login accepted");
    Ok(web::Json(LoginOut::from(&credentials)))
}
