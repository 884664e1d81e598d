//! Contact form handler.

use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, post, web};
use tracing::{debug, info};

use crate::domain::{Contact, ContactForm, Error};
use crate::inbound::http::ApiResult;

/// Name of the advertising cookie read by [`contact`].
pub const ADS_COOKIE: &str = "ads";

/// Decode a header value, replacing bytes that are not valid UTF-8.
fn header_text(value: &HeaderValue) -> String {
    match value.to_str() {
        Ok(text) => text.to_owned(),
        Err(_) => {
            debug!(header = ?value, "header holds non-ASCII bytes; decoding lossily");
            String::from_utf8_lossy(value.as_bytes()).into_owned()
        }
    }
}

/// Accept a contact request and return the caller's `User-Agent`.
///
/// A `User-Agent` carrying non-ASCII bytes is returned decoded as UTF-8, with
/// invalid sequences replaced. The `ads` cookie is optional and only recorded
/// in logs.
#[utoipa::path(
    post,
    path = "/contact",
    request_body(content = ContactForm, content_type = "application/x-www-form-urlencoded"),
    params(
        ("User-Agent" = Option<String>, Header, description = "Client user agent"),
        ("ads" = Option<String>, Cookie, description = "Advertising cookie")
    ),
    responses(
        (status = 200, description = "User agent of the caller, or null", body = String),
        (status = 400, description = "Invalid request", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["contact"],
    operation_id = "contact"
)]
#[post("/contact")]
pub async fn contact(
    req: HttpRequest,
    form: web::Form<ContactForm>,
) -> ApiResult<web::Json<Option<String>>> {
    let contact = Contact::try_from(form.into_inner())?;
    let user_agent = req
        .headers()
        .get(header::USER_AGENT)
        .map(header_text);
    let ads = req.cookie(ADS_COOKIE).map(|cookie| cookie.value().to_owned());
    info!(
        email = contact.email().as_ref(),
        ads = ads.as_deref(),
        "contact request received"
    );
    Ok(web::Json(user_agent))
}
