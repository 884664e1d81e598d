//! Extractor configuration.
//!
//! Actix rejects payloads it cannot deserialise before a handler runs. These
//! configs route those rejections through the domain error envelope so that
//! malformed input is reported like any other validation failure: `422` for
//! values of the wrong shape, `413` for bodies over their size limit, `400`
//! when the request cannot be read at all.

use actix_multipart::MultipartError;
use actix_multipart::form::MultipartFormConfig;
use actix_web::error::{JsonPayloadError, PayloadError, QueryPayloadError, UrlencodedError};
use actix_web::{HttpRequest, web};

use crate::domain::Error;
use crate::domain::upload::MAX_UPLOAD_BYTES;
use crate::domain::validation::{Constraint, Source, Violation, Violations};

fn malformed(source: Source, field: &str, reason: impl ToString) -> Error {
    Error::from(Violations::from(Violation::new(
        source,
        field,
        Constraint::InvalidType {
            reason: reason.to_string(),
        },
    )))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        JsonPayloadError::Deserialize(inner) => malformed(Source::Body, "body", inner),
        err @ JsonPayloadError::Overflow { .. } => Error::payload_too_large(err.to_string()),
        err @ JsonPayloadError::OverflowKnownLength { .. } => {
            Error::payload_too_large(err.to_string())
        }
        other => Error::invalid_request(other.to_string()),
    }
    .into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        QueryPayloadError::Deserialize(inner) => malformed(Source::Query, "query", inner),
        other => Error::invalid_request(other.to_string()),
    }
    .into()
}

fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        UrlencodedError::Parse(inner) => malformed(Source::Form, "form", inner),
        err @ UrlencodedError::Overflow { .. } => Error::payload_too_large(err.to_string()),
        other => Error::invalid_request(other.to_string()),
    }
    .into()
}

fn multipart_error(err: MultipartError, _req: &HttpRequest) -> actix_web::Error {
    match err {
        MultipartError::MissingField(field) => {
            Error::from(Violations::from(Violation::new(Source::File, field, Constraint::Missing)))
        }
        MultipartError::Payload(PayloadError::Overflow) => Error::payload_too_large(format!(
            "multipart payload exceeds {MAX_UPLOAD_BYTES} bytes"
        )),
        other => Error::invalid_request(other.to_string()),
    }
    .into()
}

/// Register extractor configs on an app or scope.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use people_api::inbound::http::extract;
///
/// let app = App::new().configure(extract::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error))
        .app_data(web::QueryConfig::default().error_handler(query_error))
        .app_data(web::FormConfig::default().error_handler(form_error))
        .app_data(
            MultipartFormConfig::default()
                .total_limit(MAX_UPLOAD_BYTES)
                .memory_limit(MAX_UPLOAD_BYTES)
                .error_handler(multipart_error),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test};
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::Value;

    #[derive(Deserialize)]
    struct Numbers {
        #[expect(dead_code, reason = "only deserialisation is exercised")]
        n: Option<i64>,
    }

    async fn echo_json(_: web::Json<Numbers>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn echo_query(_: web::Query<Numbers>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn echo_form(_: web::Form<Numbers>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn call(req: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(
            App::new()
                .configure(configure)
                .route("/json", web::post().to(echo_json))
                .route("/query", web::get().to(echo_query))
                .route("/form", web::post().to(echo_form)),
        )
        .await;
        let res = test::call_service(&app, req.to_request()).await;
        let status = res.status();
        let body = test::read_body(res).await;
        (status, serde_json::from_slice(&body).unwrap_or(Value::Null))
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_json_types_are_validation_failures() {
        let (status, body) = call(
            test::TestRequest::post()
                .uri("/json")
                .insert_header(("content-type", "application/json"))
                .set_payload(r#"{"n":"abc"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], "validation_failed");
        assert_eq!(body["details"]["violations"][0]["location"], "body");
        assert_eq!(body["details"]["violations"][0]["code"], "invalid_type");
    }

    #[rstest]
    #[actix_web::test]
    async fn wrong_content_type_is_a_bad_request() {
        let (status, body) = call(
            test::TestRequest::post()
                .uri("/json")
                .insert_header(("content-type", "text/plain"))
                .set_payload("n=1"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "invalid_request");
    }

    #[rstest]
    #[actix_web::test]
    async fn unparseable_query_is_a_validation_failure() {
        let (status, body) = call(test::TestRequest::get().uri("/query?n=abc")).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"]["violations"][0]["location"], "query");
    }

    #[rstest]
    #[actix_web::test]
    async fn unparseable_form_is_a_validation_failure() {
        let (status, body) = call(
            test::TestRequest::post()
                .uri("/form")
                .insert_header(("content-type", "application/x-www-form-urlencoded"))
                .set_payload("n=abc"),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["details"]["violations"][0]["location"], "form");
        assert_eq!(body["details"]["violations"][0]["code"], "invalid_type");
    }

    #[rstest]
    #[actix_web::test]
    async fn oversized_json_is_payload_too_large() {
        let padding = "x".repeat(3 * 1024 * 1024);
        let (status, body) = call(
            test::TestRequest::post()
                .uri("/json")
                .insert_header(("content-type", "application/json"))
                .set_payload(format!(r#"{{"pad":"{padding}"}}"#)),
        )
        .await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body["code"], "payload_too_large");
    }
}
