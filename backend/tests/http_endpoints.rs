//! Behavioural tests driving the assembled application end to end.

use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use people_api::domain::TRACE_ID_HEADER;
use people_api::server::{AppDependencies, build_app};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

struct Reply {
    status: StatusCode,
    trace_id: Option<String>,
    body: Value,
}

async fn send(request: TestRequest) -> Reply {
    let app = test::init_service(build_app(AppDependencies::default())).await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let trace_id = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let bytes = test::read_body(response).await;
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        trace_id,
        body,
    }
}

#[fixture]
fn person() -> Value {
    json!({
        "first_name": "Grace",
        "last_name": "Hopper",
        "age": 85,
        "hair_color": "white",
        "is_married": true,
        "email": "grace@example.org",
        "password": "compiler-pioneer",
    })
}

#[rstest]
#[actix_web::test]
async fn every_fixture_id_is_right() {
    let app = test::init_service(build_app(AppDependencies::default())).await;
    for id in 1..=100_u32 {
        let response = test::call_service(
            &app,
            TestRequest::get()
                .uri(&format!("/person/detail/{id}"))
                .to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK, "id {id}");
        let body: Value = test::read_body_json(response).await;
        assert_eq!(body, json!({ id.to_string(): "Right" }));
    }
}

#[rstest]
#[case("101", StatusCode::NOT_FOUND)]
#[case("5000", StatusCode::NOT_FOUND)]
#[case("5000000000", StatusCode::NOT_FOUND)]
#[case("123456789012345678901234567890", StatusCode::NOT_FOUND)]
#[case("0", StatusCode::UNPROCESSABLE_ENTITY)]
#[case("-5", StatusCode::UNPROCESSABLE_ENTITY)]
#[actix_web::test]
async fn ids_outside_fixture_fail(#[case] raw: &str, #[case] expected: StatusCode) {
    let reply = send(TestRequest::get().uri(&format!("/person/detail/{raw}"))).await;
    assert_eq!(reply.status, expected);
    if expected == StatusCode::NOT_FOUND {
        assert_eq!(reply.body["message"], "This person doesn't exist");
    }
}

#[rstest]
#[actix_web::test]
async fn created_person_never_exposes_password(person: Value) {
    let reply = send(TestRequest::post().uri("/person/new").set_json(&person)).await;

    assert_eq!(reply.status, StatusCode::CREATED);
    assert!(reply.body.get("password").is_none());
    assert!(!reply.body.to_string().contains("compiler-pioneer"));
}

#[rstest]
#[case(1, StatusCode::OK)]
#[case(115, StatusCode::OK)]
#[case(0, StatusCode::UNPROCESSABLE_ENTITY)]
#[case(116, StatusCode::UNPROCESSABLE_ENTITY)]
#[actix_web::test]
async fn detail_age_is_bounded(#[case] age: i64, #[case] expected: StatusCode) {
    let reply = send(TestRequest::get().uri(&format!("/person/detail?age={age}"))).await;
    assert_eq!(reply.status, expected);
}

#[rstest]
#[case("colombia", StatusCode::OK)]
#[case("chile", StatusCode::OK)]
#[case("brazil", StatusCode::UNPROCESSABLE_ENTITY)]
#[case("Peru", StatusCode::UNPROCESSABLE_ENTITY)]
#[actix_web::test]
async fn country_is_an_enumeration(#[case] country: &str, #[case] expected: StatusCode) {
    let reply = send(
        TestRequest::put()
            .uri("/person/12")
            .set_json(json!({ "city": "Bogotá", "state": "Cundinamarca", "country": country })),
    )
    .await;
    assert_eq!(reply.status, expected);
}

#[rstest]
#[case(2048, 2.0)]
#[case(3 * 1024 * 1024, 3072.0)]
#[actix_web::test]
async fn upload_size_is_reported_in_kilobytes(#[case] len: usize, #[case] size_kb: f64) {
    let boundary = "integration-boundary";
    let mut payload = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"image\"; filename=\"blank.jpg\"\r\n\
         Content-Type: image/jpeg\r\n\r\n"
    )
    .into_bytes();
    payload.extend_from_slice(&vec![0_u8; len]);
    payload.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let reply = send(
        TestRequest::post()
            .uri("/post-image")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            ))
            .set_payload(payload),
    )
    .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["Size(kb)"], json!(size_kb));
    assert_eq!(reply.body["Format"], "image/jpeg");
}

#[rstest]
#[actix_web::test]
async fn greeting_and_forms_round_trip() {
    let greeting = send(TestRequest::get().uri("/")).await;
    assert_eq!(greeting.body, json!({ "hello": "David" }));

    let login = send(
        TestRequest::post()
            .uri("/login")
            .set_form([("username", "grace"), ("password", "compiler-pioneer")]),
    )
    .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["message"], "Login successful");

    let contact = send(
        TestRequest::post()
            .uri("/contact")
            .insert_header((header::USER_AGENT, "integration/1.0"))
            .set_form([
                ("first_name", "Grace"),
                ("last_name", "Hopper"),
                ("email", "grace@example.org"),
                ("message", "A ship in port is safe, but that is not what ships are for."),
            ]),
    )
    .await;
    assert_eq!(contact.status, StatusCode::OK);
    assert_eq!(contact.body, json!("integration/1.0"));
}

#[rstest]
#[actix_web::test]
async fn trace_id_is_echoed_on_success_and_failure() {
    let ok = send(TestRequest::get().uri("/")).await;
    let failed = send(TestRequest::get().uri("/person/detail/101")).await;

    assert!(ok.trace_id.is_some());
    let failed_id = failed.trace_id.expect("trace id on error response");
    assert_eq!(failed.body["traceId"], failed_id.as_str());
}

#[rstest]
#[actix_web::test]
async fn docs_are_mounted_only_when_enabled() {
    let without = send(TestRequest::get().uri("/api-docs/openapi.json")).await;
    assert_eq!(without.status, StatusCode::NOT_FOUND);

    let app = test::init_service(build_app(AppDependencies {
        docs_enabled: true,
        ..AppDependencies::default()
    }))
    .await;
    let response = test::call_service(
        &app,
        TestRequest::get().uri("/api-docs/openapi.json").to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let document: Value = test::read_body_json(response).await;
    assert!(document["paths"].get("/person/detail/{person_id}").is_some());
}

#[rstest]
#[actix_web::test]
async fn readiness_reflects_health_state() {
    let deps = AppDependencies::default();
    let health = deps.health_state.clone();
    let app = test::init_service(build_app(deps)).await;

    let before =
        test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(before.status(), StatusCode::SERVICE_UNAVAILABLE);

    health.mark_ready();
    let after =
        test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;
    assert_eq!(after.status(), StatusCode::OK);
}
