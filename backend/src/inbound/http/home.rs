//! Root greeting.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed greeting body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Greeting {
    #[schema(example = "David")]
    pub hello: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self {
            hello: "David".to_owned(),
        }
    }
}

/// Say hello.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use people_api::inbound::http::home::home;
///
/// let app = App::new().service(home);
/// ```
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Greeting", body = Greeting)),
    tags = ["home"],
    operation_id = "home"
)]
#[get("/")]
pub async fn home() -> web::Json<Greeting> {
    web::Json(Greeting::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::{Value, json};

    #[rstest]
    #[actix_web::test]
    async fn greets_david() {
        let app = test::init_service(App::new().service(home)).await;
        let res = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        assert!(res.status().is_success());
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body, json!({ "hello": "David" }));
    }
}
