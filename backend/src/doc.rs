//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: request and response records with their length, range and
//!   enumeration constraints, plus the shared error envelope
//!
//! The generated document is served by Swagger UI when docs are enabled and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{
    ContactForm, Country, Error, ErrorCode, HairColor, Location, LoginForm, LoginOut, Person,
    PersonOut, UploadReport,
};
use crate::inbound::http::home::Greeting;
use crate::inbound::http::people::PersonDetail;
use crate::inbound::http::uploads::ImageUpload;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "People API",
        description = "Demonstration API for people records, forms, uploads and validation errors.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::home::home,
        crate::inbound::http::people::create_person,
        crate::inbound::http::people::person_detail,
        crate::inbound::http::people::show_person,
        crate::inbound::http::people::update_person,
        crate::inbound::http::login::login,
        crate::inbound::http::contact::contact,
        crate::inbound::http::uploads::post_image,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Greeting,
        Person,
        PersonOut,
        PersonDetail,
        HairColor,
        Location,
        Country,
        LoginForm,
        LoginOut,
        ContactForm,
        ImageUpload,
        UploadReport,
        Error,
        ErrorCode
    )),
    tags(
        (name = "home", description = "Greeting"),
        (name = "people", description = "Person records and lookups"),
        (name = "users", description = "Login form"),
        (name = "contact", description = "Contact form"),
        (name = "uploads", description = "File introspection"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying registered paths and schema structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::schema::Schema;
    use utoipa::openapi::RefOr;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    fn schema(name: &str) -> RefOr<Schema> {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        schemas
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("{name} schema registered"))
    }

    #[rstest]
    #[case("/", "get")]
    #[case("/person/new", "post")]
    #[case("/person/detail", "get")]
    #[case("/person/detail/{person_id}", "get")]
    #[case("/person/{person_id}", "put")]
    #[case("/login", "post")]
    #[case("/contact", "post")]
    #[case("/post-image", "post")]
    #[case("/health/ready", "get")]
    #[case("/health/live", "get")]
    fn every_operation_is_documented(#[case] path: &str, #[case] method: &str) {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get(path).expect("path registered");
        let operation = match method {
            "get" => item.get.as_ref(),
            "post" => item.post.as_ref(),
            "put" => item.put.as_ref(),
            _ => None,
        };
        assert!(operation.is_some(), "{path} documents {method}");
    }

    #[rstest]
    #[case(
        "Person",
        &["first_name", "last_name", "age", "hair_color", "is_married", "email", "password"]
    )]
    #[case("PersonOut", &["first_name", "last_name", "age", "email"])]
    #[case("Location", &["city", "state", "country"])]
    #[case("Error", &["code", "message"])]
    fn schemas_expose_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let schema = schema(name);
        for field in fields {
            assert_object_schema_has_field(&schema, field);
        }
    }

    #[rstest]
    fn person_out_has_no_password() {
        match schema("PersonOut") {
            RefOr::T(Schema::Object(obj)) => assert!(!obj.properties.contains_key("password")),
            _ => panic!("expected Object schema"),
        }
    }
}
