//! People API handlers.
//!
//! ```text
//! POST /person/new {"first_name":"Ada","last_name":"Lovelace","age":36,...}
//! GET /person/detail?name=Ada&age=36
//! GET /person/detail/7
//! PUT /person/7 {"city":"Lima","state":"Lima","country":"peru"}
//! ```

use std::collections::BTreeMap;

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::validation::{Source, Violation, Violations};
use crate::domain::{
    Error, Location, LocationPayload, Person, PersonId, PersonOut, PersonPayload, PersonQuery,
    PersonQueryParams,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Message returned when a person identifier is unknown.
pub const PERSON_NOT_FOUND_MESSAGE: &str = "This person doesn't exist";

/// Value paired with a known identifier by [`show_person`].
pub const PERSON_FOUND_MARKER: &str = "Right";

/// Echo of the name and age a client looked up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PersonDetail {
    #[schema(example = "Ada")]
    pub name: Option<String>,
    #[schema(minimum = 1, maximum = 115, example = 36)]
    pub age: u8,
}

impl From<PersonQuery> for PersonDetail {
    fn from(value: PersonQuery) -> Self {
        Self {
            name: value.name().map(|name| name.as_ref().to_owned()),
            age: value.age().get(),
        }
    }
}

fn parse_person_id(raw: &str) -> Result<PersonId, Violations> {
    PersonId::parse(raw).map_err(|constraint| {
        Violations::from(Violation::new(Source::Path, "person_id", constraint))
    })
}

/// Create a person and return it without its password.
#[utoipa::path(
    post,
    path = "/person/new",
    request_body = Person,
    responses(
        (status = 201, description = "Person created", body = PersonOut),
        (status = 400, description = "Invalid request", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["people"],
    operation_id = "createPerson"
)]
#[post("/person/new")]
pub async fn create_person(payload: web::Json<PersonPayload>) -> ApiResult<HttpResponse> {
    let person = Person::try_from(payload.into_inner())?;
    debug!(age = person.age().get(), "person accepted");
    Ok(HttpResponse::Created().json(PersonOut::from(person)))
}

/// Echo a name and age read from the query string.
#[utoipa::path(
    get,
    path = "/person/detail",
    params(
        ("name" = Option<String>, Query, description = "Person's name, 1 to 50 characters"),
        ("age" = u8, Query, description = "Person's age, 1 to 115 inclusive")
    ),
    responses(
        (status = 200, description = "Lookup echoed", body = PersonDetail),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["people"],
    operation_id = "personDetail"
)]
#[get("/person/detail")]
pub async fn person_detail(
    params: web::Query<PersonQueryParams>,
) -> ApiResult<web::Json<PersonDetail>> {
    let query = PersonQuery::try_from(params.into_inner())?;
    Ok(web::Json(PersonDetail::from(query)))
}

/// Confirm that a person exists.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use people_api::inbound::http::people::show_person;
/// use people_api::inbound::http::state::HttpState;
///
/// let app = App::new()
///     .app_data(web::Data::new(HttpState::default()))
///     .service(show_person);
/// ```
#[utoipa::path(
    get,
    path = "/person/detail/{person_id}",
    params(("person_id" = u64, Path, description = "Person identifier, greater than 0")),
    responses(
        (status = 200, description = "Person exists", body = BTreeMap<String, String>),
        (status = 404, description = "Person not found", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["people"],
    operation_id = "showPerson"
)]
#[get("/person/detail/{person_id}")]
pub async fn show_person(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BTreeMap<String, String>>> {
    let id = parse_person_id(&path.into_inner())?;
    if !state.people.contains(id).await {
        return Err(Error::not_found(PERSON_NOT_FOUND_MESSAGE));
    }
    Ok(web::Json(BTreeMap::from([(
        id.to_string(),
        PERSON_FOUND_MARKER.to_owned(),
    )])))
}

/// Attach a location to a person and echo it back.
#[utoipa::path(
    put,
    path = "/person/{person_id}",
    params(("person_id" = u64, Path, description = "Person identifier, greater than 0")),
    request_body = Location,
    responses(
        (status = 200, description = "Location updated", body = Location),
        (status = 400, description = "Invalid request", body = Error),
        (status = 422, description = "Validation failed", body = Error)
    ),
    tags = ["people"],
    operation_id = "updatePerson"
)]
#[put("/person/{person_id}")]
pub async fn update_person(
    path: web::Path<String>,
    payload: web::Json<LocationPayload>,
) -> ApiResult<web::Json<Location>> {
    let id = parse_person_id(&path.into_inner());
    let location = Location::try_from(payload.into_inner());
    match (id, location) {
        (Ok(id), Ok(location)) => {
            debug!(person_id = id.get(), "location updated");
            Ok(web::Json(location))
        }
        (Err(mut violations), Err(body)) => {
            violations.merge(body);
            Err(Error::from(violations))
        }
        (Err(violations), Ok(_)) | (Ok(_), Err(violations)) => Err(Error::from(violations)),
    }
}
