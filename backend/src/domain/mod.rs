//! Domain primitives and records.
//!
//! Purpose: define the typed, validated records the HTTP adapter accepts and
//! returns. Raw wire payloads convert into these types through `TryFrom`,
//! reporting every violated constraint at once.
//!
//! Public surface:
//! - Error / ErrorCode: error envelope returned to clients.
//! - Person / PersonOut / PersonQuery / PersonId: people records.
//! - Location / Country: location records.
//! - LoginCredentials / LoginOut: login form and acknowledgement.
//! - Contact: contact form submission.
//! - UploadReport: uploaded file summary.

pub mod contact;
pub mod error;
pub mod location;
pub mod login;
pub mod person;
pub mod ports;
pub mod upload;
pub mod validation;

pub use self::contact::{Contact, ContactForm};
pub use self::error::{Error, ErrorCode};
pub use self::location::{Country, Location, LocationPayload};
pub use self::login::{LoginCredentials, LoginForm, LoginOut};
pub use self::person::{
    HairColor, Person, PersonId, PersonOut, PersonPayload, PersonQuery, PersonQueryParams,
};
pub use self::upload::UploadReport;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use people_api::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<u32> {
///     Err(Error::not_found("missing"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
