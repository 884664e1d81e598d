//! Person records accepted and returned by the people endpoints.
//!
//! [`Person`] is the validated input. It deliberately has no `Serialize`
//! implementation: responses go through [`PersonOut`], which has no password
//! field at all.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{Constraint, LengthBounds, Source, Validator, Violations, check_range};

/// Length bounds for first and last names.
pub const NAME_LENGTH: LengthBounds = LengthBounds::between(1, 50);
/// Youngest accepted age.
pub const AGE_MIN: i64 = 1;
/// Oldest accepted age.
pub const AGE_MAX: i64 = 115;
/// Length bounds for passwords.
pub const PASSWORD_LENGTH: LengthBounds = LengthBounds::at_least(8);

/// A first or last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PersonName(String);

impl PersonName {
    /// Validate a name against [`NAME_LENGTH`].
    pub fn new(raw: impl Into<String>) -> Result<Self, Constraint> {
        let raw = raw.into();
        NAME_LENGTH.check(&raw)?;
        Ok(Self(raw))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Age in whole years, between [`AGE_MIN`] and [`AGE_MAX`] inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Age(u8);

impl Age {
    /// Validate an age.
    ///
    /// # Examples
    /// ```
    /// use people_api::domain::person::Age;
    ///
    /// assert!(Age::new(1).is_ok());
    /// assert!(Age::new(115).is_ok());
    /// assert!(Age::new(0).is_err());
    /// assert!(Age::new(116).is_err());
    /// ```
    pub fn new(raw: i64) -> Result<Self, Constraint> {
        check_range(raw, AGE_MIN, AGE_MAX)?;
        u8::try_from(raw)
            .map(Self)
            .map_err(|err| Constraint::InvalidType {
                reason: err.to_string(),
            })
    }

    /// Age as an integer.
    pub fn get(self) -> u8 {
        self.0
    }
}

/// Email address.
///
/// Only the overall shape is checked: a local part, one `@`, and a domain
/// containing a dot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Email(String);

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

impl Email {
    /// Validate an email address.
    pub fn new(raw: impl Into<String>) -> Result<Self, Constraint> {
        let raw = raw.into();
        if !email_regex().is_match(&raw) {
            return Err(Constraint::InvalidEmail);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Write-only secret.
///
/// Never serialised and redacted from `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validate a password against [`PASSWORD_LENGTH`].
    pub fn new(raw: impl Into<String>) -> Result<Self, Constraint> {
        let raw = raw.into();
        PASSWORD_LENGTH.check(&raw)?;
        Ok(Self(raw))
    }

    /// Borrow the secret.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(**redacted**)")
    }
}

/// Hair colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HairColor {
    White,
    Brown,
    Black,
    Blonde,
    Red,
}

impl HairColor {
    /// Accepted wire literals.
    pub const LITERALS: &'static [&'static str] = &["white", "brown", "black", "blonde", "red"];

    /// Parse a wire literal.
    pub fn parse(raw: &str) -> Result<Self, Constraint> {
        match raw {
            "white" => Ok(Self::White),
            "brown" => Ok(Self::Brown),
            "black" => Ok(Self::Black),
            "blonde" => Ok(Self::Blonde),
            "red" => Ok(Self::Red),
            _ => Err(Constraint::NotInEnum {
                allowed: Self::LITERALS,
            }),
        }
    }
}

/// A validated person.
///
/// ## Invariants
/// - Names are 1 to 50 characters.
/// - `age` is within 1..=115.
/// - `password` is at least 8 characters and never leaves the process.
#[derive(Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Person {
    #[schema(value_type = String, min_length = 1, max_length = 50, example = "Ada")]
    first_name: PersonName,
    #[schema(value_type = String, min_length = 1, max_length = 50, example = "Lovelace")]
    last_name: PersonName,
    #[schema(value_type = u8, minimum = 1, maximum = 115, example = 36)]
    age: Age,
    hair_color: Option<HairColor>,
    is_married: Option<bool>,
    #[schema(value_type = String, example = "ada@example.com")]
    email: Email,
    #[schema(value_type = String, min_length = 8, format = Password, write_only)]
    password: Password,
}

impl Person {
    /// First name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Last name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Age in years.
    pub fn age(&self) -> Age {
        self.age
    }

    /// Hair colour, when given.
    pub fn hair_color(&self) -> Option<HairColor> {
        self.hair_color
    }

    /// Marital status, when given.
    pub fn is_married(&self) -> Option<bool> {
        self.is_married
    }

    /// Email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password supplied at creation.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Raw person body as received over the wire.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub hair_color: Option<String>,
    pub is_married: Option<bool>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl TryFrom<PersonPayload> for Person {
    type Error = Violations;

    fn try_from(value: PersonPayload) -> Result<Self, Self::Error> {
        let mut v = Validator::new(Source::Body);
        let first_name = v.required("first_name", value.first_name, PersonName::new);
        let last_name = v.required("last_name", value.last_name, PersonName::new);
        let age = v.required("age", value.age, Age::new);
        let hair_color = v.optional("hair_color", value.hair_color, |raw| HairColor::parse(&raw));
        let email = v.required("email", value.email, Email::new);
        let password = v.required("password", value.password, Password::new);

        v.finish(|| {
            Some(Person {
                first_name: first_name?,
                last_name: last_name?,
                age: age?,
                hair_color,
                is_married: value.is_married,
                email: email?,
                password: password?,
            })
        })
    }
}

/// Output-safe projection of a [`Person`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PersonOut {
    #[schema(value_type = String, example = "Ada")]
    first_name: PersonName,
    #[schema(value_type = String, example = "Lovelace")]
    last_name: PersonName,
    #[schema(value_type = u8, example = 36)]
    age: Age,
    hair_color: Option<HairColor>,
    is_married: Option<bool>,
    #[schema(value_type = String, example = "ada@example.com")]
    email: Email,
}

impl From<Person> for PersonOut {
    fn from(value: Person) -> Self {
        let Person {
            first_name,
            last_name,
            age,
            hair_color,
            is_married,
            email,
            password: _,
        } = value;
        Self {
            first_name,
            last_name,
            age,
            hair_color,
            is_married,
            email,
        }
    }
}

/// Strictly positive person identifier.
///
/// Integers beyond `u64::MAX` saturate; no directory holds them, so they
/// resolve as unknown people rather than malformed paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PersonId(u64);

impl PersonId {
    /// Validate an identifier read from a path segment.
    ///
    /// # Examples
    /// ```
    /// use people_api::domain::person::PersonId;
    /// use people_api::domain::validation::Constraint;
    ///
    /// assert_eq!(PersonId::parse("7").map(|id| id.get()), Ok(7));
    /// assert_eq!(
    ///     PersonId::parse("0"),
    ///     Err(Constraint::NotGreaterThan { bound: 0 })
    /// );
    /// ```
    pub fn parse(raw: &str) -> Result<Self, Constraint> {
        let trimmed = raw.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Constraint::InvalidType {
                reason: format!("`{raw}` is not a valid integer"),
            });
        }
        // Only overflow can fail once every byte is a digit.
        let value = digits.parse::<u64>().unwrap_or(u64::MAX);
        if negative || value == 0 {
            return Err(Constraint::NotGreaterThan { bound: 0 });
        }
        Ok(Self(value))
    }

    /// Identifier as an integer.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Query used to look a person up by name and age.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonQuery {
    name: Option<PersonName>,
    age: Age,
}

impl PersonQuery {
    /// Name filter, when given.
    pub fn name(&self) -> Option<&PersonName> {
        self.name.as_ref()
    }

    /// Age filter.
    pub fn age(&self) -> Age {
        self.age
    }
}

/// Raw query string parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PersonQueryParams {
    pub name: Option<String>,
    pub age: Option<i64>,
}

impl TryFrom<PersonQueryParams> for PersonQuery {
    type Error = Violations;

    fn try_from(value: PersonQueryParams) -> Result<Self, Self::Error> {
        let mut v = Validator::new(Source::Query);
        let name = v.optional("name", value.name, PersonName::new);
        let age = v.required("age", value.age, Age::new);
        v.finish(|| Some(PersonQuery { name, age: age? }))
    }
}
