//! Field-level validation shared by every inbound record.
//!
//! Raw payloads arrive as permissive DTOs where every field is optional. A
//! [`Validator`] walks those fields, converting each into its validated type
//! and collecting a [`Violation`] for every failure, so a client sees all of
//! its mistakes in one response rather than the first one only.

use std::fmt;

use serde::{Serialize, Serializer};

/// Part of the HTTP request a value was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// JSON request body.
    Body,
    /// URL query string.
    Query,
    /// URL path segment.
    Path,
    /// URL-encoded or multipart form field.
    Form,
    /// Request header.
    Header,
    /// Request cookie.
    Cookie,
    /// Uploaded file part.
    File,
}

/// A single violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Constraint {
    /// Required value absent.
    #[error("field required")]
    Missing,
    /// Text shorter than the declared minimum.
    #[error("must be at least {min} characters")]
    TooShort { min: usize },
    /// Text longer than the declared maximum.
    #[error("must be at most {max} characters")]
    TooLong { max: usize },
    /// Number below the inclusive minimum.
    #[error("must be greater than or equal to {min}")]
    BelowMinimum { min: i64 },
    /// Number above the inclusive maximum.
    #[error("must be less than or equal to {max}")]
    AboveMaximum { max: i64 },
    /// Number not strictly greater than the exclusive bound.
    #[error("must be greater than {bound}")]
    NotGreaterThan { bound: i64 },
    /// Value outside the declared enumeration.
    #[error("must be one of: {}", .allowed.join(", "))]
    NotInEnum { allowed: &'static [&'static str] },
    /// Text is not a plausible email address.
    #[error("must be a valid email address")]
    InvalidEmail,
    /// Value could not be read as the declared type.
    #[error("{reason}")]
    InvalidType { reason: String },
}

impl Constraint {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::TooShort { .. } => "too_short",
            Self::TooLong { .. } => "too_long",
            Self::BelowMinimum { .. } => "below_minimum",
            Self::AboveMaximum { .. } => "above_maximum",
            Self::NotGreaterThan { .. } => "not_greater_than",
            Self::NotInEnum { .. } => "not_in_enum",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidType { .. } => "invalid_type",
        }
    }
}

/// Inclusive length bounds counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    min: usize,
    max: Option<usize>,
}

impl LengthBounds {
    /// Bounds with both a minimum and a maximum.
    pub const fn between(min: usize, max: usize) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// Bounds with a minimum only.
    pub const fn at_least(min: usize) -> Self {
        Self { min, max: None }
    }

    /// Check `value` against the bounds.
    ///
    /// # Examples
    /// ```
    /// use people_api::domain::validation::{Constraint, LengthBounds};
    ///
    /// let bounds = LengthBounds::between(1, 3);
    /// assert!(bounds.check("ab").is_ok());
    /// assert_eq!(bounds.check(""), Err(Constraint::TooShort { min: 1 }));
    /// assert_eq!(bounds.check("abcd"), Err(Constraint::TooLong { max: 3 }));
    /// ```
    pub fn check(self, value: &str) -> Result<(), Constraint> {
        let length = value.chars().count();
        if length < self.min {
            return Err(Constraint::TooShort { min: self.min });
        }
        match self.max {
            Some(max) if length > max => Err(Constraint::TooLong { max }),
            _ => Ok(()),
        }
    }
}

/// Check `value` falls within `min..=max`.
pub fn check_range(value: i64, min: i64, max: i64) -> Result<(), Constraint> {
    if value < min {
        return Err(Constraint::BelowMinimum { min });
    }
    if value > max {
        return Err(Constraint::AboveMaximum { max });
    }
    Ok(())
}

/// Violation of one constraint on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    location: Source,
    field: String,
    constraint: Constraint,
}

impl Violation {
    /// Record that `field` read from `location` broke `constraint`.
    pub fn new(location: Source, field: impl Into<String>, constraint: Constraint) -> Self {
        Self {
            location,
            field: field.into(),
            constraint,
        }
    }

    /// Where the offending value came from.
    pub fn location(&self) -> Source {
        self.location
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        self.field.as_str()
    }

    /// The constraint that was violated.
    pub fn constraint(&self) -> &Constraint {
        &self.constraint
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.constraint)
    }
}

#[derive(Serialize)]
struct ViolationWire<'a> {
    location: Source,
    field: &'a str,
    code: &'static str,
    message: String,
}

impl Serialize for Violation {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ViolationWire {
            location: self.location,
            field: self.field.as_str(),
            code: self.constraint.code(),
            message: self.to_string(),
        }
        .serialize(serializer)
    }
}

/// Non-empty collection of violations reported together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    /// Violations in the order they were found.
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was violated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` broke a constraint with the given code.
    pub fn contains(&self, field: &str, code: &str) -> bool {
        self.iter()
            .any(|v| v.field() == field && v.constraint().code() == code)
    }

    /// Append the violations found in another request part.
    ///
    /// # Examples
    /// ```
    /// use people_api::domain::validation::{Constraint, Source, Violation, Violations};
    ///
    /// let mut path = Violations::from(Violation::new(Source::Path, "id", Constraint::Missing));
    /// path.merge(Violations::from(Violation::new(Source::Body, "city", Constraint::Missing)));
    /// assert_eq!(path.len(), 2);
    /// ```
    pub fn merge(&mut self, other: Violations) {
        self.0.extend(other.0);
    }
}

impl From<Vec<Violation>> for Violations {
    fn from(value: Vec<Violation>) -> Self {
        Self(value)
    }
}

impl From<Violation> for Violations {
    fn from(value: Violation) -> Self {
        Self(vec![value])
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

/// Accumulates violations for one record read from one request part.
///
/// # Examples
/// ```
/// use people_api::domain::validation::{Constraint, LengthBounds, Source, Validator};
///
/// let mut validator = Validator::new(Source::Query);
/// let name = validator.optional("name", Some(String::new()), |raw: String| {
///     LengthBounds::between(1, 50).check(&raw).map(|()| raw)
/// });
/// let age = validator.required("age", None::<i64>, Ok);
///
/// let violations = validator
///     .finish(|| Some((name, age?)))
///     .expect_err("both fields are invalid");
/// assert!(violations.contains("name", "too_short"));
/// assert!(violations.contains("age", "missing"));
/// ```
#[derive(Debug)]
pub struct Validator {
    source: Source,
    violations: Vec<Violation>,
}

impl Validator {
    /// Start validating values read from `source`.
    pub fn new(source: Source) -> Self {
        Self {
            source,
            violations: Vec::new(),
        }
    }

    /// Validate a required value, recording [`Constraint::Missing`] when it is
    /// absent.
    pub fn required<R, T>(
        &mut self,
        field: &str,
        raw: Option<R>,
        parse: impl FnOnce(R) -> Result<T, Constraint>,
    ) -> Option<T> {
        let Some(raw) = raw else {
            self.record(field, Constraint::Missing);
            return None;
        };
        self.check(field, raw, parse)
    }

    /// Validate an optional value. Absence is not a violation.
    pub fn optional<R, T>(
        &mut self,
        field: &str,
        raw: Option<R>,
        parse: impl FnOnce(R) -> Result<T, Constraint>,
    ) -> Option<T> {
        raw.and_then(|value| self.check(field, value, parse))
    }

    /// Record a violation found outside the helpers above.
    pub fn record(&mut self, field: &str, constraint: Constraint) {
        self.violations
            .push(Violation::new(self.source, field, constraint));
    }

    /// Finish validation, assembling the record when nothing was violated.
    ///
    /// `build` is only called when no violations were recorded; every
    /// required field it unwraps is then guaranteed to be present.
    pub fn finish<T>(self, build: impl FnOnce() -> Option<T>) -> Result<T, Violations> {
        if !self.violations.is_empty() {
            return Err(Violations(self.violations));
        }
        build().ok_or_else(|| {
            Violations::from(Violation::new(
                self.source,
                "__root__",
                Constraint::InvalidType {
                    reason: "record is incomplete".to_owned(),
                },
            ))
        })
    }

    fn check<R, T>(
        &mut self,
        field: &str,
        raw: R,
        parse: impl FnOnce(R) -> Result<T, Constraint>,
    ) -> Option<T> {
        match parse(raw) {
            Ok(value) => Some(value),
            Err(constraint) => {
                self.record(field, constraint);
                None
            }
        }
    }
}
