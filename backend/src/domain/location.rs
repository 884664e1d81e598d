//! Location attached to a person on update.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{Constraint, LengthBounds, Source, Validator, Violations};

/// Length bounds for city and state names.
pub const PLACE_LENGTH: LengthBounds = LengthBounds::between(1, 30);

/// City or state name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PlaceName(String);

impl PlaceName {
    /// Validate a place name against [`PLACE_LENGTH`].
    pub fn new(raw: impl Into<String>) -> Result<Self, Constraint> {
        let raw = raw.into();
        PLACE_LENGTH.check(&raw)?;
        Ok(Self(raw))
    }
}

impl AsRef<str> for PlaceName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Supported countries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Country {
    Colombia,
    Mexico,
    Argentina,
    Peru,
    Chile,
}

impl Country {
    /// Accepted wire literals.
    pub const LITERALS: &'static [&'static str] =
        &["colombia", "mexico", "argentina", "peru", "chile"];

    /// Parse a wire literal.
    ///
    /// # Examples
    /// ```
    /// use people_api::domain::location::Country;
    ///
    /// assert_eq!(Country::parse("peru"), Ok(Country::Peru));
    /// assert!(Country::parse("Peru").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, Constraint> {
        match raw {
            "colombia" => Ok(Self::Colombia),
            "mexico" => Ok(Self::Mexico),
            "argentina" => Ok(Self::Argentina),
            "peru" => Ok(Self::Peru),
            "chile" => Ok(Self::Chile),
            _ => Err(Constraint::NotInEnum {
                allowed: Self::LITERALS,
            }),
        }
    }
}

/// A validated location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Location {
    #[schema(value_type = String, min_length = 1, max_length = 30, example = "Medellín")]
    city: PlaceName,
    #[schema(value_type = String, min_length = 1, max_length = 30, example = "Antioquia")]
    state: PlaceName,
    country: Country,
}

impl Location {
    /// City name.
    pub fn city(&self) -> &PlaceName {
        &self.city
    }

    /// State name.
    pub fn state(&self) -> &PlaceName {
        &self.state
    }

    /// Country.
    pub fn country(&self) -> Country {
        self.country
    }
}

/// Raw location body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LocationPayload {
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl TryFrom<LocationPayload> for Location {
    type Error = Violations;

    fn try_from(value: LocationPayload) -> Result<Self, Self::Error> {
        let mut v = Validator::new(Source::Body);
        let city = v.required("city", value.city, PlaceName::new);
        let state = v.required("state", value.state, PlaceName::new);
        let country = v.required("country", value.country, |raw| Country::parse(&raw));
        v.finish(|| {
            Some(Location {
                city: city?,
                state: state?,
                country: country?,
            })
        })
    }
}
