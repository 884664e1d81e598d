//! Login form and its acknowledgement.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::person::Password;
use super::validation::{Constraint, LengthBounds, Source, Validator, Violations};

/// Message returned for every accepted login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful";

/// Length bounds for usernames.
pub const USERNAME_LENGTH: LengthBounds = LengthBounds::between(1, 20);

/// Account name submitted on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate a username against [`USERNAME_LENGTH`].
    pub fn new(raw: impl Into<String>) -> Result<Self, Constraint> {
        let raw = raw.into();
        USERNAME_LENGTH.check(&raw)?;
        Ok(Self(raw))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: Username,
    password: Password,
}

impl LoginCredentials {
    /// Submitted username.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Submitted password.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Raw login form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct LoginForm {
    #[schema(min_length = 1, max_length = 20, example = "ada")]
    pub username: Option<String>,
    #[schema(min_length = 8, format = Password, write_only)]
    pub password: Option<String>,
}

impl TryFrom<LoginForm> for LoginCredentials {
    type Error = Violations;

    fn try_from(value: LoginForm) -> Result<Self, Self::Error> {
        let mut v = Validator::new(Source::Form);
        let username = v.required("username", value.username, Username::new);
        let password = v.required("password", value.password, Password::new);
        v.finish(|| {
            Some(LoginCredentials {
                username: username?,
                password: password?,
            })
        })
    }
}

/// Acknowledgement returned after login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginOut {
    #[schema(example = "ada")]
    pub username: String,
    #[schema(example = "Login successful")]
    pub message: String,
}

impl From<&LoginCredentials> for LoginOut {
    fn from(value: &LoginCredentials) -> Self {
        Self {
            username: value.username.as_ref().to_owned(),
            message: LOGIN_SUCCESS_MESSAGE.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn acknowledgement_echoes_username() {
        let credentials = LoginCredentials::try_from(LoginForm {
            username: Some("ada".to_owned()),
            password: Some("difference-engine".to_owned()),
        })
        .expect("valid credentials");

        let out = LoginOut::from(&credentials);
        assert_eq!(out.username, "ada");
        assert_eq!(out.message, LOGIN_SUCCESS_MESSAGE);
    }

    #[rstest]
    #[case(None, Some("long-enough"), "username", "missing")]
    #[case(Some(""), Some("long-enough"), "username", "too_short")]
    #[case(Some("a-very-long-username-indeed"), Some("long-enough"), "username", "too_long")]
    #[case(Some("ada"), Some("short"), "password", "too_short")]
    #[case(Some("ada"), None, "password", "missing")]
    fn rejects_invalid_forms(
        #[case] username: Option<&str>,
        #[case] password: Option<&str>,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let violations = LoginCredentials::try_from(LoginForm {
            username: username.map(str::to_owned),
            password: password.map(str::to_owned),
        })
        .expect_err("invalid form");
        assert!(violations.contains(field, code));
        assert!(violations.iter().all(|v| v.location() == Source::Form));
    }
}
