//! Contact form submissions.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::person::{Email, PersonName};
use super::validation::{Constraint, LengthBounds, Source, Validator, Violations};

/// Length bounds for the free-text message.
pub const MESSAGE_LENGTH: LengthBounds = LengthBounds::at_least(20);

/// Free-text body of a contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContactMessage(String);

impl ContactMessage {
    /// Validate a message against [`MESSAGE_LENGTH`].
    pub fn new(raw: impl Into<String>) -> Result<Self, Constraint> {
        let raw = raw.into();
        MESSAGE_LENGTH.check(&raw)?;
        Ok(Self(raw))
    }
}

impl AsRef<str> for ContactMessage {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated contact request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    first_name: PersonName,
    last_name: PersonName,
    email: Email,
    message: ContactMessage,
}

impl Contact {
    /// Sender's first name.
    pub fn first_name(&self) -> &PersonName {
        &self.first_name
    }

    /// Sender's last name.
    pub fn last_name(&self) -> &PersonName {
        &self.last_name
    }

    /// Reply address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Message body.
    pub fn message(&self) -> &ContactMessage {
        &self.message
    }
}

/// Raw contact form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct ContactForm {
    #[schema(min_length = 1, max_length = 50, example = "Ada")]
    pub first_name: Option<String>,
    #[schema(min_length = 1, max_length = 50, example = "Lovelace")]
    pub last_name: Option<String>,
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[schema(min_length = 20, example = "I would like to hear more about the engine.")]
    pub message: Option<String>,
}

impl TryFrom<ContactForm> for Contact {
    type Error = Violations;

    fn try_from(value: ContactForm) -> Result<Self, Self::Error> {
        let mut v = Validator::new(Source::Form);
        let first_name = v.required("first_name", value.first_name, PersonName::new);
        let last_name = v.required("last_name", value.last_name, PersonName::new);
        let email = v.required("email", value.email, Email::new);
        let message = v.required("message", value.message, ContactMessage::new);
        v.finish(|| {
            Some(Contact {
                first_name: first_name?,
                last_name: last_name?,
                email: email?,
                message: message?,
            })
        })
    }
}
