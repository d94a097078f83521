use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

// Dot-separated atoms on both sides; letters and digits may be non-ASCII.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+(?:\.[\p{L}\p{N}!#$%&'*+/=?^_`{|}~-]+)*",
        r"@[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?",
        r"(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}-]*[\p{L}\p{N}])?)+$",
    ))
    .expect("static email pattern")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("invalid email address: {0}")]
    InvalidEmail(String),
}

/// A stored contact. Only the store hands these out, always with an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Contact {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Ana Silva")]
    pub name: String,
    #[schema(example = "+55 11 91234-5678")]
    pub phone: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
}

impl Contact {
    /// Stamp a validated field set with an id.
    pub fn new(id: u64, fields: ContactFields) -> Self {
        let ContactFields { name, phone, email } = fields;
        Self {
            id,
            name,
            phone,
            email,
        }
    }

    pub fn fields(&self) -> ContactFields {
        ContactFields {
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }

    /// `query_lower` must already be lowercased.
    pub(crate) fn matches_name(&self, query_lower: &str) -> bool {
        self.name.to_lowercase().contains(query_lower)
    }
}

/// Everything a contact carries except its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactFields {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: email.into(),
        }
    }
}

/// Payload accepted by create and update. A client-supplied `id` is tolerated
/// and dropped during validation.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ContactInput {
    #[serde(default)]
    #[schema(nullable, value_type = Option<u64>)]
    pub id: Option<u64>,
    #[schema(example = "Ana Silva")]
    pub name: String,
    #[schema(example = "+55 11 91234-5678")]
    pub phone: String,
    #[schema(example = "ana@example.com")]
    pub email: String,
}

impl ContactInput {
    pub fn validate(self) -> Result<ContactFields, ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail(self.email));
        }
        Ok(ContactFields {
            name: self.name,
            phone: self.phone,
            email: self.email,
        })
    }
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}
