//! Person model and role types

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Role currently held by a person.
///
/// Member and librarian are exclusive; a person holds at most one of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Plain,
    Member,
    Librarian,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Plain => "plain",
            Role::Member => "member",
            Role::Librarian => "librarian",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "plain" => Ok(Role::Plain),
            "member" => Ok(Role::Member),
            "librarian" => Ok(Role::Librarian),
            _ => Err(AppError::InvalidRole(format!("Unknown role: {}", s))),
        }
    }
}

/// Anything that carries a person's identity and contact handle
pub trait Identity {
    fn name(&self) -> &str;
    fn email(&self) -> &str;
}

/// Create person request
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePerson {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// A person known to the library, with a validated email address
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Person {
    name: String,
    email: String,
    role: Role,
}

impl Person {
    /// Create a plain person, validating the email address
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> AppResult<Self> {
        Self::try_from(CreatePerson {
            name: name.into(),
            email: email.into(),
        })
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_member(&self) -> bool {
        self.role == Role::Member
    }

    pub fn is_librarian(&self) -> bool {
        self.role == Role::Librarian
    }

    pub(crate) fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

impl TryFrom<CreatePerson> for Person {
    type Error = AppError;

    fn try_from(data: CreatePerson) -> AppResult<Self> {
        data.validate()?;
        Ok(Self {
            name: data.name,
            email: normalize_email(&data.email),
            role: Role::Plain,
        })
    }
}

/// Lowercase the domain part; the local part is kept as given
fn normalize_email(email: &str) -> String {
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

impl Identity for Person {
    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }
}

impl std::fmt::Display for Person {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> ({})", self.name, self.email, self.role)
    }
}
