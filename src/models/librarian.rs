//! Librarian actor

use serde::Serialize;

use super::person::{Identity, Person, Role};
use crate::error::{AppError, AppResult};

/// A person holding the librarian role.
///
/// Catalog-mutating admin actions take a `&Librarian`, so only an appointed
/// librarian can add books or manage membership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Librarian {
    person: Person,
}

impl Librarian {
    /// Appoint a person as librarian. Members cannot be appointed.
    pub fn appoint(person: Person) -> AppResult<Self> {
        match person.role() {
            Role::Member => Err(AppError::InvalidRole(format!(
                "Member {} cannot be appointed librarian",
                person.email()
            ))),
            Role::Plain | Role::Librarian => Ok(Self {
                person: person.with_role(Role::Librarian),
            }),
        }
    }

    /// The librarian's own person record, holding the librarian role
    pub fn person(&self) -> &Person {
        &self.person
    }

    /// Role gate applied before registering a member
    pub fn check_registrable(&self, person: &Person) -> AppResult<()> {
        if person.is_librarian() {
            return Err(AppError::InvalidRole(
                "Librarian cannot be registered as Member".to_string(),
            ));
        }
        Ok(())
    }
}

impl Identity for Librarian {
    fn name(&self) -> &str {
        self.person.name()
    }

    fn email(&self) -> &str {
        self.person.email()
    }
}
