//! Membership service

use crate::{
    error::AppResult,
    models::{Identity, Librarian, Member, Person},
    repository::Repository,
};

#[derive(Clone)]
pub struct MembersService {
    repository: Repository,
}

impl MembersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a person as member.
    ///
    /// The returned `Member` is the identity to use for loans from now on; the
    /// `Person` passed in is not modified.
    pub async fn register(&self, librarian: &Librarian, person: &Person) -> AppResult<Member> {
        if let Err(e) = librarian.check_registrable(person) {
            tracing::warn!(email = %person.email(), "Registration refused: {}", e);
            return Err(e);
        }
        let member = self.repository.write().await.register_member(person)?;
        tracing::info!(email = %member.email(), by = %librarian.email(), "Member registered");
        Ok(member)
    }

    /// Revoke a membership. Refused while the member still has books on loan.
    pub async fn revoke(&self, librarian: &Librarian, email: &str) -> AppResult<Member> {
        match self.repository.write().await.revoke_member(email) {
            Ok(member) => {
                tracing::info!(email = %email, by = %librarian.email(), "Membership revoked");
                Ok(member)
            }
            Err(e) => {
                tracing::warn!(email = %email, "Revocation refused: {}", e);
                Err(e)
            }
        }
    }

    pub async fn get(&self, email: &str) -> AppResult<Member> {
        self.repository.read().await.get_member(email)
    }

    /// All member records in registration order, revoked ones included
    pub async fn list(&self) -> Vec<Member> {
        self.repository.read().await.members()
    }
}
