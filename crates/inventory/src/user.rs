use serde::Serialize;

use libris_core::{DomainError, DomainResult, Entity, UserId};

/// A registered library user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    user_id: UserId,
    name: String,
}

impl User {
    pub fn new(user_id: impl AsRef<str>, name: impl AsRef<str>) -> DomainResult<Self> {
        Ok(Self {
            user_id: UserId::new(user_id)?,
            name: validate_name(name.as_ref())?,
        })
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn rename(&mut self, name: &str) -> DomainResult<()> {
        self.name = validate_name(name)?;
        Ok(())
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &UserId {
        &self.user_id
    }
}

fn validate_name(name: &str) -> DomainResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DomainError::invalid_input("user name cannot be empty"));
    }
    Ok(name.to_string())
}
