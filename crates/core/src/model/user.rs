use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::BeltRank;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("password must not be empty")]
    EmptyPassword,
}

/// A logged-in student.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    name: String,
    belt_rank: BeltRank,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    personal_api_key: Option<String>,
}

/// Raw login form input.
#[derive(Clone, Debug, Default)]
pub struct UserDraft {
    pub name: String,
    pub password: String,
    pub belt_rank: BeltRank,
}

impl UserDraft {
    #[must_use]
    pub fn new(name: impl Into<String>, password: impl Into<String>, belt_rank: BeltRank) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
            belt_rank,
        }
    }

    /// Validate the login form into a fresh `User` with zero points.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the name or password is blank.
    pub fn validate(self) -> Result<User, UserError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(UserError::EmptyName);
        }
        if self.password.trim().is_empty() {
            return Err(UserError::EmptyPassword);
        }

        Ok(User {
            name,
            belt_rank: self.belt_rank,
            points: Some(0),
            password: Some(self.password),
            personal_api_key: None,
        })
    }
}

impl User {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn belt_rank(&self) -> BeltRank {
        self.belt_rank
    }

    #[must_use]
    pub fn points(&self) -> Option<u32> {
        self.points
    }

    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    #[must_use]
    pub fn personal_api_key(&self) -> Option<&str> {
        self.personal_api_key.as_deref()
    }

    #[must_use]
    pub fn has_personal_api_key(&self) -> bool {
        self.personal_api_key.is_some()
    }

    /// Returns a copy with the personal key replaced. Blank keys clear it.
    #[must_use]
    pub fn with_personal_api_key(&self, key: Option<String>) -> Self {
        let personal_api_key = key
            .map(|val| val.trim().to_string())
            .filter(|val| !val.is_empty());
        Self {
            personal_api_key,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_trims_name_and_starts_at_zero_points() {
        let user = UserDraft::new("  Rafi ", "osu", BeltRank::Green)
            .validate()
            .unwrap();
        assert_eq!(user.name(), "Rafi");
        assert_eq!(user.belt_rank(), BeltRank::Green);
        assert_eq!(user.points(), Some(0));
        assert!(!user.has_personal_api_key());
    }

    #[test]
    fn blank_fields_are_rejected() {
        let err = UserDraft::new("  ", "pw", BeltRank::White)
            .validate()
            .unwrap_err();
        assert_eq!(err, UserError::EmptyName);

        let err = UserDraft::new("Mina", " ", BeltRank::White)
            .validate()
            .unwrap_err();
        assert_eq!(err, UserError::EmptyPassword);
    }

    #[test]
    fn blank_personal_key_clears_it() {
        let user = UserDraft::new("Mina", "pw", BeltRank::Blue)
            .validate()
            .unwrap()
            .with_personal_api_key(Some(" key-123 ".into()));
        assert_eq!(user.personal_api_key(), Some("key-123"));

        let cleared = user.with_personal_api_key(Some("   ".into()));
        assert_eq!(cleared.personal_api_key(), None);
        assert_eq!(cleared.name(), "Mina");
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let user = UserDraft::new("Mina", "pw", BeltRank::Brown1)
            .validate()
            .unwrap()
            .with_personal_api_key(Some("k".into()));
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["beltRank"], "Brown 1");
        assert_eq!(json["personalApiKey"], "k");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
    }
}
