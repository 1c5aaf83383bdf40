use std::sync::Arc;

use dojo_core::model::{User, UserDraft};
use storage::json::{read_json, write_json};
use storage::repository::{SessionStore, StoreKey};

use crate::error::UserServiceError;

/// Login state persisted under `currentUser`.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn SessionStore>,
}

impl UserService {
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// The user remembered from a previous launch, if any.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` on storage failures.
    pub async fn load_current(&self) -> Result<Option<User>, UserServiceError> {
        Ok(read_json(self.store.as_ref(), StoreKey::CurrentUser).await?)
    }

    /// Validate the login form and remember the new user.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::User` for a blank name or password.
    pub async fn login(&self, draft: UserDraft) -> Result<User, UserServiceError> {
        let user = draft.validate()?;
        self.save(&user).await?;
        tracing::info!(student = user.name(), belt = %user.belt_rank(), "student logged in");
        Ok(user)
    }

    /// Forget the current user.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` on storage failures.
    pub async fn logout(&self) -> Result<(), UserServiceError> {
        self.store.remove(StoreKey::CurrentUser).await?;
        tracing::info!("student logged out");
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` on storage failures.
    pub async fn save(&self, user: &User) -> Result<(), UserServiceError> {
        write_json(self.store.as_ref(), StoreKey::CurrentUser, user).await?;
        Ok(())
    }

    /// Store or clear (`None` or blank) the user's personal API key.
    ///
    /// # Errors
    ///
    /// Returns `UserServiceError::Storage` on storage failures.
    pub async fn set_personal_api_key(
        &self,
        user: &User,
        key: Option<String>,
    ) -> Result<User, UserServiceError> {
        let updated = user.with_personal_api_key(key);
        self.save(&updated).await?;
        Ok(updated)
    }
}
