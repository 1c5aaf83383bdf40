use dojo_core::model::GenerationSettings;

use crate::error::AppServicesError;
use crate::navigation::ScreenRouter;
use crate::settings_service::GenerationSettingsService;
use crate::user_service::UserService;

/// Application-wide state: the screen router (with the logged-in student) and
/// the active generation settings.
///
/// Built once from storage at startup; callers persist changes through the
/// services before updating it.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub router: ScreenRouter,
    pub settings: GenerationSettings,
}

impl AppState {
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage cannot be read.
    pub async fn load(
        users: &UserService,
        settings: &GenerationSettingsService,
    ) -> Result<Self, AppServicesError> {
        let user = users.load_current().await?;
        let settings = settings.load().await?;
        tracing::debug!(remembered_user = user.is_some(), "loaded app state");
        Ok(Self {
            router: ScreenRouter::new(user),
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Screen;
    use dojo_core::model::{BeltRank, UserDraft};
    use std::sync::Arc;
    use storage::repository::{InMemoryRepository, SessionStore, StoreKey};

    #[tokio::test]
    async fn load_restores_user_and_settings() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemoryRepository::new());
        let users = UserService::new(Arc::clone(&store));
        let settings = GenerationSettingsService::new(Arc::clone(&store));

        let state = AppState::load(&users, &settings).await.unwrap();
        assert_eq!(state.router.screen(), Screen::Auth);
        assert_eq!(state.settings, GenerationSettings::default());

        users
            .login(UserDraft::new("Joya", "pw", BeltRank::Black))
            .await
            .unwrap();
        let state = AppState::load(&users, &settings).await.unwrap();
        assert_eq!(state.router.screen(), Screen::Dashboard);
        assert_eq!(state.router.user().unwrap().name(), "Joya");
    }

    #[tokio::test]
    async fn corrupt_entries_load_as_defaults() {
        let store: Arc<dyn SessionStore> = Arc::new(InMemoryRepository::new());
        store.put(StoreKey::CurrentUser, "oops").await.unwrap();
        store.put(StoreKey::GenerationSettings, "[]").await.unwrap();

        let state = AppState::load(
            &UserService::new(Arc::clone(&store)),
            &GenerationSettingsService::new(Arc::clone(&store)),
        )
        .await
        .unwrap();
        assert_eq!(state.router.screen(), Screen::Auth);
        assert_eq!(state.settings, GenerationSettings::default());
    }
}
