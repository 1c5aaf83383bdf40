//! Which top-level screen is showing, and who is logged in.

use dojo_core::model::User;

use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Auth,
    Dashboard,
    QuizSession,
    Results,
    AdminPortal,
}

impl Screen {
    /// Only the login form and the admin portal are open without a student.
    #[must_use]
    pub fn requires_login(self) -> bool {
        !matches!(self, Screen::Auth | Screen::AdminPortal)
    }
}

/// Screen state machine. Every transition is an explicit user action or a
/// quiz lifecycle event.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenRouter {
    screen: Screen,
    user: Option<User>,
}

impl ScreenRouter {
    /// Start on the dashboard when a student is remembered, else on the login form.
    #[must_use]
    pub fn new(user: Option<User>) -> Self {
        let screen = if user.is_some() {
            Screen::Dashboard
        } else {
            Screen::Auth
        };
        Self { screen, user }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    #[must_use]
    pub fn can_access(&self, screen: Screen) -> bool {
        !screen.requires_login() || self.is_authenticated()
    }

    fn go(&mut self, allowed_from: &[Screen], to: Screen) -> Result<(), NavigationError> {
        if !self.can_access(to) {
            return Err(NavigationError::RequiresLogin(to));
        }
        if !allowed_from.contains(&self.screen) {
            return Err(NavigationError::InvalidTransition {
                from: self.screen,
                to,
            });
        }
        self.screen = to;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NavigationError::InvalidTransition` unless on the login form.
    pub fn login(&mut self, user: User) -> Result<(), NavigationError> {
        if self.screen != Screen::Auth {
            return Err(NavigationError::InvalidTransition {
                from: self.screen,
                to: Screen::Dashboard,
            });
        }
        self.user = Some(user);
        self.screen = Screen::Dashboard;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `NavigationError::InvalidTransition` during a quiz.
    pub fn logout(&mut self) -> Result<(), NavigationError> {
        if self.screen == Screen::QuizSession {
            return Err(NavigationError::InvalidTransition {
                from: self.screen,
                to: Screen::Auth,
            });
        }
        self.user = None;
        self.screen = Screen::Auth;
        Ok(())
    }

    /// Replace the logged-in user after a profile change.
    pub fn update_user(&mut self, user: User) {
        if self.user.is_some() {
            self.user = Some(user);
        }
    }

    /// # Errors
    ///
    /// Returns `NavigationError` unless on the login form or dashboard.
    pub fn open_admin(&mut self) -> Result<(), NavigationError> {
        self.go(&[Screen::Auth, Screen::Dashboard], Screen::AdminPortal)
    }

    /// Leave the portal for the dashboard, or the login form when logged out.
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::InvalidTransition` unless in the portal.
    pub fn close_admin(&mut self) -> Result<(), NavigationError> {
        let to = if self.is_authenticated() {
            Screen::Dashboard
        } else {
            Screen::Auth
        };
        self.go(&[Screen::AdminPortal], to)
    }

    /// # Errors
    ///
    /// Returns `NavigationError` without a student or outside the dashboard and results.
    pub fn quiz_started(&mut self) -> Result<(), NavigationError> {
        self.go(&[Screen::Dashboard, Screen::Results], Screen::QuizSession)
    }

    /// # Errors
    ///
    /// Returns `NavigationError::InvalidTransition` outside a quiz.
    pub fn quiz_finished(&mut self) -> Result<(), NavigationError> {
        self.go(&[Screen::QuizSession], Screen::Results)
    }

    /// # Errors
    ///
    /// Returns `NavigationError::InvalidTransition` outside a quiz.
    pub fn quiz_cancelled(&mut self) -> Result<(), NavigationError> {
        self.go(&[Screen::QuizSession], Screen::Dashboard)
    }

    /// # Errors
    ///
    /// Returns `NavigationError::InvalidTransition` unless on the results screen.
    pub fn back_to_dashboard(&mut self) -> Result<(), NavigationError> {
        self.go(&[Screen::Results], Screen::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dojo_core::model::{BeltRank, UserDraft};

    fn student() -> User {
        UserDraft::new("Tariq", "pw", BeltRank::Blue)
            .validate()
            .unwrap()
    }

    #[test]
    fn starts_on_auth_without_user() {
        let router = ScreenRouter::new(None);
        assert_eq!(router.screen(), Screen::Auth);
        assert!(router.can_access(Screen::AdminPortal));
        assert!(!router.can_access(Screen::Dashboard));
        assert!(!router.can_access(Screen::Results));
    }

    #[test]
    fn remembered_user_lands_on_dashboard() {
        let router = ScreenRouter::new(Some(student()));
        assert_eq!(router.screen(), Screen::Dashboard);
    }

    #[test]
    fn quiz_lifecycle() {
        let mut router = ScreenRouter::new(None);
        router.login(student()).unwrap();
        router.quiz_started().unwrap();
        assert!(router.logout().is_err());
        router.quiz_finished().unwrap();
        assert_eq!(router.screen(), Screen::Results);
        router.quiz_started().unwrap();
        router.quiz_cancelled().unwrap();
        assert_eq!(router.screen(), Screen::Dashboard);
    }

    #[test]
    fn unauthenticated_cannot_start_quiz() {
        let mut router = ScreenRouter::new(None);
        assert_eq!(
            router.quiz_started(),
            Err(NavigationError::RequiresLogin(Screen::QuizSession))
        );
        assert_eq!(router.screen(), Screen::Auth);
    }

    #[test]
    fn admin_portal_returns_to_origin() {
        let mut router = ScreenRouter::new(None);
        router.open_admin().unwrap();
        router.close_admin().unwrap();
        assert_eq!(router.screen(), Screen::Auth);

        let mut router = ScreenRouter::new(Some(student()));
        router.open_admin().unwrap();
        router.close_admin().unwrap();
        assert_eq!(router.screen(), Screen::Dashboard);
    }

    #[test]
    fn logout_clears_user() {
        let mut router = ScreenRouter::new(Some(student()));
        router.logout().unwrap();
        assert!(router.user().is_none());
        assert_eq!(router.screen(), Screen::Auth);
        assert!(matches!(
            router.back_to_dashboard(),
            Err(NavigationError::RequiresLogin(Screen::Dashboard))
        ));
    }

    #[test]
    fn update_user_requires_login() {
        let mut router = ScreenRouter::new(None);
        router.update_user(student());
        assert!(router.user().is_none());

        let mut router = ScreenRouter::new(Some(student()));
        let updated = student().with_personal_api_key(Some("k".into()));
        router.update_user(updated.clone());
        assert_eq!(router.user(), Some(&updated));
    }
}
