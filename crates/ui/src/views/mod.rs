mod admin;
mod auth;
mod dashboard;
mod quiz;
mod results;
mod start;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use admin::AdminView;
pub use auth::AuthView;
pub use dashboard::DashboardView;
pub use quiz::QuizView;
pub use results::ResultsView;
pub use start::StartQuizButton;
pub use state::{ViewError, ViewState, view_state_from_resource};
