mod admin;
mod auth;
mod home;
mod quiz;
mod ranking;
mod state;

pub use admin::AdminView;
pub use auth::AuthView;
pub use home::HomeView;
pub use quiz::QuizView;
pub use ranking::RankingView;
pub use state::{ViewError, ViewState, view_state_from_resource};

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;
