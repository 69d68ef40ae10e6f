use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::Identity;
use services::{LeaderboardService, QuizLoopService, StatsService, UploadService};

pub trait UiApp: Send + Sync {
    /// Identity signed in before the window opened, if any.
    fn initial_identity(&self) -> Option<Identity>;
    fn admin_enabled(&self) -> bool;

    fn quiz_loop(&self) -> Arc<QuizLoopService>;
    fn stats(&self) -> Arc<StatsService>;
    fn leaderboard(&self) -> Arc<LeaderboardService>;
    fn uploads(&self) -> Arc<UploadService>;
}

#[derive(Clone)]
pub struct AppContext {
    initial_identity: Option<Identity>,
    admin_enabled: bool,

    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
    leaderboard: Arc<LeaderboardService>,
    uploads: Arc<UploadService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            initial_identity: app.initial_identity(),
            admin_enabled: app.admin_enabled(),
            quiz_loop: app.quiz_loop(),
            stats: app.stats(),
            leaderboard: app.leaderboard(),
            uploads: app.uploads(),
        }
    }

    #[must_use]
    pub fn initial_identity(&self) -> Option<Identity> {
        self.initial_identity.clone()
    }

    #[must_use]
    pub fn admin_enabled(&self) -> bool {
        self.admin_enabled
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    #[must_use]
    pub fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    #[must_use]
    pub fn uploads(&self) -> Arc<UploadService> {
        Arc::clone(&self.uploads)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}

/// The signed-in player, shared by every view.
#[derive(Clone, Copy)]
struct CurrentIdentity(Signal<Option<Identity>>);

/// Install the identity signal at the root of the tree.
pub fn use_identity_provider(initial: Option<Identity>) -> Signal<Option<Identity>> {
    use_context_provider(|| CurrentIdentity(Signal::new(initial))).0
}

/// The identity signal installed by `use_identity_provider`.
#[must_use]
pub fn use_identity() -> Signal<Option<Identity>> {
    use_context::<CurrentIdentity>().0
}
