use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::Identity;
use quiz_core::time::fixed_now;
use services::{
    Clock, LeaderboardService, QuizLoopService, SampleSize, StatsService, StoredQuestionSource,
    UploadService,
};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context, use_identity_provider};
use crate::routes::QuestionCount;
use crate::views::{AdminView, AuthView, HomeView, QuizView, RankingView};

#[derive(Clone)]
struct TestApp {
    identity: Option<Identity>,
    admin: bool,
    quiz_loop: Arc<QuizLoopService>,
    stats: Arc<StatsService>,
    leaderboard: Arc<LeaderboardService>,
    uploads: Arc<UploadService>,
}

impl UiApp for TestApp {
    fn initial_identity(&self) -> Option<Identity> {
        self.identity.clone()
    }

    fn admin_enabled(&self) -> bool {
        self.admin
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn stats(&self) -> Arc<StatsService> {
        Arc::clone(&self.stats)
    }

    fn leaderboard(&self) -> Arc<LeaderboardService> {
        Arc::clone(&self.leaderboard)
    }

    fn uploads(&self) -> Arc<UploadService> {
        Arc::clone(&self.uploads)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz(&'static str, SampleSize),
    Ranking,
    Auth,
    Admin,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_identity_provider(props.app.identity.clone());
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz(subject, size) => rsx! {
            QuizView { subject: subject.to_owned(), count: QuestionCount(size) }
        },
        ViewKind::Ranking => rsx! { RankingView {} },
        ViewKind::Auth => rsx! { AuthView {} },
        ViewKind::Admin => rsx! { AdminView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub stats: Arc<StatsService>,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Rebuild, then let spawned tasks settle.
    pub async fn settle(&mut self) {
        self.rebuild();
        for _ in 0..3 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Options for `setup_view_harness`.
#[derive(Clone, Default)]
pub struct HarnessOptions {
    pub identity: Option<Identity>,
    pub admin: bool,
    /// Question JSON uploaded before the view is built.
    pub seed_json: Option<&'static str>,
}

pub async fn setup_view_harness(view: ViewKind, options: HarnessOptions) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let storage = Storage::in_memory();

    let stats = StatsService::new(Arc::clone(&storage.stats));
    let leaderboard = LeaderboardService::new(Arc::clone(&storage.stats), &stats);
    let source = Arc::new(StoredQuestionSource::new(Arc::clone(&storage.questions)));
    let quiz_loop = QuizLoopService::new(clock, source, stats.clone()).with_shuffle(false);
    let uploads = Arc::new(UploadService::new(clock, Arc::clone(&storage.questions)));
    let stats = Arc::new(stats);

    if let Some(json) = options.seed_json {
        uploads.upload_json(json).await.expect("seed questions");
    }

    let app = Arc::new(TestApp {
        identity: options.identity,
        admin: options.admin,
        quiz_loop: Arc::new(quiz_loop),
        stats: Arc::clone(&stats),
        leaderboard: Arc::new(leaderboard),
        uploads,
    });

    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, stats }
}
