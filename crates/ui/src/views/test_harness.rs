use std::sync::Arc;

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dojo_core::model::{
    BeltRank, GenerationSettings, Question, QuestionRecord, Quiz, UserDraft,
};
use dojo_core::time::fixed_clock;
use services::{
    AdminConfig, AdminService, AppServices, AppState, GenerationSettingsService, ProviderError,
    QuestionProvider, QuizSessionService, Screen, ScreenRouter, UserService,
};
use storage::repository::Storage;

use crate::app::ScreenSwitch;
use crate::context::{UiApp, build_app_context};

pub const VALID_KEY: &str = "good-key";

/// Correct option index of each question served by `StaticProvider`.
pub const CORRECT_ANSWERS: [i64; 5] = [0, 1, 2, 3, 0];

fn question(number: usize, correct: i64) -> Question {
    Question::try_from(QuestionRecord {
        question: format!("Kihon question {number}"),
        question_bengali: format!("কিহন প্রশ্ন {number}"),
        options: vec!["Age".into(), "Gedan".into(), "Chudan".into(), "Jodan".into()],
        options_bengali: vec!["আগে".into(), "গেদান".into(), "চুদান".into(), "জোদান".into()],
        correct_answer: correct,
        explanation: format!("Explanation {number}"),
        explanation_bengali: format!("ব্যাখ্যা {number}"),
    })
    .expect("valid question")
}

struct StaticProvider;

#[async_trait]
impl QuestionProvider for StaticProvider {
    async fn request_quiz(
        &self,
        _belt: BeltRank,
        _settings: &GenerationSettings,
        _api_key: Option<&str>,
    ) -> Result<Quiz, ProviderError> {
        let questions = CORRECT_ANSWERS
            .iter()
            .enumerate()
            .map(|(idx, correct)| question(idx + 1, *correct))
            .collect();
        Quiz::new(questions).map_err(|err| ProviderError::InvalidResponseShape(err.to_string()))
    }

    async fn test_credential(&self, api_key: &str) -> bool {
        api_key == VALID_KEY
    }
}

#[derive(Clone)]
struct TestApp {
    state: AppState,
    services: AppServices,
}

impl UiApp for TestApp {
    fn initial_state(&self) -> AppState {
        self.state.clone()
    }

    fn users(&self) -> Arc<UserService> {
        self.services.users()
    }

    fn settings(&self) -> Arc<GenerationSettingsService> {
        self.services.settings()
    }

    fn admin(&self) -> Arc<AdminService> {
        self.services.admin()
    }

    fn provider(&self) -> Arc<dyn QuestionProvider> {
        self.services.provider()
    }

    fn quiz(&self) -> QuizSessionService {
        self.services.quiz()
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewHarnessRoot(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    rsx! { ScreenSwitch {} }
}

/// How far the quiz should have progressed before the view renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizSetup {
    None,
    Started,
    Finished,
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
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

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Build a harness showing `screen`, logging a student in for every screen but
/// the login form and the admin portal.
pub async fn setup_view_harness(screen: Screen, quiz: QuizSetup) -> ViewHarness {
    let storage = Storage::in_memory();
    let services = AppServices::from_storage(
        &storage,
        fixed_clock(),
        Arc::new(StaticProvider),
        AdminConfig::default(),
    );
    let settings = GenerationSettings::default();

    let user = if matches!(screen, Screen::Auth | Screen::AdminPortal) {
        None
    } else {
        Some(
            services
                .users()
                .login(UserDraft::new("Tariq", "pw", BeltRank::Blue))
                .await
                .expect("login"),
        )
    };
    let mut router = ScreenRouter::new(user.clone());

    if let Some(user) = user.as_ref() {
        let session = services.quiz();
        match quiz {
            QuizSetup::None => {}
            QuizSetup::Started => {
                session.start(user, &settings).await.expect("start quiz");
            }
            QuizSetup::Finished => {
                session.start(user, &settings).await.expect("start quiz");
                for idx in 0..CORRECT_ANSWERS.len() {
                    session.select_answer(idx, 0).expect("answer");
                    session.advance().await.expect("advance");
                }
            }
        }
    }

    match screen {
        Screen::Auth | Screen::Dashboard => {}
        Screen::QuizSession => router.quiz_started().expect("quiz screen"),
        Screen::Results => {
            router.quiz_started().expect("quiz screen");
            router.quiz_finished().expect("results screen");
        }
        Screen::AdminPortal => router.open_admin().expect("admin screen"),
    }

    let app = Arc::new(TestApp {
        state: AppState { router, settings },
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewHarnessRoot, ViewHarnessProps { app });

    ViewHarness { dom, services }
}
