use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::{Appearance, SessionConfig, SessionConfigDraft};
use quiz_core::session::{SessionAction, SessionTimings};
use quiz_core::time::fixed_now;
use services::{AppearanceService, Clock, QuizLoopService, SnapshotWriter};
use storage::repository::Storage;

use crate::app::use_ui_state;
use crate::context::{UiApp, build_app_context};
use crate::views::{ActiveQuiz, AppearanceToggle, HomeView, QuizView};
use crate::vm::QuizVm;

#[derive(Clone)]
struct TestApp {
    quiz_loop: Arc<QuizLoopService>,
    appearance: Arc<AppearanceService>,
}

impl UiApp for TestApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    fn appearance(&self) -> Arc<AppearanceService> {
        Arc::clone(&self.appearance)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
}

#[derive(Clone, Default)]
struct Seed(Rc<RefCell<Option<QuizVm>>>);

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    seed: Seed,
    handles: ViewTestHandles,
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
    let seed = props.seed.0.borrow_mut().take();
    let appearance = use_ui_state(move || ActiveQuiz::new(seed));
    props.handles.appearance.replace(Some(appearance));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
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
    rsx! {
        AppearanceToggle {}
        match view {
            ViewKind::Home => rsx! { HomeView {} },
            ViewKind::Quiz => rsx! { QuizView {} },
        }
    }
}

/// Callbacks and signals views hand out so tests can drive them without DOM events.
#[derive(Clone, Default)]
pub struct ViewTestHandles {
    dispatch: Rc<RefCell<Option<Callback<SessionAction>>>>,
    restart: Rc<RefCell<Option<Callback<()>>>>,
    toggle_appearance: Rc<RefCell<Option<Callback<()>>>>,
    active: Rc<RefCell<Option<ActiveQuiz>>>,
    appearance: Rc<RefCell<Option<Signal<Appearance>>>>,
}

impl ViewTestHandles {
    pub fn register_quiz(
        &self,
        dispatch: Callback<SessionAction>,
        restart: Callback<()>,
        active: ActiveQuiz,
    ) {
        self.dispatch.replace(Some(dispatch));
        self.restart.replace(Some(restart));
        self.active.replace(Some(active));
    }

    pub fn register_appearance(&self, toggle: Callback<()>) {
        self.toggle_appearance.replace(Some(toggle));
    }

    pub fn dispatch(&self) -> Callback<SessionAction> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub fn restart(&self) -> Callback<()> {
        (*self.restart.borrow()).expect("quiz restart registered")
    }

    pub fn toggle_appearance(&self) -> Callback<()> {
        (*self.toggle_appearance.borrow()).expect("appearance toggle registered")
    }

    pub fn active(&self) -> ActiveQuiz {
        (*self.active.borrow()).expect("quiz view mounted")
    }

    pub fn appearance(&self) -> Signal<Appearance> {
        (*self.appearance.borrow()).expect("ui state provided")
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub storage: Storage,
    pub quiz_loop: Arc<QuizLoopService>,
    pub handles: ViewTestHandles,
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

    /// Let zero-delay timers and their follow-ups run.
    pub async fn settle(&mut self) {
        for _ in 0..6 {
            self.drive_async().await;
        }
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    pub fn draft(&self) -> SessionConfigDraft {
        let draft = self.handles.active().draft;
        self.dom.in_runtime(|| draft.peek().clone())
    }

    pub fn has_active_quiz(&self) -> bool {
        let vm = self.handles.active().vm;
        self.dom.in_runtime(|| vm.peek().is_some())
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Harness with immediate timings; `seed` starts the quiz page mid-session.
pub fn setup_view_harness(view: ViewKind, seed: Option<SessionConfig>) -> ViewHarness {
    let storage = Storage::in_memory();
    let clock = Clock::fixed(fixed_now());
    let quiz_loop = Arc::new(
        QuizLoopService::new(clock, SnapshotWriter::spawn(Arc::clone(&storage.snapshots)))
            .with_timings(SessionTimings::immediate()),
    );
    let appearance = Arc::new(AppearanceService::new(Arc::clone(&storage.preferences)));

    let seed_vm = seed.map(|config| QuizVm::new(quiz_loop.start(config)));
    let seed = Seed::default();
    *seed.0.borrow_mut() = seed_vm;
    let handles = ViewTestHandles::default();

    let app = Arc::new(TestApp {
        quiz_loop: Arc::clone(&quiz_loop),
        appearance,
    });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            seed,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        storage,
        quiz_loop,
        handles,
    }
}
