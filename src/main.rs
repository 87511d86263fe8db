//! Stress Ball entry point
//!
//! On the web this wires the labyrinth page to a `LabyrinthSession`. Natively
//! it runs a headless demo that plays through a generated maze.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use wasm_bindgen::convert::FromWasmAbi;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        DeviceOrientationEvent, Document, Element, EventTarget, HtmlElement, MouseEvent,
        TouchEvent,
    };

    use stress_ball::audio::CuePlayer;
    use stress_ball::bubbles::{BubbleSheet, DEFAULT_BUBBLE_COUNT, PopOutcome};
    use stress_ball::consts::FRAME_DT;
    use stress_ball::feedback::{self, Trigger};
    use stress_ball::{ControlMode, LabyrinthSession, MazeTuning, Settings};

    /// Page state shared by all event handlers
    struct App {
        session: LabyrinthSession,
        player: CuePlayer,
        container: HtmlElement,
        ball: HtmlElement,
        bubbles: Option<BubbleBoard>,
        last_time: f64,
    }

    /// Bubble sheet and the element its bubbles live in
    struct BubbleBoard {
        sheet: BubbleSheet,
        container: HtmlElement,
    }

    impl BubbleBoard {
        /// Rebuild every bubble element from the sheet
        fn render(&self) -> Option<()> {
            let document = document()?;
            self.container.set_inner_html("");
            for bubble in &self.sheet.bubbles {
                let el = document
                    .create_element("div")
                    .ok()?
                    .dyn_into::<HtmlElement>()
                    .ok()?;
                el.set_class_name("bubble");
                el.set_attribute("data-id", &bubble.id.to_string()).ok()?;
                let style = el.style();
                let size = format!("{}px", bubble.size);
                style.set_property("width", &size).ok()?;
                style.set_property("height", &size).ok()?;
                style
                    .set_property("background-color", &format!("hsl({}, 80%, 85%)", bubble.hue))
                    .ok()?;
                style
                    .set_property("border-color", &format!("hsl({}, 80%, 65%)", bubble.hue))
                    .ok()?;
                self.container.append_child(&el).ok()?;
            }
            set_text("poppedCount", &self.sheet.popped_count.to_string());
            Some(())
        }
    }

    impl App {
        /// Container-local pointer position
        fn local_point(&self, client_x: i32, client_y: i32) -> (f32, f32) {
            let rect = self.container.get_bounding_client_rect();
            (
                client_x as f32 - rect.left() as f32,
                client_y as f32 - rect.top() as f32,
            )
        }

        /// Push state to the DOM and play pending cues
        fn flush(&mut self) {
            let pos = self.session.ball().pos;
            self.ball
                .style()
                .set_property("transform", &format!("translate({}px, {}px)", pos.x, pos.y))
                .ok();
            self.ball
                .class_list()
                .toggle_with_force("celebrating", self.session.state().is_celebrating())
                .ok();

            set_text("successCount", &self.session.success_count().to_string());
            set_text("timeSpent", &format!("{}s", self.session.time_spent_secs()));

            let cues = self.session.drain_cues();
            self.player.play_all(&cues);
        }

        fn play_trigger(&self, trigger: Trigger) {
            let cues = feedback::cues(trigger, self.session.settings());
            self.player.play_all(&cues);
        }

        /// Pop the bubble behind `target`, if it is one
        fn pop_bubble(&mut self, target: &Element) {
            let Some(board) = &mut self.bubbles else { return };
            if !target.class_list().contains("bubble") {
                return;
            }
            let Some(id) = target.get_attribute("data-id").and_then(|id| id.parse().ok()) else {
                return;
            };

            let outcome = board.sheet.pop(id);
            if outcome == PopOutcome::Ignored {
                return;
            }
            target.class_list().add_1("popped").ok();
            set_text("poppedCount", &board.sheet.popped_count.to_string());
            if let Some(trigger) = outcome.trigger() {
                self.play_trigger(trigger);
            }
        }

        /// Redraw a refilled sheet and play its cue
        fn bubbles_refilled(&mut self, trigger: Trigger) {
            if self.bubbles.as_ref().is_some_and(|b| b.render().is_none()) {
                log::warn!("Failed to draw bubble sheet");
            }
            self.play_trigger(trigger);
        }

        fn set_mode(&mut self, mode: ControlMode) {
            self.session.set_mode(mode);
            toggle_class("tiltControl", "active", mode == ControlMode::Tilt);
            toggle_class("touchControl", "active", mode == ControlMode::Drag);
            self.flush();
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn element(id: &str) -> Option<Element> {
        document()?.get_element_by_id(id)
    }

    fn html_element(id: &str) -> Option<HtmlElement> {
        element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = element(id) {
            el.set_text_content(Some(text));
        }
    }

    fn toggle_class(id: &str, class: &str, on: bool) {
        if let Some(el) = element(id) {
            el.class_list().toggle_with_force(class, on).ok();
        }
    }

    fn listen<E>(target: &EventTarget, name: &str, handler: impl FnMut(E) + 'static)
    where
        E: FromWasmAbi + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        if target
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())
            .is_err()
        {
            log::warn!("Failed to listen for {}", name);
        }
        closure.forget();
    }

    fn apply_settings(settings: &Settings) {
        if let Some(root) = document().and_then(|d| d.document_element()) {
            root.set_attribute("data-theme", settings.theme.as_str()).ok();
        }
        set_text("soundToggle", if settings.sound_enabled { "🔊" } else { "🔇" });
        set_text("hapticToggle", if settings.haptic_enabled { "📳" } else { "📴" });
        set_text(
            "themeToggle",
            if settings.theme == stress_ball::Theme::Light { "🌙" } else { "☀️" },
        );
    }

    /// Lay the generated walls and the goal into the container
    fn draw_arena(app: &App) -> Option<()> {
        let document = document()?;
        for wall in app.session.walls() {
            let el = document
                .create_element("div")
                .ok()?
                .dyn_into::<HtmlElement>()
                .ok()?;
            el.set_class_name("labyrinth-wall");
            let style = el.style();
            let r = wall.rect;
            style.set_property("position", "absolute").ok()?;
            style.set_property("left", &format!("{}px", r.x)).ok()?;
            style.set_property("top", &format!("{}px", r.y)).ok()?;
            style.set_property("width", &format!("{}px", r.width)).ok()?;
            style.set_property("height", &format!("{}px", r.height)).ok()?;
            app.container.append_child(&el).ok()?;
        }

        let goal = app.session.goal();
        let center = html_element("labyrinthCenter")?;
        let style = center.style();
        style.set_property("left", &format!("{}px", goal.x)).ok()?;
        style.set_property("top", &format!("{}px", goal.y)).ok()?;
        Some(())
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Stress Ball starting...");

        let (Some(container), Some(ball)) = (html_element("labyrinth"), html_element("labyrinthBall"))
        else {
            log::error!("Labyrinth elements missing from page");
            return;
        };

        let settings = Settings::load();
        apply_settings(&settings);

        let size = container.client_width() as f32;
        let seed = js_sys::Date::now() as u64;
        let session = match LabyrinthSession::new(MazeTuning::with_arena_size(size), settings, seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Cannot start labyrinth: {:#}", e);
                return;
            }
        };

        let bubbles = html_element("bubbleContainer").map(|container| BubbleBoard {
            sheet: BubbleSheet::new(DEFAULT_BUBBLE_COUNT, seed),
            container,
        });

        let app = App {
            session,
            player: CuePlayer::new(),
            container,
            ball,
            bubbles,
            last_time: 0.0,
        };
        if draw_arena(&app).is_none() {
            log::warn!("Failed to draw labyrinth walls");
        }
        if app.bubbles.as_ref().is_some_and(|b| b.render().is_none()) {
            log::warn!("Failed to draw bubble sheet");
        }
        let app = Rc::new(RefCell::new(app));
        app.borrow_mut().flush();

        setup_controls(app.clone());
        setup_settings_toggles(app.clone());
        setup_pointer_input(app.clone());
        setup_bubble_input(app.clone());
        setup_orientation(app.clone());

        request_animation_frame(app);
        log::info!("Stress Ball running!");
    }

    fn setup_controls(app: Rc<RefCell<App>>) {
        for (id, mode) in [("tiltControl", ControlMode::Tilt), ("touchControl", ControlMode::Drag)] {
            if let Some(btn) = element(id) {
                let app = app.clone();
                listen(&btn, "click", move |_: MouseEvent| app.borrow_mut().set_mode(mode));
            }
        }

        if let Some(btn) = element("resetLabyrinth") {
            let app = app.clone();
            listen(&btn, "click", move |_: MouseEvent| {
                let mut a = app.borrow_mut();
                a.session.reset_ball();
                a.flush();
            });
        }

        if let Some(btn) = element("resetBubbles") {
            listen(&btn, "click", move |_: MouseEvent| {
                let mut a = app.borrow_mut();
                let Some(board) = &mut a.bubbles else { return };
                let trigger = board.sheet.reset();
                a.bubbles_refilled(trigger);
            });
        }
    }

    fn setup_settings_toggles(app: Rc<RefCell<App>>) {
        type Toggle = fn(&mut Settings) -> Option<Trigger>;
        let toggles: [(&str, Toggle); 3] = [
            ("soundToggle", |s| {
                s.toggle_sound();
                None
            }),
            ("hapticToggle", |s| s.toggle_haptic().then_some(Trigger::HapticEnabled)),
            ("themeToggle", |s| {
                s.toggle_theme();
                None
            }),
        ];

        for (id, toggle) in toggles {
            let Some(btn) = element(id) else { continue };
            let app = app.clone();
            listen(&btn, "click", move |_: MouseEvent| {
                let mut a = app.borrow_mut();
                let mut settings = *a.session.settings();
                let trigger = toggle(&mut settings);
                settings.save();
                apply_settings(&settings);
                a.session.set_settings(settings);
                if let Some(trigger) = trigger {
                    let cues = feedback::cues(trigger, &settings);
                    a.player.play_all(&cues);
                }
            });
        }
    }

    fn setup_pointer_input(app: Rc<RefCell<App>>) {
        let container: EventTarget = app.borrow().container.clone().into();

        {
            let app = app.clone();
            listen(&container, "mousedown", move |e: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.local_point(e.client_x(), e.client_y());
                a.session.pointer_down(x, y);
            });
        }
        {
            let app = app.clone();
            listen(&container, "mousemove", move |e: MouseEvent| {
                let mut a = app.borrow_mut();
                let (x, y) = a.local_point(e.client_x(), e.client_y());
                a.session.pointer_move(x, y);
                a.flush();
            });
        }
        {
            let app = app.clone();
            listen(&container, "touchstart", move |e: TouchEvent| {
                let mut a = app.borrow_mut();
                if a.session.mode() != ControlMode::Drag {
                    return;
                }
                e.prevent_default();
                if let Some(touch) = e.touches().get(0) {
                    let (x, y) = a.local_point(touch.client_x(), touch.client_y());
                    a.session.pointer_down(x, y);
                }
            });
        }
        {
            let app = app.clone();
            listen(&container, "touchmove", move |e: TouchEvent| {
                let mut a = app.borrow_mut();
                if a.session.mode() != ControlMode::Drag {
                    return;
                }
                e.prevent_default();
                if let Some(touch) = e.touches().get(0) {
                    let (x, y) = a.local_point(touch.client_x(), touch.client_y());
                    a.session.pointer_move(x, y);
                    a.flush();
                }
            });
        }
        for name in ["mouseup", "touchend"] {
            let app = app.clone();
            listen(&container, name, move |_: web_sys::Event| {
                app.borrow_mut().session.pointer_up();
            });
        }
    }

    fn setup_bubble_input(app: Rc<RefCell<App>>) {
        let Some(container) = app
            .borrow()
            .bubbles
            .as_ref()
            .map(|b| EventTarget::from(b.container.clone()))
        else {
            return;
        };

        {
            let app = app.clone();
            listen(&container, "click", move |e: MouseEvent| {
                if let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) {
                    app.borrow_mut().pop_bubble(&target);
                }
            });
        }
        listen(&container, "touchstart", move |e: TouchEvent| {
            e.prevent_default();
            let Some(touch) = e.touches().get(0) else { return };
            let target = document()
                .and_then(|d| d.element_from_point(touch.client_x() as f32, touch.client_y() as f32));
            if let Some(target) = target {
                app.borrow_mut().pop_bubble(&target);
            }
        });
    }

    fn setup_orientation(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        listen(&window, "deviceorientation", move |e: DeviceOrientationEvent| {
            app.borrow_mut()
                .session
                .on_orientation(e.beta().map(|b| b as f32), e.gamma().map(|g| g as f32));
        });
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            // Clamp long gaps (background tab)
            let dt = if a.last_time > 0.0 {
                (((time - a.last_time) / 1000.0) as f32).min(0.1)
            } else {
                FRAME_DT
            };
            a.last_time = time;

            a.session.frame(dt);
            a.flush();

            if let Some(trigger) = a.bubbles.as_mut().and_then(|b| b.sheet.tick(dt)) {
                a.bubbles_refilled(trigger);
            }
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::PathBuf;

    use anyhow::Result;
    use clap::Parser;
    use glam::Vec2;

    use stress_ball::bubbles::{BubbleSheet, DEFAULT_BUBBLE_COUNT, PopOutcome};
    use stress_ball::feedback;
    use stress_ball::sim::StepOutcome;
    use stress_ball::{ControlMode, LabyrinthSession, MazeTuning, Settings};

    /// Headless play-through of the stress ball toys
    #[derive(Parser, Debug)]
    #[command(version, about)]
    pub struct Args {
        /// Layout seed
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// JSON tuning file (missing fields use defaults)
        #[arg(long)]
        pub tuning: Option<PathBuf>,
        /// Maximum drag moves before giving up
        #[arg(long, default_value_t = 2000)]
        pub max_moves: u32,
        /// Print the generated layout as JSON and exit
        #[arg(long)]
        pub dump_layout: bool,
    }

    pub fn run(args: Args) -> Result<()> {
        let tuning = match &args.tuning {
            Some(path) => MazeTuning::load(path)?,
            None => MazeTuning::default(),
        };
        let settings = Settings {
            sound_enabled: true,
            ..Settings::default()
        };
        let mut session = LabyrinthSession::new(tuning, settings, args.seed)?;

        if args.dump_layout {
            println!("{}", serde_json::to_string_pretty(session.state())?);
            return Ok(());
        }

        play_labyrinth(&mut session, args.max_moves);
        pop_bubbles(args.seed, &settings);
        Ok(())
    }

    /// Drag greedily toward the goal, sidestepping when a wall is in the way
    fn play_labyrinth(session: &mut LabyrinthSession, max_moves: u32) {
        session.set_mode(ControlMode::Drag);
        let scale = session.state().tuning.drag_scale;
        let goal = session.goal().center();

        let mut pointer = Vec2::ZERO;
        session.pointer_down(pointer.x, pointer.y);

        let mut bumps = 0u32;
        let mut detour = 0usize;
        for moves in 0..max_moves {
            let ball = session.ball().rect().center();
            let heading = (goal - ball).normalize_or_zero();
            let tries = [
                heading,
                Vec2::new(heading.x, 0.0),
                Vec2::new(0.0, heading.y),
                heading.perp(),
                -heading.perp(),
            ];

            let dir = tries[detour % tries.len()] * 4.0;
            pointer += dir / scale;
            match session.pointer_move(pointer.x, pointer.y) {
                StepOutcome::GoalReached => {
                    log::info!("Reached goal after {} moves ({} bumps)", moves + 1, bumps);
                    break;
                }
                StepOutcome::Bumped => {
                    bumps += 1;
                    detour += 1;
                }
                StepOutcome::Moved => detour = 0,
                StepOutcome::Ignored => detour += 1,
            }
        }
        session.pointer_up();

        let cues = session.drain_cues();
        println!(
            "labyrinth: goals={} ball=({:.1}, {:.1}) bumps={} cues={}",
            session.success_count(),
            session.ball().pos.x,
            session.ball().pos.y,
            bumps,
            cues.len()
        );

        // Let the celebration run out
        while session.state().is_celebrating() {
            session.frame(stress_ball::consts::FRAME_DT);
        }
        log::info!("Session time {:.2}s", session.state().elapsed_secs);
    }

    /// Pop the whole sheet, then let the automatic refill run
    fn pop_bubbles(seed: u64, settings: &Settings) {
        let mut sheet = BubbleSheet::new(DEFAULT_BUBBLE_COUNT, seed);
        let mut triggers = Vec::new();
        let mut completed = false;
        for id in 0..DEFAULT_BUBBLE_COUNT as u32 {
            let outcome = sheet.pop(id);
            completed |= outcome == PopOutcome::SheetComplete;
            triggers.extend(outcome.trigger());
        }
        println!(
            "bubbles: popped={} complete={}",
            sheet.popped_count, completed
        );

        while sheet.refill_in.is_some() {
            triggers.extend(sheet.tick(stress_ball::consts::FRAME_DT));
        }
        let cue_count: usize = triggers
            .iter()
            .map(|t| feedback::cues(*t, settings).len())
            .sum();
        println!(
            "bubbles: refilled seed={} popped={} cues={}",
            sheet.seed, sheet.popped_count, cue_count
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();
    log::info!("Stress Ball (native) starting...");
    demo::run(demo::Args::parse())
}
