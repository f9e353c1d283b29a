//! Jump Math entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, EventTarget, HtmlCanvasElement, HtmlInputElement, HtmlSelectElement,
        KeyboardEvent,
    };

    use jump_math::audio::AudioManager;
    use jump_math::error::RenderError;
    use jump_math::renderer::{RenderState, frame_vertices};
    use jump_math::sim::{GameEvent, PuzzleKind, RunConfig, RunMode, TickInput, Viewport, World, frame};
    use jump_math::ui::{self, GameOverSummary};
    use jump_math::{PuzzleError, Settings, Theme};

    /// How long the answer flash stays on screen
    const FLASH_SECS: f64 = 0.8;

    /// Game instance holding all state
    struct Game {
        /// `None` while the menu is showing
        world: Option<World>,
        render_state: Option<RenderState>,
        settings: Settings,
        audio: AudioManager,
        input: TickInput,
        /// Latest rAF timestamp in seconds
        now: f64,
        flash_until: Option<f64>,
    }

    impl Game {
        fn new(settings: Settings) -> Self {
            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);
            Self {
                world: None,
                render_state: None,
                settings,
                audio,
                input: TickInput::default(),
                now: 0.0,
                flash_until: None,
            }
        }

        /// Begin a run with the given setup
        fn start(&mut self, config: RunConfig) {
            self.audio.resume();
            self.settings.remember_run(&config);
            self.settings.save();

            let (w, h) = logical_size();
            let seed = js_sys::Date::now() as u64;
            self.world = Some(World::new(config, Viewport::new(w, h), seed));
            self.input = TickInput::default();
            self.flash_until = None;

            set_text("theme-display", self.settings.theme.name());
            set_active("pause-modal", false);
            set_active("puzzle-modal", false);
            set_active("gameover-modal", false);
            set_active("menu-screen", false);
            set_active("game-screen", true);
        }

        /// Drop the run and go back to the menu
        fn quit(&mut self) {
            self.world = None;
            set_active("pause-modal", false);
            set_active("puzzle-modal", false);
            set_active("gameover-modal", false);
            set_active("game-screen", false);
            set_active("menu-screen", true);
        }

        /// Advance the world one display frame
        fn update(&mut self, now: f64) {
            self.now = now;
            let Some(world) = self.world.as_mut() else {
                return;
            };

            frame(world, &self.input, now);

            let events = world.drain_events();
            self.audio.play_events(&events);
            for event in &events {
                match *event {
                    GameEvent::PuzzleOpened(kind) => show_puzzle(world, kind),
                    GameEvent::GameOver { victory } => show_game_over(world, victory),
                    _ => {}
                }
            }

            if self.flash_until.is_some_and(|until| now >= until) {
                self.flash_until = None;
                if let Some(el) = by_id("screen-effect") {
                    el.set_class_name("screen-effect");
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let (Some(world), Some(render_state)) = (self.world.as_ref(), self.render_state.as_mut())
            else {
                return;
            };
            match render_state.render(&frame_vertices(world)) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    let logical = render_state.logical_size;
                    render_state.resize(render_state.size.0, render_state.size.1, logical);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(world) = self.world.as_ref() else {
                return;
            };
            set_text("score", &ui::score_text(world.score, &world.config));
            set_text("timer", &ui::timer_text(&world.clock, world.config.mode));
            set_active("puzzle-modal", world.pending.is_some());
        }

        /// Submit whatever is typed in the answer box
        fn submit_answer(&mut self) {
            let now = self.now;
            let Some(world) = self.world.as_mut() else {
                return;
            };
            let Some(input) = by_id("puzzle-answer").and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };

            match world.submit_answer(&input.value(), now) {
                Ok(verdict) => {
                    if let Some(el) = by_id("screen-effect") {
                        el.set_class_name(&format!(
                            "screen-effect active {} {}",
                            ui::feedback_class(verdict.correct),
                            world.theme().id()
                        ));
                    }
                    self.flash_until = Some(now + FLASH_SECS);
                    set_text("score", &ui::score_text(world.score, &world.config));
                }
                Err(PuzzleError::NotANumber(text)) => {
                    log::debug!("Rejected answer {:?}", text);
                    // Restart the shake animation
                    let _ = input.class_list().remove_1("shake");
                    let _ = input.offset_height();
                    let _ = input.class_list().add_1("shake");
                }
                Err(e) => log::debug!("Answer ignored: {}", e),
            }
        }

        fn resize(&mut self) {
            let Some(canvas) = canvas() else { return };
            let (width, height, logical) = fit_canvas(&canvas);
            if let Some(world) = self.world.as_mut() {
                world.resize(logical.0, logical.1);
            }
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(width, height, logical);
            }
        }
    }

    // === DOM helpers ===

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn by_id(id: &str) -> Option<Element> {
        document()?.get_element_by_id(id)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    /// Toggle the `active` class that shows screens and modals
    fn set_active(id: &str, active: bool) {
        if let Some(el) = by_id(id) {
            let _ = el.class_list().toggle_with_force("active", active);
        }
    }

    fn input_value(id: &str) -> Option<String> {
        if let Some(input) = by_id(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
            return Some(input.value());
        }
        by_id(id)
            .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok())
            .map(|select| select.value())
    }

    fn set_input_value(id: &str, value: &str) {
        if let Some(input) = by_id(id).and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
            input.set_value(value);
        } else if let Some(select) = by_id(id).and_then(|el| el.dyn_into::<HtmlSelectElement>().ok()) {
            select.set_value(value);
        }
    }

    /// Integer menu field; blank, zero and garbage fall back like `parseInt(v) || d`
    fn int_field(id: &str, fallback: i32) -> i32 {
        input_value(id)
            .and_then(|v| jump_math::sim::parse_answer(&v).ok())
            .filter(|v| *v != 0)
            .unwrap_or(fallback)
    }

    fn listen(target: &EventTarget, kind: &str, handler: impl FnMut(web_sys::Event) + 'static) {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(handler);
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(id: &str, mut handler: impl FnMut() + 'static) {
        match by_id(id) {
            Some(el) => listen(&el, "click", move |_event| handler()),
            None => log::warn!("Missing #{}", id),
        }
    }

    fn canvas() -> Option<HtmlCanvasElement> {
        by_id("game-canvas")?.dyn_into().ok()
    }

    /// Window size in CSS pixels; the world runs in these units
    fn logical_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (1.0, 1.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(1.0);
        (w.max(1.0) as f32, h.max(1.0) as f32)
    }

    /// Size the canvas backing store for the device pixel ratio
    fn fit_canvas(canvas: &HtmlCanvasElement) -> (u32, u32, (f32, f32)) {
        let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
        let logical = logical_size();
        let width = ((logical.0 as f64 * dpr) as u32).max(1);
        let height = ((logical.1 as f64 * dpr) as u32).max(1);
        canvas.set_width(width);
        canvas.set_height(height);
        (width, height, logical)
    }

    fn show_puzzle(world: &World, kind: PuzzleKind) {
        let Some(puzzle) = world.pending.as_ref() else {
            return;
        };
        set_text("puzzle-icon", ui::puzzle_icon(kind));
        if let Some(content) = document().and_then(|d| d.query_selector("#puzzle-modal .puzzle-content").ok().flatten()) {
            let classes = content.class_list();
            let _ = classes.remove_2("coin-challenge", "obstacle-challenge");
            let _ = classes.add_1(ui::puzzle_class(kind));
        }
        set_text("puzzle-question", &puzzle.question());
        set_active("puzzle-modal", true);

        if let Some(answer) = by_id("puzzle-answer").and_then(|el| el.dyn_into::<HtmlInputElement>().ok()) {
            answer.set_value("");
            let _ = answer.focus();
        }
    }

    fn show_game_over(world: &World, victory: bool) {
        let summary = GameOverSummary::from_world(world, victory);
        set_text("gameover-title", &summary.title);
        set_text("gameover-message", &summary.message);
        set_text("final-score", &summary.final_score.to_string());
        if let Some(el) = by_id("final-time") {
            let _ = el.class_list().toggle_with_force("hidden", summary.final_time.is_none());
        }
        if let Some(time) = &summary.final_time {
            set_text("final-time-value", time);
        }
        set_active("puzzle-modal", false);
        set_active("gameover-modal", true);
    }

    /// Fill the menu with the remembered choices
    fn populate_menu(settings: &Settings) {
        set_input_value("min-mult", &settings.math_min.to_string());
        set_input_value("max-mult", &settings.math_max.to_string());
        set_input_value("game-mode", settings.mode.as_str());
        set_input_value("time-limit", &settings.time_limit_secs.to_string());
        set_input_value("target-score", &settings.target_score.to_string());
        select_theme_button(settings.theme);
    }

    fn select_theme_button(theme: Theme) {
        let Some(buttons) = document().and_then(|d| d.query_selector_all(".theme-btn").ok()) else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let selected = btn.get_attribute("data-theme").as_deref() == Some(theme.id());
            let _ = btn.class_list().toggle_with_force("selected", selected);
        }
    }

    /// Run setup as currently entered in the menu
    fn read_menu(settings: &Settings) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            math_min: int_field("min-mult", defaults.math_min),
            math_max: int_field("max-mult", defaults.math_max),
            mode: input_value("game-mode")
                .and_then(|v| RunMode::from_str(&v))
                .unwrap_or(settings.mode),
            time_limit_secs: int_field("time-limit", defaults.time_limit_secs as i32).max(1) as u32,
            target_score: int_field("target-score", defaults.target_score),
            theme: settings.theme,
        }
        .normalized()
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Jump Math starting...");

        let settings = Settings::load();
        populate_menu(&settings);
        let game = Rc::new(RefCell::new(Game::new(settings)));

        setup_menu(game.clone());
        setup_game_buttons(game.clone());
        setup_keyboard(game.clone());
        setup_touch_controls(game.clone());
        setup_auto_pause(game.clone());

        if let Some(window) = web_sys::window() {
            let game = game.clone();
            listen(&window, "resize", move |_event| game.borrow_mut().resize());
        }

        match init_renderer().await {
            Ok(render_state) => {
                log::info!("Renderer ready: {:?}", render_state.size);
                game.borrow_mut().render_state = Some(render_state);
            }
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        if let Some(loading) = by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Jump Math running!");
    }

    async fn init_renderer() -> Result<RenderState, RenderError> {
        let canvas = canvas().ok_or(RenderError::NoCanvas)?;
        let (width, height, logical) = fit_canvas(&canvas);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, logical).await
    }

    fn setup_menu(game: Rc<RefCell<Game>>) {
        // Theme buttons
        if let Some(buttons) = document().and_then(|d| d.query_selector_all(".theme-btn").ok()) {
            for i in 0..buttons.length() {
                let Some(btn) = buttons.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                    continue;
                };
                let game = game.clone();
                let id = btn.get_attribute("data-theme").unwrap_or_default();
                listen(&btn, "click", move |_event| {
                    let theme = Theme::from_id_or_default(&id);
                    select_theme_button(theme);
                    game.borrow_mut().settings.theme = theme;
                });
            }
        }

        on_click("start-btn", move || {
            let mut g = game.borrow_mut();
            let config = read_menu(&g.settings);
            g.start(config);
        });
    }

    fn setup_game_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_click("pause-btn", move || {
                let mut g = game.borrow_mut();
                if let Some(world) = g.world.as_mut() {
                    world.pause();
                    set_active("pause-modal", world.is_paused() && world.pending.is_none());
                }
            });
        }
        {
            let game = game.clone();
            on_click("resume-btn", move || {
                let mut g = game.borrow_mut();
                if let Some(world) = g.world.as_mut() {
                    world.resume();
                }
                set_active("pause-modal", false);
            });
        }
        {
            let game = game.clone();
            on_click("quit-btn", move || game.borrow_mut().quit());
        }
        {
            let game = game.clone();
            on_click("submit-answer", move || game.borrow_mut().submit_answer());
        }
        if let Some(answer) = by_id("puzzle-answer") {
            let game = game.clone();
            listen(&answer, "keydown", move |event| {
                if event.dyn_ref::<KeyboardEvent>().is_some_and(|e| e.key() == "Enter") {
                    game.borrow_mut().submit_answer();
                }
            });
        }
        {
            let game = game.clone();
            on_click("retry-btn", move || {
                let mut g = game.borrow_mut();
                let config = g.settings.run_config();
                g.start(config);
            });
        }
        on_click("menu-btn", move || game.borrow_mut().quit());
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        {
            let game = game.clone();
            listen(&window, "keydown", move |event| {
                let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
                let mut g = game.borrow_mut();
                match key.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" | " " => {
                        let Some(world) = g.world.as_mut() else { return };
                        if world.is_paused() {
                            return;
                        }
                        if !key.repeat() {
                            world.jump();
                        }
                        event.prevent_default();
                    }
                    "Escape" => {
                        if let Some(world) = g.world.as_mut() {
                            world.pause();
                            set_active("pause-modal", world.is_paused() && world.pending.is_none());
                        }
                    }
                    _ => {}
                }
            });
        }
        listen(&window, "keyup", move |event| {
            let Some(key) = event.dyn_ref::<KeyboardEvent>() else { return };
            let mut g = game.borrow_mut();
            match key.key().as_str() {
                "ArrowLeft" => g.input.left = false,
                "ArrowRight" => g.input.right = false,
                _ => {}
            }
        });
    }

    /// On-screen buttons for touch devices, mouse for desktop testing
    fn setup_touch_controls(game: Rc<RefCell<Game>>) {
        fn hold(game: &Rc<RefCell<Game>>, id: &str, set: fn(&mut TickInput, bool)) {
            let Some(btn) = by_id(id) else {
                log::warn!("Missing #{}", id);
                return;
            };
            for (kind, pressed) in [
                ("touchstart", true),
                ("touchend", false),
                ("mousedown", true),
                ("mouseup", false),
                ("mouseleave", false),
            ] {
                let game = game.clone();
                listen(&btn, kind, move |event| {
                    if kind == "touchstart" {
                        event.prevent_default();
                    }
                    set(&mut game.borrow_mut().input, pressed);
                });
            }
        }

        hold(&game, "btn-left", |input, pressed| input.left = pressed);
        hold(&game, "btn-right", |input, pressed| input.right = pressed);

        if let Some(btn) = by_id("btn-jump") {
            for kind in ["touchstart", "mousedown"] {
                let game = game.clone();
                listen(&btn, kind, move |event| {
                    if kind == "touchstart" {
                        event.prevent_default();
                    }
                    if let Some(world) = game.borrow_mut().world.as_mut() {
                        world.jump();
                    }
                });
            }
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(document) = document() else { return };
        let doc = document.clone();
        listen(&document, "visibilitychange", move |_event| {
            if doc.visibility_state() != web_sys::VisibilityState::Hidden {
                return;
            }
            let mut g = game.borrow_mut();
            g.input = TickInput::default();
            if let Some(world) = g.world.as_mut() {
                world.pause();
                if world.is_paused() && world.pending.is_none() {
                    set_active("pause-modal", true);
                    log::info!("Auto-paused (tab hidden)");
                }
            }
        });
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time / 1000.0);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Jump Math (native) starting...");
    log::info!("The browser build is the game - run with `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one run with the autopilot at 60 Hz and log how it went
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use jump_math::Settings;
    use jump_math::audio::AudioManager;
    use jump_math::renderer::frame_vertices;
    use jump_math::sim::{PuzzleStatus, Viewport, World, autopilot, frame};
    use jump_math::ui::GameOverSummary;

    const FRAME_SECS: f64 = 1.0 / 60.0;
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    let settings = Settings::load();
    let audio = AudioManager::new();
    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut world = World::new(settings.run_config(), Viewport::new(800.0, 600.0), seed);

    let mut puzzles = 0u32;
    let mut now = 0.0;
    for i in 0..MAX_FRAMES {
        now = i as f64 * FRAME_SECS;

        // Answer every fourth puzzle wrong so both outcomes show up in the log
        if let Some(puzzle) = world.pending.as_ref() {
            if puzzle.status == PuzzleStatus::AwaitingAnswer {
                let answer = if puzzles % 4 == 3 {
                    puzzle.answer.wrapping_add(1)
                } else {
                    puzzle.answer
                };
                puzzles += 1;
                if let Err(e) = world.submit_answer(&answer.to_string(), now) {
                    log::warn!("Autopilot answer rejected: {}", e);
                }
            }
        }

        let (input, jump) = autopilot(&world);
        if jump {
            world.jump();
        }
        frame(&mut world, &input, now);
        audio.play_events(&world.drain_events());

        if world.is_over() {
            break;
        }
    }

    let vertices = frame_vertices(&world).len();
    match world.outcome() {
        Some(victory) => {
            let summary = GameOverSummary::from_world(&world, victory);
            log::info!("{} {}", summary.title, summary.message);
        }
        None => log::info!("Stopped after {:.0}s without an ending", now),
    }
    log::info!(
        "Score {} after {} puzzles, {} frames, last frame {} vertices",
        world.score,
        puzzles,
        world.frame_count,
        vertices
    );
}
