//! Neon Dodge entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::TAU;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        AddEventListenerOptions, CanvasRenderingContext2d, DeviceOrientationEvent,
        HtmlCanvasElement, MediaQueryList, MouseEvent, TouchEvent,
    };

    use neon_dodge::Settings;
    use neon_dodge::consts::*;
    use neon_dodge::platform::{TiltListener, TiltPermission, constrained_media_query};
    use neon_dodge::sim::{
        Field, GameEvent, GameState, TRAIL_LENGTH, TickInput, TiltReading, tick,
    };

    // iOS 13+ only grants orientation events after an explicit prompt
    #[wasm_bindgen(inline_js = "
        export function request_orientation_permission() {
            if (typeof DeviceOrientationEvent !== 'undefined' &&
                typeof DeviceOrientationEvent.requestPermission === 'function') {
                return DeviceOrientationEvent.requestPermission();
            }
            return Promise.resolve('not-required');
        }
    ")]
    extern "C" {
        fn request_orientation_permission() -> js_sys::Promise;
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        portrait_query: Option<MediaQueryList>,
        tilt_listener: TiltListener,
        /// Pending requestAnimationFrame handle
        frame_id: Option<i32>,
    }

    impl Game {
        /// Narrow portrait layout, polled every frame
        fn constrained(&self) -> bool {
            self.portrait_query.as_ref().is_some_and(|q| q.matches())
        }

        /// Run one simulation tick and draw it. Returns true once the session
        /// has ended.
        fn frame(&mut self) -> bool {
            let input = TickInput {
                now_ms: js_sys::Date::now(),
                constrained_viewport: self.constrained(),
            };
            if input.constrained_viewport {
                return false;
            }

            let events = tick(&mut self.state, &input);
            self.render();

            let mut ended = false;
            for event in events {
                match event {
                    GameEvent::ScoreChanged { score } => set_text("score", score),
                    GameEvent::GameOver { final_score } => {
                        set_text("final-score", final_score);
                        set_screen("game-over-screen", true);
                        ended = true;
                    }
                    GameEvent::AdversaryDestroyed { .. } | GameEvent::CollectiblePicked { .. } => {}
                }
            }
            ended
        }

        fn cancel_frame(&mut self) {
            if let (Some(id), Some(window)) = (self.frame_id.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(id);
            }
        }

        fn resize(&mut self) {
            let (w, h) = window_size();
            self.canvas.set_width(w as u32);
            self.canvas.set_height(h as u32);
            self.state.resize(Field::new(w, h));
        }

        /// Draw the current state (cosmetics live here, not in the sim)
        fn render(&self) {
            let ctx = &self.ctx;
            let s = &self.state;

            ctx.set_fill_style_str("rgba(5, 5, 5, 0.3)");
            ctx.fill_rect(0.0, 0.0, f64::from(s.field.width), f64::from(s.field.height));

            for (i, p) in s.player.trail.iter().enumerate() {
                let t = i as f64 / TRAIL_LENGTH as f64;
                let color = format!("rgba(255, 255, 255, {})", t / 2.0);
                fill_circle(ctx, *p, f64::from(s.player.radius) * t, &color);
            }
            fill_circle(ctx, s.player.pos, f64::from(s.player.radius), &css(PLAYER_COLOR));

            for shot in &s.projectiles {
                fill_circle(ctx, shot.pos, f64::from(shot.radius), "#ffff00");
            }
            for item in &s.collectibles {
                fill_circle(ctx, item.pos, f64::from(item.radius), &css(COLLECTIBLE_COLOR));
            }

            for adversary in &s.adversaries {
                let color = css(adversary.kind.color());
                ctx.save();
                let _ = ctx.translate(f64::from(adversary.pos.x), f64::from(adversary.pos.y));
                let _ = ctx.rotate(f64::from(adversary.spin));
                ctx.set_stroke_style_str(&color);
                ctx.set_line_width(3.0);
                ctx.begin_path();
                let _ = ctx.arc(0.0, 0.0, f64::from(adversary.radius), 0.0, TAU);
                ctx.stroke();
                ctx.set_fill_style_str("#fff");
                ctx.set_font("bold 16px sans-serif");
                ctx.set_text_align("center");
                let _ = ctx.fill_text(
                    adversary.kind.name(),
                    0.0,
                    -f64::from(adversary.radius) * 0.6,
                );
                ctx.restore();
            }

            for particle in &s.particles {
                ctx.set_global_alpha(f64::from(particle.alpha.max(0.0)));
                fill_circle(ctx, particle.pos, f64::from(particle.radius), &css(particle.color));
            }
            ctx.set_global_alpha(1.0);
        }
    }

    fn css(color: u32) -> String {
        format!("#{color:06x}")
    }

    fn fill_circle(ctx: &CanvasRenderingContext2d, pos: Vec2, radius: f64, color: &str) {
        ctx.begin_path();
        let _ = ctx.arc(f64::from(pos.x), f64::from(pos.y), radius, 0.0, TAU);
        ctx.set_fill_style_str(color);
        ctx.fill();
    }

    fn window_size() -> (f32, f32) {
        let Some(window) = web_sys::window() else {
            return (0.0, 0.0);
        };
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn set_text(id: &str, value: u64) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    /// Show or hide a collaborator-owned screen
    fn set_screen(id: &str, visible: bool) {
        let el = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(id));
        if let Some(el) = el {
            let classes = el.class_list();
            let _ = if visible {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Neon Dodge starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document");
            return;
        };

        let Some(canvas) = document
            .get_element_by_id("gameCanvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #gameCanvas element");
            return;
        };

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let (w, h) = window_size();
        let mut state = GameState::new(seed, Field::new(w, h));
        state.tilt = settings.tilt_tuning();

        let portrait_query = web_sys::window()
            .and_then(|win| {
                win.match_media(&constrained_media_query(settings.portrait_max_width))
                    .ok()
            })
            .flatten();

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            canvas,
            ctx,
            portrait_query,
            tilt_listener: TiltListener::new(),
            frame_id: None,
        }));
        game.borrow_mut().resize();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_resize(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Mouse move - absolute position
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().state.pointer_moved(pos);
            });
            let _ = window
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start / move - first touch point; move suppresses scrolling
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        for (kind, prevent_scroll) in [("touchstart", false), ("touchmove", true)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if prevent_scroll {
                    event.prevent_default();
                }
                if let Some(touch) = event.touches().get(0) {
                    let pos = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    game.borrow_mut().state.touched(pos);
                }
            });
            let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                // The prompt must be raised inside the click handler
                if game.borrow().settings.tilt_enabled {
                    request_tilt(game.clone());
                }
                set_screen("start-screen", false);
                if game.borrow_mut().state.start() {
                    begin_session(game.clone());
                }
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                set_screen("game-over-screen", false);
                game.borrow_mut().state.reset();
                begin_session(game.clone());
                log::info!("Game restarted");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Ask for sensor access; a denial or failure leaves pointer/touch control
    fn request_tilt(game: Rc<RefCell<Game>>) {
        let promise = request_orientation_permission();
        wasm_bindgen_futures::spawn_local(async move {
            let permission = match JsFuture::from(promise).await {
                Ok(response) => {
                    TiltPermission::from_response(&response.as_string().unwrap_or_default())
                }
                Err(e) => {
                    log::warn!("Tilt permission request failed: {:?}", e);
                    TiltPermission::Failed
                }
            };
            let register = game.borrow_mut().tilt_listener.on_permission(permission);
            if register {
                add_tilt_listener(game);
            } else if permission.remember_opt_out() {
                // Don't prompt again on later visits
                let mut game = game.borrow_mut();
                game.settings.tilt_enabled = false;
                game.settings.save();
            }
        });
    }

    fn add_tilt_listener(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: DeviceOrientationEvent| {
            let reading = TiltReading::new(
                event.gamma().map(|g| g as f32),
                event.beta().map(|b| b as f32),
            );
            game.borrow_mut().state.tilted(reading);
        });
        let _ = window
            .add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn begin_session(game: Rc<RefCell<Game>>) {
        game.borrow_mut().cancel_frame();
        set_text("score", 0);
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(handle);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        game.borrow_mut().frame_id = None;
        if !game.borrow().state.is_active() {
            return;
        }

        // Schedule first; the frame may end the session and cancel it
        request_animation_frame(game.clone());

        let mut g = game.borrow_mut();
        if g.frame() {
            g.cancel_frame();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Neon Dodge (native) starting...");
    log::info!("Native mode plays a scripted headless session - build for wasm32 to play");

    let summary = headless::run(&neon_dodge::Settings::load());
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;
    use serde::Serialize;

    use neon_dodge::Settings;
    use neon_dodge::platform::Viewport;
    use neon_dodge::sim::{Field, GameEvent, GameState, TickInput, tick};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Five minutes of play
    const MAX_FRAMES: u64 = 60 * 60 * 5;

    #[derive(Debug, Serialize)]
    pub struct Summary {
        pub seed: u64,
        pub frames: u64,
        pub score: u64,
        pub fire_rate: u32,
        pub kills: u32,
        pub pickups: u32,
        pub game_over: bool,
    }

    /// Target that circles the field center
    fn orbit(field: Field, frame: u64) -> Vec2 {
        let angle = frame as f32 * 0.01;
        field.center() + Vec2::from_angle(angle) * field.height.min(field.width) * 0.3
    }

    pub fn run(settings: &Settings) -> Summary {
        let viewport = Viewport::default();
        let seed = settings.seed.unwrap_or(0x5eed);
        let mut state = GameState::new(seed, Field::new(viewport.width, viewport.height));
        state.tilt = settings.tilt_tuning();
        state.start();

        let constrained = viewport.is_constrained(settings.portrait_max_width);
        let (mut kills, mut pickups, mut game_over) = (0, 0, false);

        for frame in 0..MAX_FRAMES {
            // Grab apples when there are any, otherwise keep circling
            let target = state
                .collectibles
                .first()
                .map(|c| c.pos)
                .unwrap_or_else(|| orbit(state.field, frame));
            state.pointer_moved(target);

            let input = TickInput {
                now_ms: frame as f64 * FRAME_MS,
                constrained_viewport: constrained,
            };
            for event in tick(&mut state, &input) {
                match event {
                    GameEvent::AdversaryDestroyed { .. } => kills += 1,
                    GameEvent::CollectiblePicked { .. } => pickups += 1,
                    GameEvent::GameOver { .. } => game_over = true,
                    GameEvent::ScoreChanged { .. } => {}
                }
            }
            if game_over {
                break;
            }
        }

        log::info!("Headless session finished after {} frames", state.frames);
        Summary {
            seed,
            frames: state.frames,
            score: state.score,
            fire_rate: state.player.fire_rate,
            kills,
            pickups,
            game_over,
        }
    }
}
