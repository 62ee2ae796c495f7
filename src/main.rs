//! Cami Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! browser build wires DOM events into `FrameInput`, drives the simulation
//! from `requestAnimationFrame`, and runs the spawn chain on `setTimeout`
//! timers. The native build does a short headless smoke run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, HtmlImageElement,
        KeyboardEvent, MouseEvent, TouchEvent,
    };

    use cami_catch::catalog::SpriteCatalog;
    use cami_catch::consts::*;
    use cami_catch::renderer::{self, CanvasSurface};
    use cami_catch::sim::{self, FrameInput, GameEvent, GamePhase, GameState, SpawnHandle};

    /// Default sprite sheets; the hosting page ships these under resources/.
    const GOOD_SPRITES: [&str; 3] = [
        "resources/blackcat.png",
        "resources/lizard.png",
        "resources/lotus.png",
    ];
    const BAD_SPRITES: [&str; 3] = [
        "resources/vodka.png",
        "resources/beer.png",
        "resources/spider.png",
    ];
    const PLAYER_SPRITE: &str = "resources/cami.png";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        surface: CanvasSurface,
        catalog: SpriteCatalog,
        input: FrameInput,
        /// Held directions persist across frames (keydown..keyup)
        held_left: bool,
        held_right: bool,
        /// Touch-drag reference: (touch start x, player x at touch start)
        touch_anchor: Option<(f32, f32)>,
        /// Latest drag target, consumed by the next frame
        pending_drag_x: Option<f32>,
        restart_btn: Option<HtmlElement>,
    }

    impl Game {
        /// Build this frame's input from the persistent held state plus
        /// one-shot signals, then clear the one-shots.
        fn frame_input(&mut self) -> FrameInput {
            let input = FrameInput {
                move_left: self.held_left,
                move_right: self.held_right,
                drag_x: self.pending_drag_x.take(),
                restart: self.input.restart,
            };
            self.input.restart = false;
            input
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cami Catch starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("board")
            .expect("no board canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(BOARD_WIDTH as u32);
        canvas.set_height(BOARD_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;

        // Pre-load the drawable catalog. The browser fetches asynchronously;
        // blits before an image finishes loading are no-ops.
        let good_images = load_images(&GOOD_SPRITES)?;
        let bad_images = load_images(&BAD_SPRITES)?;
        let player_image = load_image(PLAYER_SPRITE)?;
        let catalog = SpriteCatalog::new(good_images.len(), bad_images.len());

        let surface = CanvasSurface::new(ctx, good_images, bad_images, player_image)?;

        let seed = js_sys::Date::now() as u64;
        let mut state = GameState::new(seed);
        state.arm_spawn_chain();
        log::info!("Game initialized with seed: {}", seed);

        let restart_btn = document
            .get_element_by_id("restartBtn")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let game = Rc::new(RefCell::new(Game {
            state,
            surface,
            catalog,
            input: FrameInput::default(),
            held_left: false,
            held_right: false,
            touch_anchor: None,
            pending_drag_x: None,
            restart_btn,
        }));

        setup_keyboard(game.clone());
        setup_touch(&canvas, game.clone());
        setup_mobile_buttons(&document, game.clone());

        request_animation_frame(game);

        log::info!("Cami Catch running!");
        Ok(())
    }

    fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
        let img = HtmlImageElement::new()?;
        img.set_src(src);
        Ok(img)
    }

    fn load_images(sources: &[&str]) -> Result<Vec<HtmlImageElement>, JsValue> {
        sources.iter().map(|src| load_image(src)).collect()
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let events = {
            let mut guard = game.borrow_mut();
            let g = &mut *guard;
            let input = g.frame_input();
            sim::tick(&mut g.state, &input);
            renderer::render(&mut g.state, &mut g.surface);

            // Show the restart button only on the terminal screen
            if let Some(ref btn) = g.restart_btn {
                let display = if g.state.phase == GamePhase::GameOver {
                    "block"
                } else {
                    "none"
                };
                let _ = btn.style().set_property("display", display);
            }

            g.state.take_events()
        };

        for event in events {
            match event {
                GameEvent::SpawnChainArmed(handle) => {
                    // First link of a fresh chain fires right away
                    schedule_spawn(game.clone(), handle, 0.0);
                }
                GameEvent::LevelUp(level) => log::info!("Level up: {}", level),
                GameEvent::GameOver { score } => log::info!("Game over, final score {}", score),
                GameEvent::Caught { .. } => {}
            }
        }

        request_animation_frame(game);
    }

    /// One `setTimeout` link of the spawn chain. The handle goes stale when
    /// the chain is cancelled or re-armed, so a stray timer left over from
    /// before a restart dies here instead of double-spawning.
    fn schedule_spawn(game: Rc<RefCell<Game>>, handle: SpawnHandle, delay_ms: f64) {
        let window = web_sys::window().unwrap();
        let g = game.clone();
        let closure = Closure::once(move || {
            let next = {
                let mut gm = g.borrow_mut();
                let catalog = gm.catalog;
                sim::spawner::fire(&mut gm.state, &catalog, handle)
            };
            if let Some(sched) = next {
                schedule_spawn(g, sched.handle, sched.delay_ms);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay_ms as i32,
        );
        closure.forget();
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" | "KeyA" => g.held_left = true,
                    "ArrowRight" | "KeyD" => g.held_right = true,
                    // Only honored by the sim while terminal
                    "Space" | "Enter" => g.input.restart = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.code().as_str() {
                    "ArrowLeft" | "KeyA" => g.held_left = false,
                    "ArrowRight" | "KeyD" => g.held_right = false,
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Touch start anchors the drag against the current player position
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    g.touch_anchor = Some((touch.client_x() as f32, g.state.player.x));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move produces an absolute player-x target
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    if let Some((start_x, player_start_x)) = g.touch_anchor {
                        let diff = touch.client_x() as f32 - start_x;
                        g.pending_drag_x = Some(player_start_x + diff);
                    }
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap to restart on the terminal screen
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.touch_anchor = None;
                if g.state.phase == GamePhase::GameOver {
                    g.input.restart = true;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mobile_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        let held_button = |id: &str, press: fn(&mut Game, bool)| {
            if let Some(btn) = document.get_element_by_id(id) {
                {
                    let game = game.clone();
                    let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                        press(&mut game.borrow_mut(), true);
                    });
                    let _ = btn.add_event_listener_with_callback(
                        "touchstart",
                        closure.as_ref().unchecked_ref(),
                    );
                    closure.forget();
                }
                {
                    let game = game.clone();
                    let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                        press(&mut game.borrow_mut(), false);
                    });
                    let _ = btn.add_event_listener_with_callback(
                        "touchend",
                        closure.as_ref().unchecked_ref(),
                    );
                    closure.forget();
                }
            } else {
                log::warn!("mobile button #{} not found", id);
            }
        };

        held_button("leftBtn", |g, held| g.held_left = held);
        held_button("rightBtn", |g, held| g.held_right = held);

        if let Some(btn) = document.get_element_by_id("restartBtn") {
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                    game.borrow_mut().input.restart = true;
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
            {
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                    game.borrow_mut().input.restart = true;
                });
                let _ = btn.add_event_listener_with_callback(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Cami Catch (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_run();
}

/// Drive the sim with a simulated clock and a chase-the-items input for a
/// few seconds, to smoke-test the spawn chain and scoring end to end.
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use cami_catch::catalog::SpriteCatalog;
    use cami_catch::sim::{self, FrameInput, GameEvent, GamePhase, GameState, ItemKind};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let catalog = SpriteCatalog::new(3, 3);
    let mut state = GameState::new(0x5eed);
    state.arm_spawn_chain();

    let mut pending = None;
    let mut clock_ms = 0.0;

    for _ in 0..3600 {
        for event in state.take_events() {
            match event {
                GameEvent::SpawnChainArmed(handle) => pending = Some((handle, clock_ms)),
                GameEvent::LevelUp(level) => log::info!("level up: {}", level),
                GameEvent::GameOver { score } => log::info!("game over at score {}", score),
                GameEvent::Caught { .. } => {}
            }
        }

        if let Some((handle, due_ms)) = pending {
            if clock_ms >= due_ms {
                pending = sim::spawner::fire(&mut state, &catalog, handle)
                    .map(|sched| (sched.handle, clock_ms + sched.delay_ms));
            }
        }

        // Chase the lowest good item
        let target = state
            .items
            .iter()
            .filter(|i| i.kind == ItemKind::Good)
            .max_by(|a, b| a.y.total_cmp(&b.y))
            .map(|i| i.x);
        let player_x = state.player.x;
        let input = match target {
            Some(x) if x < player_x - 2.0 => FrameInput {
                move_left: true,
                ..Default::default()
            },
            Some(x) if x > player_x + 2.0 => FrameInput {
                move_right: true,
                ..Default::default()
            },
            _ => FrameInput::default(),
        };

        sim::tick(&mut state, &input);
        if state.phase == GamePhase::GameOver {
            break;
        }
        clock_ms += FRAME_MS;
    }

    println!(
        "Headless run finished: score {}, level {}, phase {:?}",
        state.score, state.level, state.phase
    );
}
