//! Scene composition behind a drawing-surface trait
//!
//! The renderer reads the entity model and game state and issues primitive
//! draw calls against [`Surface`]. It owns no gameplay state; the one thing
//! it mutates is the cosmetic score-highlight counter.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use crate::catalog::SpriteRef;
use crate::consts::*;
use crate::sim::{GamePhase, GameState};

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Styling for one text draw
#[derive(Debug, Clone)]
pub struct TextStyle {
    pub font: &'static str,
    pub fill: &'static str,
    /// Outline color, drawn under the fill
    pub stroke: Option<&'static str>,
    pub align: TextAlign,
    /// Shadow color and blur radius
    pub glow: Option<(&'static str, f32)>,
}

/// A 2D drawing surface: filled rects, circles, text, and sprite blits with
/// rotation about the sprite center. Implemented by the browser canvas on
/// wasm32 and by a recording stub in tests.
pub trait Surface {
    /// Fill the whole board with the background gradient.
    fn clear_background(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, alpha: f64);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, alpha: f64);
    /// Blit a catalog drawable, rotated about its own center.
    fn draw_sprite(&mut self, sprite: SpriteRef, x: f32, y: f32, w: f32, h: f32, rotation: f32);
    /// Blit the player sprite with its fixed glow.
    fn draw_player(&mut self, x: f32, y: f32, w: f32, h: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle);
}

/// Draw one frame. Mutates only `state.score_glow` (cosmetic decrement).
pub fn render<S: Surface>(state: &mut GameState, surface: &mut S) {
    surface.clear_background();

    for star in &state.stars {
        surface.fill_circle(star.pos.x, star.pos.y, star.size, "#fff", star.alpha);
    }

    for item in &state.items {
        surface.draw_sprite(
            item.sprite,
            item.x,
            item.y,
            item.width,
            item.height,
            item.rotation,
        );
    }

    for p in &state.particles {
        surface.fill_circle(p.pos.x, p.pos.y, p.size, p.color.css(), p.alpha);
    }

    let player = &state.player;
    surface.draw_player(player.x, player.y, player.width, player.height);

    draw_hud(state, surface);

    if state.phase == GamePhase::GameOver {
        draw_game_over(state, surface);
    }
}

fn draw_hud<S: Surface>(state: &mut GameState, surface: &mut S) {
    let score_glow = if state.score_glow > 0 {
        let glow = Some(("#ffff00", state.score_glow as f32));
        state.score_glow -= 1;
        glow
    } else {
        None
    };

    surface.draw_text(
        &format!("Score: {}", state.score),
        15.0,
        40.0,
        &TextStyle {
            font: "bold 28px Arial",
            fill: "#ffffff",
            stroke: Some("#000000"),
            align: TextAlign::Left,
            glow: score_glow,
        },
    );

    surface.draw_text(
        &format!("Level: {}", state.level),
        BOARD_WIDTH - 100.0,
        35.0,
        &TextStyle {
            font: "bold 20px Arial",
            fill: "#ffffff",
            stroke: Some("#000000"),
            align: TextAlign::Left,
            glow: None,
        },
    );
}

fn draw_game_over<S: Surface>(state: &GameState, surface: &mut S) {
    surface.fill_rect(0.0, 0.0, BOARD_WIDTH, BOARD_HEIGHT, "#000000", 0.7);

    let center_x = BOARD_WIDTH / 2.0;
    let center_y = BOARD_HEIGHT / 2.0;

    surface.draw_text(
        "GAME OVER",
        center_x,
        center_y - 40.0,
        &TextStyle {
            font: "bold 36px Arial",
            fill: "#ffffff",
            stroke: None,
            align: TextAlign::Center,
            glow: Some(("#ff0000", 20.0)),
        },
    );

    surface.draw_text(
        &format!("Final Score: {}", state.score),
        center_x,
        center_y,
        &TextStyle {
            font: "bold 24px Arial",
            fill: "#ffffff",
            stroke: None,
            align: TextAlign::Center,
            glow: None,
        },
    );

    surface.draw_text(
        "Tap anywhere to restart",
        center_x,
        center_y + 60.0,
        &TextStyle {
            font: "18px Arial",
            fill: "#ffffff",
            stroke: None,
            align: TextAlign::Center,
            glow: None,
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{FrameInput, GamePhase, tick};

    /// Records every draw call for assertions.
    #[derive(Default)]
    struct TestSurface {
        backgrounds: usize,
        rects: Vec<(f32, f32, f32, f32, f64)>,
        circles: Vec<(f32, f32, f32, String, f64)>,
        sprites: Vec<SpriteRef>,
        players: usize,
        texts: Vec<String>,
    }

    impl Surface for TestSurface {
        fn clear_background(&mut self) {
            self.backgrounds += 1;
        }
        fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, _color: &str, alpha: f64) {
            self.rects.push((x, y, w, h, alpha));
        }
        fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: &str, alpha: f64) {
            self.circles.push((x, y, radius, color.to_string(), alpha));
        }
        fn draw_sprite(
            &mut self,
            sprite: SpriteRef,
            _x: f32,
            _y: f32,
            _w: f32,
            _h: f32,
            _rotation: f32,
        ) {
            self.sprites.push(sprite);
        }
        fn draw_player(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {
            self.players += 1;
        }
        fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _style: &TextStyle) {
            self.texts.push(text.to_string());
        }
    }

    #[test]
    fn test_playing_scene_composition() {
        let mut state = GameState::new(11);
        let mut surface = TestSurface::default();
        render(&mut state, &mut surface);

        assert_eq!(surface.backgrounds, 1);
        assert_eq!(surface.players, 1);
        // 20 stars, no particles yet
        assert_eq!(surface.circles.len(), STAR_COUNT);
        assert!(surface.texts.iter().any(|t| t == "Score: 0"));
        assert!(surface.texts.iter().any(|t| t == "Level: 1"));
        // No overlay while playing
        assert!(surface.rects.is_empty());
        assert!(!surface.texts.iter().any(|t| t == "GAME OVER"));
    }

    #[test]
    fn test_game_over_overlay() {
        let mut state = GameState::new(11);
        state.phase = GamePhase::GameOver;
        state.score = 17;
        let mut surface = TestSurface::default();
        render(&mut state, &mut surface);

        assert_eq!(surface.rects.len(), 1);
        let (x, y, w, h, alpha) = surface.rects[0];
        assert_eq!((x, y, w, h), (0.0, 0.0, BOARD_WIDTH, BOARD_HEIGHT));
        assert_eq!(alpha, 0.7);
        assert!(surface.texts.iter().any(|t| t == "GAME OVER"));
        assert!(surface.texts.iter().any(|t| t == "Final Score: 17"));
    }

    #[test]
    fn test_score_glow_decrements_only_in_renderer() {
        let mut state = GameState::new(11);
        state.score_glow = 3;
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.score_glow, 3);

        let mut surface = TestSurface::default();
        render(&mut state, &mut surface);
        assert_eq!(state.score_glow, 2);
        render(&mut state, &mut surface);
        render(&mut state, &mut surface);
        assert_eq!(state.score_glow, 0);
        render(&mut state, &mut surface);
        assert_eq!(state.score_glow, 0);
    }

    #[test]
    fn test_items_and_particles_drawn() {
        let mut state = GameState::new(11);
        let catalog = crate::catalog::SpriteCatalog::new(2, 2);
        let handle = state.spawner.arm();
        crate::sim::spawner::fire(&mut state, &catalog, handle);
        state.spawn_burst(
            glam::Vec2::new(50.0, 50.0),
            crate::sim::ParticleColor::Green,
            4,
        );

        let mut surface = TestSurface::default();
        render(&mut state, &mut surface);
        assert_eq!(surface.sprites.len(), 1);
        assert_eq!(surface.circles.len(), STAR_COUNT + 4);
        assert_eq!(surface.sprites[0].kind, state.items[0].kind);
    }
}
