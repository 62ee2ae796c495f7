//! Per-frame simulation step
//!
//! Advances every entity one frame: player movement, item fall and
//! collisions, scoring and difficulty progression, particle and star
//! updates. The terminal state only reacts to the restart input.

use super::collision::{BoundingBox, overlaps};
use super::state::{GameEvent, GamePhase, GameState, Item, ItemKind, ParticleColor};
use crate::consts::*;

/// Input gathered by the platform layer for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Held left / right direction (keys or mobile buttons; both may cancel)
    pub move_left: bool,
    pub move_right: bool,
    /// Absolute player-x target from a touch drag, applied before key motion
    pub drag_x: Option<f32>,
    /// Restart trigger (key, tap, or button); only honored while terminal
    pub restart: bool,
}

/// Advance the game state by one animation frame.
pub fn tick(state: &mut GameState, input: &FrameInput) {
    state.frame += 1;

    if state.phase == GamePhase::GameOver {
        if input.restart {
            state.restart();
        }
        return;
    }

    move_player(state, input);
    update_items(state);
    update_particles(state);
    update_stars(state);
}

fn move_player(state: &mut GameState, input: &FrameInput) {
    if let Some(target) = input.drag_x {
        state.player.x = target;
    }
    if input.move_left {
        state.player.x -= PLAYER_SPEED;
    }
    if input.move_right {
        state.player.x += PLAYER_SPEED;
    }
    state.player.clamp_to_board();
}

/// Fall, spin, and collision pass over the items, in reverse order so
/// in-place removal never skips an entry. A bad hit ends the pass
/// immediately; the score never moves after game over.
fn update_items(state: &mut GameState) {
    let speed = BASE_ITEM_SPEED + state.score as f32 * ITEM_SPEED_PER_POINT;
    let player_box = BoundingBox::from(&state.player);

    let mut i = state.items.len();
    while i > 0 {
        i -= 1;
        let item = &mut state.items[i];
        let wobble = (item.y * ITEM_WOBBLE_FREQ).sin() * ITEM_WOBBLE_AMPLITUDE;
        item.y += speed + wobble;
        item.rotation += ITEM_SPIN;

        let fell_off = item.y > BOARD_HEIGHT;
        if overlaps(&player_box, &BoundingBox::from(&*item)) {
            let item = state.items.remove(i);
            match item.kind {
                ItemKind::Good => catch_item(state, &item),
                ItemKind::Bad => {
                    bad_hit(state, &item);
                    break;
                }
            }
        } else if fell_off {
            // Fell off the bottom; no scoring effect either way
            state.items.remove(i);
        }
    }
}

fn catch_item(state: &mut GameState, item: &Item) {
    state.score += 1;
    state.score_glow = SCORE_GLOW_FRAMES;
    let center = item.center();
    state.spawn_burst(center, ParticleColor::Green, CATCH_BURST_COUNT);
    state.events.push(GameEvent::Caught {
        x: center.x,
        y: center.y,
    });

    if state.score % POINTS_PER_LEVEL == 0 {
        state.level += 1;
        state.spawn_interval_ms =
            (state.spawn_interval_ms - LEVEL_SPAWN_DROP_MS).max(MIN_SPAWN_INTERVAL_MS);
        state.events.push(GameEvent::LevelUp(state.level));
    }
}

fn bad_hit(state: &mut GameState, item: &Item) {
    state.phase = GamePhase::GameOver;
    state.spawner.cancel();
    state.spawn_burst(item.center(), ParticleColor::Red, BAD_HIT_BURST_COUNT);
    state.events.push(GameEvent::GameOver { score: state.score });
}

fn update_particles(state: &mut GameState) {
    for p in &mut state.particles {
        p.pos += p.vel;
        p.vel.y += PARTICLE_GRAVITY;
        p.alpha -= PARTICLE_FADE;
        p.size *= PARTICLE_SHRINK;
    }
    state.particles.retain(|p| p.alpha > 0.0);
}

fn update_stars(state: &mut GameState) {
    for star in &mut state.stars {
        star.alpha += star.twinkle;
        // Bounce, not clamp: alpha may briefly overshoot the bounds
        if star.alpha > STAR_ALPHA_MAX || star.alpha < STAR_ALPHA_MIN {
            star.twinkle = -star.twinkle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{SpriteCatalog, SpriteRef};
    use crate::sim::spawner;
    use glam::Vec2;

    fn playing_state() -> GameState {
        GameState::new(42)
    }

    fn item_at(x: f32, y: f32, kind: ItemKind) -> Item {
        Item {
            x,
            y,
            width: ITEM_WIDTH,
            height: ITEM_HEIGHT,
            kind,
            rotation: 0.0,
            sprite: SpriteRef { kind, index: 0 },
        }
    }

    /// An item placed dead center on the player so it still overlaps after
    /// this frame's fall.
    fn item_on_player(state: &GameState, kind: ItemKind) -> Item {
        item_at(
            state.player.x + 15.0,
            state.player.y - ITEM_HEIGHT / 2.0,
            kind,
        )
    }

    #[test]
    fn test_player_clamped_to_left_edge() {
        let mut state = playing_state();
        state.player.x = 1.0;
        let input = FrameInput {
            move_left: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.x, 0.0);
        tick(&mut state, &input);
        assert_eq!(state.player.x, 0.0);
    }

    #[test]
    fn test_player_clamped_to_right_edge() {
        let mut state = playing_state();
        state.player.x = BOARD_WIDTH - PLAYER_WIDTH - 1.0;
        let input = FrameInput {
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.x, BOARD_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_opposing_inputs_cancel() {
        let mut state = playing_state();
        let x0 = state.player.x;
        let input = FrameInput {
            move_left: true,
            move_right: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.x, x0);
    }

    #[test]
    fn test_drag_sets_position_with_clamp() {
        let mut state = playing_state();
        let input = FrameInput {
            drag_x: Some(9999.0),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.player.x, BOARD_WIDTH - PLAYER_WIDTH);
    }

    #[test]
    fn test_item_falls_and_spins() {
        let mut state = playing_state();
        state.items.push(item_at(10.0, 100.0, ItemKind::Good));
        tick(&mut state, &FrameInput::default());
        let item = &state.items[0];
        let expected = 100.0 + BASE_ITEM_SPEED + (100.0f32 * ITEM_WOBBLE_FREQ).sin() * 0.5;
        assert!((item.y - expected).abs() < 1e-4);
        assert!((item.rotation - ITEM_SPIN).abs() < 1e-6);
    }

    #[test]
    fn test_off_bottom_item_removed_without_scoring() {
        let mut state = playing_state();
        state.items.push(item_at(10.0, 650.5, ItemKind::Good));
        tick(&mut state, &FrameInput::default());
        assert!(state.items.is_empty());
        assert_eq!(state.score, 0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_good_catch_scores_and_bursts() {
        let mut state = playing_state();
        let item = item_on_player(&state, ItemKind::Good);
        state.items.push(item);
        tick(&mut state, &FrameInput::default());

        assert_eq!(state.score, 1);
        assert!(state.items.is_empty());
        assert_eq!(state.score_glow, SCORE_GLOW_FRAMES);
        assert_eq!(state.particles.len(), CATCH_BURST_COUNT);
        assert!(
            state
                .particles
                .iter()
                .all(|p| p.color == ParticleColor::Green)
        );
        assert!(
            state
                .events
                .iter()
                .any(|e| matches!(e, GameEvent::Caught { .. }))
        );
    }

    #[test]
    fn test_level_up_every_ten_points() {
        let mut state = playing_state();
        state.score = 9;
        let interval_before = state.spawn_interval_ms;
        state.items.push(item_on_player(&state, ItemKind::Good));
        tick(&mut state, &FrameInput::default());

        assert_eq!(state.score, 10);
        assert_eq!(state.level, 2);
        assert_eq!(
            state.spawn_interval_ms,
            interval_before - LEVEL_SPAWN_DROP_MS
        );
        assert!(state.events.contains(&GameEvent::LevelUp(2)));
    }

    #[test]
    fn test_spawn_interval_floored_on_level_up() {
        let mut state = playing_state();
        state.spawn_interval_ms = MIN_SPAWN_INTERVAL_MS + 50.0;
        state.score = 19;
        state.items.push(item_on_player(&state, ItemKind::Good));
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.spawn_interval_ms, MIN_SPAWN_INTERVAL_MS);
    }

    #[test]
    fn test_bad_hit_ends_game_and_kills_chain() {
        let mut state = playing_state();
        let handle = state.spawner.arm();
        state.items.push(item_on_player(&state, ItemKind::Bad));
        tick(&mut state, &FrameInput::default());

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.particles.len(), BAD_HIT_BURST_COUNT);
        assert!(state.particles.iter().all(|p| p.color == ParticleColor::Red));
        assert!(
            state
                .events
                .contains(&GameEvent::GameOver { score: 0 })
        );
        // The pending reschedule is dead
        let catalog = SpriteCatalog::new(3, 3);
        assert!(spawner::fire(&mut state, &catalog, handle).is_none());
    }

    #[test]
    fn test_bad_hit_stops_collision_pass_score_frozen() {
        let mut state = playing_state();
        // Reverse iteration visits the good item (index 1) first, then the
        // bad one; the good item below index 0 must not score afterwards.
        state.items.push(item_on_player(&state, ItemKind::Good));
        state.items.insert(0, item_on_player(&state, ItemKind::Bad));
        // items[0] = bad, items[1] = good; reverse order hits good first
        tick(&mut state, &FrameInput::default());
        assert_eq!(state.score, 1);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Later frames never move the score
        state.items.push(item_on_player(&state, ItemKind::Good));
        for _ in 0..5 {
            tick(&mut state, &FrameInput::default());
        }
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_game_over_freezes_everything_but_restart() {
        let mut state = playing_state();
        state.phase = GamePhase::GameOver;
        state.items.push(item_at(10.0, 100.0, ItemKind::Good));
        let star_alpha = state.stars[0].alpha;

        tick(&mut state, &FrameInput::default());
        assert_eq!(state.items[0].y, 100.0);
        assert_eq!(state.stars[0].alpha, star_alpha);
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = playing_state();
        state.spawner.arm();
        state.score = 23;
        state.level = 3;
        state.spawn_interval_ms = 500.0;
        state.phase = GamePhase::GameOver;
        state.items.push(item_at(10.0, 100.0, ItemKind::Bad));
        state.spawn_burst(Vec2::new(50.0, 50.0), ParticleColor::Red, 5);
        state.player.x = 0.0;
        state.events.clear();

        let input = FrameInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input);

        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.spawn_interval_ms, BASE_SPAWN_INTERVAL_MS);
        assert!(state.items.is_empty());
        assert!(state.particles.is_empty());
        assert_eq!(state.player.x, BOARD_WIDTH / 2.0 - PLAYER_WIDTH / 2.0);
        assert_eq!(state.score_glow, 0);

        // Exactly one fresh chain is announced
        let armed: Vec<_> = state
            .take_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::SpawnChainArmed(_)))
            .collect();
        assert_eq!(armed.len(), 1);
    }

    #[test]
    fn test_restart_ignored_while_playing() {
        let mut state = playing_state();
        state.score = 5;
        let input = FrameInput {
            restart: true,
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.score, 5);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_repeated_restarts_leave_one_live_chain() {
        let catalog = SpriteCatalog::new(3, 3);
        let mut state = playing_state();
        let mut handles = Vec::new();

        for _ in 0..3 {
            state.phase = GamePhase::GameOver;
            let input = FrameInput {
                restart: true,
                ..Default::default()
            };
            tick(&mut state, &input);
            for event in state.take_events() {
                if let GameEvent::SpawnChainArmed(h) = event {
                    handles.push(h);
                }
            }
        }

        assert_eq!(handles.len(), 3);
        for &stale in &handles[..2] {
            assert!(spawner::fire(&mut state, &catalog, stale).is_none());
        }
        assert!(spawner::fire(&mut state, &catalog, handles[2]).is_some());
    }

    #[test]
    fn test_particle_removed_after_exactly_fifty_updates() {
        let mut state = playing_state();
        state.particles.push(crate::sim::Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(1.0, -2.0),
            color: ParticleColor::Green,
            alpha: 1.0,
            size: 4.0,
        });

        for frame in 1..=49 {
            tick(&mut state, &FrameInput::default());
            assert_eq!(state.particles.len(), 1, "gone early at frame {frame}");
        }
        tick(&mut state, &FrameInput::default());
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_particle_integration() {
        let mut state = playing_state();
        state.particles.push(crate::sim::Particle {
            pos: Vec2::new(100.0, 100.0),
            vel: Vec2::new(2.0, -3.0),
            color: ParticleColor::Green,
            alpha: 1.0,
            size: 4.0,
        });
        tick(&mut state, &FrameInput::default());
        let p = &state.particles[0];
        assert_eq!(p.pos, Vec2::new(102.0, 97.0));
        assert_eq!(p.vel.y, -3.0 + PARTICLE_GRAVITY);
        assert!((p.alpha - 0.98).abs() < 1e-9);
        assert_eq!(p.size, 4.0 * PARTICLE_SHRINK);
    }

    #[test]
    fn test_star_twinkle_bounces_at_bounds() {
        let mut state = playing_state();
        state.stars.truncate(1);
        state.stars[0].alpha = 0.79;
        state.stars[0].twinkle = 0.02;

        tick(&mut state, &FrameInput::default());
        // Overshot the upper bound; drift sign flipped, value not clamped
        assert!(state.stars[0].alpha > STAR_ALPHA_MAX);
        assert!(state.stars[0].twinkle < 0.0);

        tick(&mut state, &FrameInput::default());
        assert!(state.stars[0].alpha <= STAR_ALPHA_MAX + 0.02);
        assert!(state.stars[0].twinkle < 0.0);
    }

    #[test]
    fn test_score_monotonic_while_playing() {
        let mut state = playing_state();
        let mut last = 0;
        for i in 0..30 {
            if i % 3 == 0 {
                state.items.push(item_on_player(&state, ItemKind::Good));
            }
            tick(&mut state, &FrameInput::default());
            assert!(state.score >= last);
            last = state.score;
        }
    }

    #[test]
    fn test_fall_speed_scales_with_score() {
        let mut state = playing_state();
        state.score = 20;
        state.items.push(item_at(10.0, 100.0, ItemKind::Good));
        tick(&mut state, &FrameInput::default());
        let expected = 100.0
            + BASE_ITEM_SPEED
            + 20.0 * ITEM_SPEED_PER_POINT
            + (100.0f32 * ITEM_WOBBLE_FREQ).sin() * ITEM_WOBBLE_AMPLITUDE;
        assert!((state.items[0].y - expected).abs() < 1e-4);
    }
}
