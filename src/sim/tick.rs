//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically. All
//! movement constants are per-tick amounts; callers drain fixed steps.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{GameEvent, GamePhase, GameState, Heart, Obstacle};
use crate::consts::*;
use crate::normalize_angle;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Press began or auto-repeated (space/touch) - full lift
    pub flap: bool,
    /// Press ended - cut the climb if still rising
    pub release: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep.
///
/// Returns the notable events of this tick, in the order they happened.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();

    // Pause toggles even though the sim is otherwise frozen
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                events.push(GameEvent::Paused);
                return events;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                events.push(GameEvent::Resumed);
                // The resuming tick simulates normally below
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return events;
    }

    // Flight control: a press overrides whatever the orb was doing, a
    // release while still rising eases the climb off
    if input.flap {
        state.player.vel_y = JUMP_POWER;
    }
    if input.release && state.player.vel_y > 0.0 {
        state.player.vel_y = FLOAT_POWER;
    }

    state.player.vel_y -= GRAVITY;
    state.player.pos.y += state.player.vel_y;

    // Floor and ceiling stop the orb dead, no bounce
    if state.player.pos.y < -PLAYER_Y_LIMIT {
        state.player.pos.y = -PLAYER_Y_LIMIT;
        state.player.vel_y = 0.0;
    }
    if state.player.pos.y > PLAYER_Y_LIMIT {
        state.player.pos.y = PLAYER_Y_LIMIT;
        state.player.vel_y = 0.0;
    }

    let player_pos = state.player.pos;

    // Hearts: drift, spin, collect, cull. One pass; scoring is deferred so
    // the sweep never re-enters the list it is walking.
    let mut collected = 0u32;
    state.hearts.retain_mut(|heart| {
        heart.pos.z += SCROLL_SPEED;
        heart.spin = normalize_angle(heart.spin + SPIN_RATE);
        if heart.pos.distance(player_pos) < COLLECT_RADIUS {
            collected += 1;
            return false; // Collected
        }
        !passed_camera(heart.pos.z)
    });
    for _ in 0..collected {
        state.score += 1;
        events.push(GameEvent::HeartCollected { score: state.score });
        if state.score > state.best {
            state.best = state.score;
            events.push(GameEvent::NewBest { best: state.best });
        }
        if state.score >= SECRET_SCORE && !state.secret_revealed {
            state.secret_revealed = true;
            events.push(GameEvent::SecretRevealed);
        }
    }

    // Obstacles: drift, tumble, contact check, cull. A hit cube stays in
    // the field; only the phase changes.
    let mut hit = false;
    state.obstacles.retain_mut(|obstacle| {
        obstacle.pos.z += SCROLL_SPEED;
        obstacle.rot_x = normalize_angle(obstacle.rot_x + SPIN_RATE);
        obstacle.rot_y = normalize_angle(obstacle.rot_y + SPIN_RATE);
        if obstacle.pos.distance(player_pos) < COLLECT_RADIUS {
            hit = true;
        }
        !passed_camera(obstacle.pos.z)
    });
    if hit {
        state.phase = GamePhase::GameOver;
        events.push(GameEvent::RunEnded { score: state.score });
    }

    // Stream admission: at most one heart and one cube enter per tick.
    // Independent of the sweeps above, so it still runs on a fatal tick.
    if state.rng.random::<f32>() < HEART_SPAWN_CHANCE {
        spawn_heart(state);
    }
    if state.rng.random::<f32>() < OBSTACLE_SPAWN_CHANCE {
        spawn_obstacle(state);
    }

    state.time_ticks += 1;

    events
}

/// Spawn a heart at a random point on the spawn plane
pub fn spawn_heart(state: &mut GameState) {
    let id = state.next_entity_id();
    let pos = spawn_pos(&mut state.rng);
    state.hearts.push(Heart { id, pos, spin: 0.0 });
}

/// Spawn an obstacle cube at a random point on the spawn plane
pub fn spawn_obstacle(state: &mut GameState) {
    let id = state.next_entity_id();
    let pos = spawn_pos(&mut state.rng);
    state.obstacles.push(Obstacle {
        id,
        pos,
        rot_x: 0.0,
        rot_y: 0.0,
    });
}

/// Random position on the spawn plane, always inside the spawn box
fn spawn_pos(rng: &mut Pcg32) -> Vec3 {
    let x: f32 = rng.random_range(-SPAWN_X_RANGE..SPAWN_X_RANGE);
    let y: f32 = rng.random_range(-SPAWN_Y_RANGE..SPAWN_Y_RANGE);
    Vec3::new(
        x.clamp(-SPAWN_X_RANGE, SPAWN_X_RANGE),
        y.clamp(-SPAWN_Y_RANGE, SPAWN_Y_RANGE),
        SPAWN_DEPTH,
    )
}

/// True once an entity is strictly past the camera plane. Sitting exactly
/// on the plane is still alive.
#[inline]
pub fn passed_camera(z: f32) -> bool {
    z > DESPAWN_DEPTH
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Push a heart the player cannot miss, tick once, return the events
    fn collect_one_heart(state: &mut GameState) -> Vec<GameEvent> {
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec3::new(0.0, 0.0, -SCROLL_SPEED);
        state.hearts.push(Heart { id, pos, spin: 0.0 });
        tick(state, &TickInput::default())
    }

    /// Push an obstacle the player cannot miss, tick once, return the events
    fn hit_one_obstacle(state: &mut GameState) -> Vec<GameEvent> {
        let id = state.next_entity_id();
        let pos = state.player.pos + Vec3::new(0.0, 0.0, -SCROLL_SPEED);
        state.obstacles.push(Obstacle {
            id,
            pos,
            rot_x: 0.0,
            rot_y: 0.0,
        });
        tick(state, &TickInput::default())
    }

    #[test]
    fn test_tick_outside_playing_is_inert() {
        let mut state = GameState::new(8);
        assert_eq!(state.phase, GamePhase::Title);

        // Title screen: even a press does nothing
        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        for _ in 0..5 {
            let events = tick(&mut state, &flap);
            assert!(events.is_empty());
        }
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.player.vel_y, 0.0);
        assert!(state.hearts.is_empty());
        assert!(state.obstacles.is_empty());

        // Same after the run has ended
        state.phase = GamePhase::GameOver;
        state.player.pos.y = 1.0;
        let events = tick(&mut state, &flap);
        assert!(events.is_empty());
        assert_eq!(state.player.pos.y, 1.0);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_flap_then_release_flight_curve() {
        let mut state = GameState::new(3);
        state.start();

        // Press: full lift, then one tick of gravity and one integration
        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        tick(&mut state, &flap);
        assert!((state.player.vel_y - 0.295).abs() < 1e-6);
        assert!((state.player.pos.y - 0.295).abs() < 1e-6);

        // Release while rising: climb cut to the float speed
        let release = TickInput {
            release: true,
            ..Default::default()
        };
        tick(&mut state, &release);
        assert!((state.player.vel_y - 0.095).abs() < 1e-6);
        assert!((state.player.pos.y - 0.39).abs() < 1e-6);
    }

    #[test]
    fn test_release_ignored_while_falling() {
        let mut state = GameState::new(3);
        state.start();

        tick(&mut state, &TickInput::default());
        assert!((state.player.vel_y - (-0.005)).abs() < 1e-6);

        // Already falling, so a release changes nothing but gravity
        let release = TickInput {
            release: true,
            ..Default::default()
        };
        tick(&mut state, &release);
        assert!((state.player.vel_y - (-0.01)).abs() < 1e-6);
    }

    #[test]
    fn test_gravity_decays_velocity_linearly() {
        let mut state = GameState::new(3);
        state.start();

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert!((state.player.vel_y - (-0.05)).abs() < 1e-6);
        // y fell by 0.005 * (1 + 2 + ... + 10)
        assert!((state.player.pos.y - (-0.275)).abs() < 1e-6);
    }

    #[test]
    fn test_floor_stops_the_fall_dead() {
        let mut state = GameState::new(14);
        state.start();

        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            // Keep the run alive regardless of what the stream spawned
            state.obstacles.clear();
        }
        assert_eq!(state.player.pos.y, -PLAYER_Y_LIMIT);
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_ceiling_stops_the_climb_dead() {
        let mut state = GameState::new(14);
        state.start();

        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        for _ in 0..30 {
            tick(&mut state, &flap);
            state.obstacles.clear();
        }
        assert_eq!(state.player.pos.y, PLAYER_Y_LIMIT);
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_heart_collect_scores_and_removes() {
        let mut state = GameState::new(5);
        state.start();

        // One heart in reach, one far off to the side
        let near_id = state.next_entity_id();
        state.hearts.push(Heart {
            id: near_id,
            pos: Vec3::new(0.0, 0.0, -SCROLL_SPEED),
            spin: 0.0,
        });
        let far_id = state.next_entity_id();
        state.hearts.push(Heart {
            id: far_id,
            pos: Vec3::new(4.0, 0.0, -SCROLL_SPEED),
            spin: 0.0,
        });

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.score, 1);
        assert!(events.contains(&GameEvent::HeartCollected { score: 1 }));
        assert!(events.contains(&GameEvent::NewBest { best: 1 }));
        assert!(state.hearts.iter().all(|h| h.id != near_id));
        assert!(state.hearts.iter().any(|h| h.id == far_id));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_obstacle_contact_ends_the_run() {
        let mut state = GameState::new(5);
        state.start();
        state.score = 4;
        state.best = 4;

        let cube_id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: cube_id,
            pos: Vec3::new(0.0, 0.0, -SCROLL_SPEED),
            rot_x: 0.0,
            rot_y: 0.0,
        });

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(events.contains(&GameEvent::RunEnded { score: 4 }));
        // The collision itself never changes the score
        assert_eq!(state.score, 4);
        // The cube that ended the run is still in the field
        assert!(state.obstacles.iter().any(|o| o.id == cube_id));
    }

    #[test]
    fn test_collect_and_hit_in_one_tick_keeps_order() {
        let mut state = GameState::new(5);
        state.start();

        let heart_id = state.next_entity_id();
        state.hearts.push(Heart {
            id: heart_id,
            pos: Vec3::new(0.0, 0.0, -SCROLL_SPEED),
            spin: 0.0,
        });
        let cube_id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: cube_id,
            pos: Vec3::new(0.0, 0.0, -SCROLL_SPEED),
            rot_x: 0.0,
            rot_y: 0.0,
        });

        // Hearts resolve before obstacles, so the final score counts the
        // heart grabbed on the fatal tick
        let events = tick(&mut state, &TickInput::default());
        assert_eq!(
            events,
            vec![
                GameEvent::HeartCollected { score: 1 },
                GameEvent::NewBest { best: 1 },
                GameEvent::RunEnded { score: 1 },
            ]
        );
    }

    #[test]
    fn test_contact_distance_is_strict() {
        let mut state = GameState::new(5);
        state.start();

        // After this tick the player sits at y = -0.005 and the cube lands
        // exactly COLLECT_RADIUS away on x
        let cube_id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id: cube_id,
            pos: Vec3::new(COLLECT_RADIUS, -0.005, -SCROLL_SPEED),
            rot_x: 0.0,
            rot_y: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_cull_is_strict_at_the_camera_plane() {
        assert!(!passed_camera(DESPAWN_DEPTH));
        assert!(passed_camera(DESPAWN_DEPTH + 1e-4));
        assert!(!passed_camera(SPAWN_DEPTH));

        let mut state = GameState::new(5);
        state.start();

        // Far from the player on x so neither can be collected
        let keep_id = state.next_entity_id();
        state.hearts.push(Heart {
            id: keep_id,
            pos: Vec3::new(4.0, 0.0, 4.85),
            spin: 0.0,
        });
        let cull_id = state.next_entity_id();
        state.hearts.push(Heart {
            id: cull_id,
            pos: Vec3::new(4.0, 0.0, 5.2),
            spin: 0.0,
        });

        tick(&mut state, &TickInput::default());
        assert!(state.hearts.iter().any(|h| h.id == keep_id));
        assert!(state.hearts.iter().all(|h| h.id != cull_id));
    }

    #[test]
    fn test_secret_message_fires_once_per_session() {
        let mut state = GameState::new(5);
        state.start();
        state.score = SECRET_SCORE - 1;
        // The reveal must not care whether the best is being beaten
        state.best = 20;

        let events = collect_one_heart(&mut state);
        assert_eq!(state.score, SECRET_SCORE);
        assert!(state.secret_revealed);
        assert!(events.contains(&GameEvent::SecretRevealed));
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBest { .. })));

        // Climbing further past the threshold stays quiet
        let events = collect_one_heart(&mut state);
        assert!(!events.contains(&GameEvent::SecretRevealed));

        // And so does crossing it again after a restart
        state.phase = GamePhase::GameOver;
        state.restart();
        state.score = SECRET_SCORE - 1;
        let events = collect_one_heart(&mut state);
        assert_eq!(state.score, SECRET_SCORE);
        assert!(!events.contains(&GameEvent::SecretRevealed));
    }

    #[test]
    fn test_best_survives_runs_and_only_grows() {
        let mut state = GameState::new(11);
        state.start();

        collect_one_heart(&mut state);
        collect_one_heart(&mut state);
        assert_eq!(state.best, 2);

        hit_one_obstacle(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);

        state.restart();
        let events = collect_one_heart(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.best, 2);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::NewBest { .. })));

        // Matching the best is not beating it
        collect_one_heart(&mut state);
        assert_eq!(state.best, 2);

        let events = collect_one_heart(&mut state);
        assert_eq!(state.best, 3);
        assert!(events.contains(&GameEvent::NewBest { best: 3 }));
    }

    #[test]
    fn test_pause_freezes_and_resume_simulates() {
        let mut state = GameState::new(21);
        state.start();

        let flap = TickInput {
            flap: true,
            ..Default::default()
        };
        tick(&mut state, &flap);
        let frozen_y = state.player.pos.y;
        let frozen_vel = state.player.vel_y;
        let frozen_ticks = state.time_ticks;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        let events = tick(&mut state, &pause);
        assert_eq!(events, vec![GameEvent::Paused]);
        assert_eq!(state.phase, GamePhase::Paused);
        assert_eq!(state.player.pos.y, frozen_y);
        assert_eq!(state.player.vel_y, frozen_vel);
        assert_eq!(state.time_ticks, frozen_ticks);

        // Paused ticks change nothing
        let events = tick(&mut state, &TickInput::default());
        assert!(events.is_empty());
        assert_eq!(state.player.pos.y, frozen_y);
        assert_eq!(state.time_ticks, frozen_ticks);

        // The unpausing tick runs the sim again
        let events = tick(&mut state, &pause);
        assert_eq!(events, vec![GameEvent::Resumed]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!((state.player.vel_y - (frozen_vel - GRAVITY)).abs() < 1e-6);
        assert_eq!(state.time_ticks, frozen_ticks + 1);
    }

    #[test]
    fn test_pause_ignored_outside_a_run() {
        let mut state = GameState::new(21);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        let events = tick(&mut state, &pause);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::Title);

        state.phase = GamePhase::GameOver;
        let events = tick(&mut state, &pause);
        assert!(events.is_empty());
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_spawns_stay_inside_the_spawn_box() {
        let mut state = GameState::new(98765);
        for _ in 0..200 {
            spawn_heart(&mut state);
            spawn_obstacle(&mut state);
        }

        for heart in &state.hearts {
            assert!((-SPAWN_X_RANGE..=SPAWN_X_RANGE).contains(&heart.pos.x));
            assert!((-SPAWN_Y_RANGE..=SPAWN_Y_RANGE).contains(&heart.pos.y));
            assert_eq!(heart.pos.z, SPAWN_DEPTH);
            assert_eq!(heart.spin, 0.0);
        }
        for obstacle in &state.obstacles {
            assert!((-SPAWN_X_RANGE..=SPAWN_X_RANGE).contains(&obstacle.pos.x));
            assert!((-SPAWN_Y_RANGE..=SPAWN_Y_RANGE).contains(&obstacle.pos.y));
            assert_eq!(obstacle.pos.z, SPAWN_DEPTH);
        }

        // Every entity got a distinct id from the shared counter
        let mut ids: Vec<u32> = state
            .hearts
            .iter()
            .map(|h| h.id)
            .chain(state.obstacles.iter().map(|o| o.id))
            .collect();
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with the same seed and input script end identical
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        state1.start();
        state2.start();

        for t in 0..400u32 {
            let input = TickInput {
                flap: t % 40 == 0,
                release: t % 40 == 8,
                ..Default::default()
            };
            tick(&mut state1, &input);
            tick(&mut state2, &input);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        let dump1 = serde_json::to_string(&state1).unwrap();
        let dump2 = serde_json::to_string(&state2).unwrap();
        assert_eq!(dump1, dump2);
    }

    proptest! {
        /// No input sequence can push the orb out of its flight bounds
        #[test]
        fn prop_player_stays_inside_flight_bounds(
            inputs in proptest::collection::vec((any::<bool>(), any::<bool>()), 1..300),
        ) {
            let mut state = GameState::new(7);
            state.start();
            for (flap, release) in inputs {
                let input = TickInput {
                    flap,
                    release,
                    ..Default::default()
                };
                tick(&mut state, &input);
                state.obstacles.clear();
                prop_assert!(
                    (-PLAYER_Y_LIMIT..=PLAYER_Y_LIMIT).contains(&state.player.pos.y)
                );
                prop_assert!(state.player.vel_y.is_finite());
            }
        }
    }
}
