//! Game state and core simulation types
//!
//! Everything the renderer draws and the UI reports is derived from here.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Start screen is up, sim is inert
    Title,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended on obstacle contact
    GameOver,
}

/// The player's glowing orb. Flight is vertical only: x stays at 0 and the
/// world streams past on z.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    /// Vertical velocity in world units per tick
    pub vel_y: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec3::ZERO,
            vel_y: 0.0,
        }
    }
}

/// A collectible heart drifting toward the camera
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Heart {
    pub id: u32,
    pub pos: Vec3,
    /// Rotation around the z axis (radians)
    pub spin: f32,
}

/// A tumbling cube. Touching one ends the run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
    pub rot_x: f32,
    pub rot_y: f32,
}

/// A single notable thing that happened during a tick.
///
/// The platform layer maps these to DOM changes, sounds, and render
/// effects. The sim never touches any of those directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A run began (fresh start or restart)
    Started,
    Paused,
    Resumed,
    /// A heart was collected; `score` is the new total
    HeartCollected { score: u32 },
    /// The session best improved
    NewBest { best: u32 },
    /// The hidden-message threshold was reached (once per session)
    SecretRevealed,
    /// An obstacle was hit; `score` is the final score for the run
    RunEnded { score: u32 },
}

fn session_rng() -> Pcg32 {
    // Deserialized states get a fresh stream; dumps are diagnostic, not a
    // replay format.
    Pcg32::seed_from_u64(0)
}

/// Complete game state (deterministic, serializable for debug dumps)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Hearts collected this run
    pub score: u32,
    /// Best score this session (never decreases)
    pub best: u32,
    /// The hidden message has been shown this session
    pub secret_revealed: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// The player's orb
    pub player: Player,
    /// Live hearts (ascending id)
    pub hearts: Vec<Heart>,
    /// Live obstacles (ascending id)
    pub obstacles: Vec<Obstacle>,
    /// Entity stream RNG
    #[serde(skip, default = "session_rng")]
    pub rng: Pcg32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Title,
            score: 0,
            best: 0,
            secret_revealed: false,
            time_ticks: 0,
            player: Player::default(),
            hearts: Vec::new(),
            obstacles: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin a run. Only the score resets; whatever is already drifting in
    /// the field keeps drifting. No-op while a run is in progress.
    pub fn start(&mut self) -> Vec<GameEvent> {
        if self.phase == GamePhase::Playing {
            return Vec::new();
        }
        self.phase = GamePhase::Playing;
        self.score = 0;
        vec![GameEvent::Started]
    }

    /// Reset for a fresh run: clear the field, re-center the player, then
    /// begin. Session best and the revealed message survive.
    pub fn restart(&mut self) -> Vec<GameEvent> {
        if self.phase == GamePhase::Playing {
            return Vec::new();
        }
        self.hearts.clear();
        self.obstacles.clear();
        self.player = Player::default();
        self.start()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_inert() {
        let state = GameState::new(123);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 0);
        assert!(!state.secret_revealed);
        assert!(state.hearts.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec3::ZERO);
        assert_eq!(state.player.vel_y, 0.0);
    }

    #[test]
    fn test_start_begins_run_once() {
        let mut state = GameState::new(1);
        let events = state.start();
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Playing);

        // Pressing start mid-run must not reset anything
        state.score = 5;
        let events = state.start();
        assert!(events.is_empty());
        assert_eq!(state.score, 5);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_restart_clears_field_keeps_session_records() {
        let mut state = GameState::new(1);
        state.start();
        let id = state.next_entity_id();
        state.hearts.push(Heart {
            id,
            pos: Vec3::new(1.0, 2.0, -5.0),
            spin: 0.3,
        });
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec3::new(-1.0, 0.0, -2.0),
            rot_x: 0.1,
            rot_y: 0.2,
        });
        state.player.pos.y = 2.5;
        state.player.vel_y = -0.1;
        state.score = 12;
        state.best = 12;
        state.secret_revealed = true;
        state.phase = GamePhase::GameOver;

        let events = state.restart();
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.hearts.is_empty());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, Vec3::ZERO);
        assert_eq!(state.player.vel_y, 0.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.best, 12);
        assert!(state.secret_revealed);
    }

    #[test]
    fn test_entity_ids_are_unique_and_increasing() {
        let mut state = GameState::new(9);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        let c = state.next_entity_id();
        assert!(a < b && b < c);
    }

    #[test]
    fn test_state_dump_skips_rng_and_round_trips() {
        let mut state = GameState::new(77);
        state.start();
        state.score = 3;

        let json = serde_json::to_string(&state).unwrap();
        assert!(!json.contains("\"rng\""));

        let back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 3);
        assert_eq!(back.phase, GamePhase::Playing);
        assert_eq!(back.seed, 77);
    }
}
