//! Heart Drift - an endless glide through a drifting field of hearts
//!
//! Hold to rise, let go to ease off, catch the hearts, dodge the cubes.
//! Collect enough and something hidden appears.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (flight, pickups, scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `audio`: Procedural Web Audio sound
//! - `ui`: DOM overlays and HUD
//! - `settings`: Runtime quality and volume preferences

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod ui;

pub use settings::{QualityPreset, Settings};
pub use sim::{GameEvent, GamePhase, GameState, TickInput};

/// Game configuration constants
///
/// Flight and stream amounts are per-tick, so the game only plays as tuned
/// at the fixed [`consts::SIM_DT`] rate.
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Subtracted from the player's vertical velocity every tick
    pub const GRAVITY: f32 = 0.005;
    /// Vertical velocity set on press
    pub const JUMP_POWER: f32 = 0.3;
    /// Vertical velocity set on release while still rising
    pub const FLOAT_POWER: f32 = 0.1;
    /// Player y is clamped to +/- this, velocity zeroed on contact
    pub const PLAYER_Y_LIMIT: f32 = 3.0;

    /// Spawn box half-width
    pub const SPAWN_X_RANGE: f32 = 5.0;
    /// Spawn box half-height
    pub const SPAWN_Y_RANGE: f32 = 3.0;
    /// Entities enter the world at this depth
    pub const SPAWN_DEPTH: f32 = -10.0;
    /// Camera position on the z axis, looking toward -z
    pub const CAMERA_Z: f32 = 5.0;
    /// Entities are culled once strictly past the camera plane
    pub const DESPAWN_DEPTH: f32 = CAMERA_Z;
    /// World units the stream drifts toward the camera per tick
    pub const SCROLL_SPEED: f32 = 0.1;
    /// Radians of entity rotation per tick
    pub const SPIN_RATE: f32 = 0.02;

    /// Contact distance shared by pickups and obstacles (center to center)
    pub const COLLECT_RADIUS: f32 = 0.5;
    /// Per-tick chance of a new heart
    pub const HEART_SPAWN_CHANCE: f32 = 0.02;
    /// Per-tick chance of a new obstacle
    pub const OBSTACLE_SPAWN_CHANCE: f32 = 0.01;
    /// Score at which the hidden message is revealed
    pub const SECRET_SCORE: u32 = 10;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
