//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies
//!
//! The outside world drives it through [`TickInput`] and reacts to the
//! [`GameEvent`]s a tick returns; nothing in here touches the DOM, audio,
//! or the GPU.

pub mod state;
pub mod tick;

pub use state::{GameEvent, GamePhase, GameState, Heart, Obstacle, Player};
pub use tick::{TickInput, passed_camera, spawn_heart, spawn_obstacle, tick};
