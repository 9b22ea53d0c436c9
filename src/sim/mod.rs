//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod food;
pub mod grid;
pub mod particles;
pub mod resize;
pub mod snake;
pub mod state;
pub mod tick;

pub use grid::Grid;
pub use particles::{Particle, ParticleSystem, Tint};
pub use resize::{resize, snap_window};
pub use snake::{GameOverReason, Heading, Snake, StepResult};
pub use state::{GameEvent, GamePhase, GameState};
pub use tick::{Action, Flow, handle_action, tick};
