//! Snake Arcade - a resizable grid snake game
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (grid, snake, food, particles, game phases)
//! - `input`: Key names to logical actions
//! - `renderer`: WebGPU rendering pipeline and scene building
//! - `persistence`: Key/value storage backends
//! - `settings` / `highscores`: Persisted player data

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use highscores::HighScore;
pub use settings::{Settings, SettingsField};

/// Game configuration constants
pub mod consts {
    /// Edge length of one grid cell in pixels
    pub const CELL_SIZE: i32 = 25;

    /// Window limits (pixels)
    pub const MIN_WIDTH: u32 = 600;
    pub const MIN_HEIGHT: u32 = 400;
    pub const DEFAULT_WIDTH: u32 = 1000;
    pub const DEFAULT_HEIGHT: u32 = 700;

    /// Random placement trials before the exhaustive food scan
    pub const FOOD_SPAWN_ATTEMPTS: usize = 100;

    /// Burst sizes
    pub const EAT_PARTICLES: usize = 15;
    pub const DEATH_PARTICLES: usize = 20;

    /// Points needed for each extra frame per second
    pub const SPEED_SCORE_STEP: u64 = 3;

    /// Settings bounds for the base frame rate
    pub const MIN_BASE_SPEED: u32 = 1;
    pub const MAX_BASE_SPEED: u32 = 30;
}
