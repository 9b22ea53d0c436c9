//! Game state and core simulation types
//!
//! Everything the frame loop mutates lives in `GameState`. Platform code reads
//! it for rendering and drains `events` for sound and persistence.

use glam::{IVec2, UVec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::food;
use super::grid::Grid;
use super::particles::{ParticleSystem, Tint};
use super::snake::{GameOverReason, Snake};
use crate::consts::*;
use crate::settings::{Settings, SettingsField};

/// Current screen / phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Title screen, a fresh board waits behind it
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Run ended
    GameOver,
    /// Settings editor
    Settings,
}

/// Things that happened during a frame, for the platform layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A new run began (from the menu, a restart or game over)
    Started,
    Paused,
    Resumed,
    FoodEaten { score: u64 },
    GameOver {
        reason: GameOverReason,
        score: u64,
        /// The in-memory record was raised and should be persisted
        new_high_score: bool,
    },
    /// The settings cursor moved or a value changed
    CursorMoved,
    /// The settings screen was closed; persist `GameState::settings`
    SettingsChanged,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Window size in pixels (snapped to whole cells after a resize)
    pub window: UVec2,
    pub grid: Grid,
    pub snake: Snake,
    pub food: IVec2,
    pub score: u64,
    /// Best score, including the current run once it is beaten
    pub high_score: u64,
    pub game_over_reason: Option<GameOverReason>,
    /// The ended run beat the previous record (ties don't count)
    pub new_high_score: bool,
    /// The autopilot steered at some point this run; such runs never set a
    /// record
    pub assisted: bool,
    /// Visual particles (not gameplay-affecting)
    pub particles: ParticleSystem,
    pub settings: Settings,
    /// Selected row on the settings screen
    pub settings_cursor: SettingsField,
    /// Frames spent on the menu (title animation)
    pub menu_ticks: u64,
    /// Frames since the run ended (overlay fade-in)
    pub game_over_ticks: u64,
    /// Autopilot steers the snake
    pub demo_mode: bool,
    /// Pending events, drained by the platform layer
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game at the default window size, showing the menu
    pub fn new(seed: u64, settings: Settings, high_score: u64) -> Self {
        Self::with_window(seed, settings, high_score, DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_window(
        seed: u64,
        settings: Settings,
        high_score: u64,
        width: u32,
        height: u32,
    ) -> Self {
        let grid = Grid::recompute(width, height, CELL_SIZE);
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            window: UVec2::new(width, height),
            grid,
            snake: Snake::new(grid.center()),
            food: IVec2::ZERO,
            score: 0,
            high_score,
            game_over_reason: None,
            new_high_score: false,
            assisted: false,
            particles: ParticleSystem::new(settings.particles),
            settings,
            settings_cursor: SettingsField::default(),
            menu_ticks: 0,
            game_over_ticks: 0,
            demo_mode: false,
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Start a fresh board: centered idle snake, new food, zero score
    pub fn reset(&mut self) {
        self.grid = Grid::recompute(self.window.x, self.window.y, CELL_SIZE);
        self.snake = Snake::new(self.grid.center());
        self.respawn_food();
        self.score = 0;
        self.game_over_reason = None;
        self.new_high_score = false;
        self.assisted = false;
        self.particles.clear();
        self.menu_ticks = 0;
        self.game_over_ticks = 0;
        log::debug!(
            "Board reset: {}x{} cells, food at {}",
            self.grid.width,
            self.grid.height,
            self.food
        );
    }

    /// End the run: record the reason and high score, burst at the head
    pub fn game_over(&mut self, reason: GameOverReason) {
        self.game_over_reason = Some(reason);
        let assisted = self.assisted || self.demo_mode;
        let new_high_score = !assisted && self.score > self.high_score;
        if new_high_score {
            self.high_score = self.score;
        }
        self.new_high_score = new_high_score;
        self.phase = GamePhase::GameOver;
        self.game_over_ticks = 0;
        if let Some(head) = self.snake.head() {
            let center = self.grid.cell_center(head);
            self.particles
                .spawn_explosion(center, Tint::Danger, DEATH_PARTICLES, &mut self.rng);
        }

        log::info!("Game over: {} (score {})", reason, self.score);
        self.events.push(GameEvent::GameOver {
            reason,
            score: self.score,
            new_high_score,
        });
    }

    /// Place food on a cell the snake doesn't cover
    pub fn respawn_food(&mut self) {
        self.food = food::spawn(&self.grid, &self.snake.occupied(), &mut self.rng);
    }

    /// Frames per second for the current score
    pub fn current_speed(&self) -> u32 {
        let bonus = if self.settings.speed_increase {
            (self.score / SPEED_SCORE_STEP) as u32
        } else {
            0
        };
        self.settings.base_speed.max(MIN_BASE_SPEED).saturating_add(bonus)
    }

    /// Milliseconds between frames at the current speed
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / self.current_speed() as f64
    }

    /// Push settings-dependent values into the subsystems
    pub fn apply_settings(&mut self) {
        self.particles.enabled = self.settings.particles;
        if !self.settings.particles {
            self.particles.clear();
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// The run just ended with a score above the previous record
    pub fn is_new_high_score(&self) -> bool {
        self.phase == GamePhase::GameOver && self.new_high_score
    }
}
