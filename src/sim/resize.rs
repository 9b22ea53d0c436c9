//! Window resize handling
//!
//! The window is snapped to whole cells and never smaller than the minimum
//! size. Positions are validated while a run is active; a paused board is
//! drawn as it was and checked when play resumes.

use glam::UVec2;

use super::grid::Grid;
use super::snake::GameOverReason;
use super::state::{GamePhase, GameState};
use crate::consts::*;

/// Clamp to the minimum window and round each side down to a cell multiple
pub fn snap_window(width: u32, height: u32) -> UVec2 {
    let cell = CELL_SIZE.max(1) as u32;
    let snap = |value: u32, min: u32| {
        let value = value.max(min);
        value - value % cell
    };
    UVec2::new(snap(width, MIN_WIDTH), snap(height, MIN_HEIGHT))
}

/// Apply a new window size. Returns the snapped size the front-end should
/// adopt.
pub fn resize(state: &mut GameState, width: u32, height: u32) -> UVec2 {
    let size = snap_window(width, height);
    state.window = size;
    state.grid = Grid::recompute(size.x, size.y, CELL_SIZE);
    log::debug!(
        "Resized to {}x{} ({}x{} cells)",
        size.x,
        size.y,
        state.grid.width,
        state.grid.height
    );

    if state.phase == GamePhase::Playing {
        validate_bounds(state);
    }
    size
}

/// Bring food and snake back inside the current grid. Food is respawned if
/// it fell off; the snake is clipped, and losing the head ends the run.
pub(crate) fn validate_bounds(state: &mut GameState) {
    if !state.grid.contains(state.food) {
        state.respawn_food();
    }
    if !state.snake.clip_to(&state.grid) {
        state.game_over(GameOverReason::ResizedOutOfBounds);
    }
}
