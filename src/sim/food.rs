//! Food placement
//!
//! Random trials first, then a deterministic scan so a crowded board still
//! finds the last free cells.

use std::collections::HashSet;

use glam::IVec2;
use rand::Rng;

use super::grid::Grid;
use crate::consts::FOOD_SPAWN_ATTEMPTS;

/// Pick a free cell for food.
///
/// If every cell is occupied the result is `(cell_size, cell_size)`, which
/// overlaps the snake. The board is full at that point so the overlap is
/// accepted.
pub fn spawn<R: Rng + ?Sized>(grid: &Grid, occupied: &HashSet<IVec2>, rng: &mut R) -> IVec2 {
    if grid.width > 0 && grid.height > 0 {
        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let pos = IVec2::new(
                rng.random_range(0..grid.width) * grid.cell_size,
                rng.random_range(0..grid.height) * grid.cell_size,
            );
            if !occupied.contains(&pos) {
                return pos;
            }
        }

        log::debug!(
            "Food trials exhausted ({} occupied of {}), scanning",
            occupied.len(),
            grid.cell_count()
        );
        if let Some(pos) = first_free(grid, occupied) {
            return pos;
        }
    }

    log::warn!("No free cell for food, using fallback position");
    IVec2::splat(grid.cell_size)
}

/// First unoccupied cell in row-major order
fn first_free(grid: &Grid, occupied: &HashSet<IVec2>) -> Option<IVec2> {
    grid.cells().find(|pos| !occupied.contains(pos))
}
