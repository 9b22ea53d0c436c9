//! Demo mode steering
//!
//! Greedy: head for the food along whichever legal move gets closest, never
//! stepping into a wall or the body when another option exists.

use glam::IVec2;

use super::snake::Heading;
use super::state::GameState;

/// Pick the heading to steer toward, or None when every move is fatal
pub fn choose(state: &GameState) -> Option<Heading> {
    let head = state.snake.head()?;
    let direction = state.snake.direction();
    let current = Heading::from_delta(direction);
    let cell = state.grid.cell_size;

    Heading::ALL
        .into_iter()
        .filter(|heading| {
            let delta = heading.delta(cell);
            direction == IVec2::ZERO || delta == direction || delta.dot(direction) == 0
        })
        .filter(|heading| {
            let next = head + heading.delta(cell);
            state.grid.contains(next) && !state.snake.contains(next)
        })
        .min_by_key(|heading| {
            let next = head + heading.delta(cell);
            let distance = (state.food - next).abs();
            (distance.x + distance.y, Some(*heading) != current)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::sim::snake::Snake;
    use crate::sim::state::GamePhase;
    use crate::sim::tick::tick;

    const CELL: i32 = 25;

    fn state_with(segments: &[IVec2], direction: IVec2, food: IVec2) -> GameState {
        let mut state = GameState::with_window(3, Settings::default(), 0, 250, 250);
        state.snake = Snake::from_segments(segments.iter().copied(), direction);
        state.food = food;
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_heads_for_food_when_idle() {
        let state = state_with(&[IVec2::new(100, 100)], IVec2::ZERO, IVec2::new(100, 200));
        assert_eq!(choose(&state), Some(Heading::Down));
    }

    #[test]
    fn test_keeps_heading_on_tie() {
        // Food straight ahead and one row up: both Right and Up close in by one
        let state = state_with(
            &[IVec2::new(100, 100), IVec2::new(75, 100)],
            IVec2::new(CELL, 0),
            IVec2::new(150, 75),
        );
        assert_eq!(choose(&state), Some(Heading::Right));
    }

    #[test]
    fn test_never_reverses() {
        let state = state_with(
            &[IVec2::new(100, 100), IVec2::new(75, 100)],
            IVec2::new(CELL, 0),
            IVec2::new(0, 100),
        );
        assert_ne!(choose(&state), Some(Heading::Left));
    }

    #[test]
    fn test_avoids_wall() {
        // Right edge, food beyond reach to the right is impossible; must turn
        let state = state_with(&[IVec2::new(225, 100)], IVec2::new(CELL, 0), IVec2::new(225, 0));
        assert_eq!(choose(&state), Some(Heading::Up));
    }

    #[test]
    fn test_boxed_in_returns_none() {
        // Top-left corner moving up with the body blocking the right
        let state = state_with(
            &[IVec2::new(0, 0), IVec2::new(0, 25), IVec2::new(25, 25), IVec2::new(25, 0)],
            IVec2::new(0, -CELL),
            IVec2::new(200, 200),
        );
        assert_eq!(choose(&state), None);
    }

    #[test]
    fn test_demo_run_eats_food() {
        let mut state = GameState::with_window(21, Settings::default(), 0, 250, 250);
        state.demo_mode = true;
        state.reset();
        state.phase = GamePhase::Playing;
        for _ in 0..200 {
            tick(&mut state);
            if state.phase != GamePhase::Playing {
                break;
            }
        }
        assert!(state.score > 0);
    }
}
