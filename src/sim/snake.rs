//! Snake body, steering and the per-step movement rules

use std::collections::{HashSet, VecDeque};
use std::fmt;

use glam::IVec2;

use super::grid::Grid;

/// Logical steering input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Heading {
    Up,
    Down,
    Left,
    Right,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::Up, Heading::Down, Heading::Left, Heading::Right];

    /// Movement delta for one step (screen y grows downward)
    pub fn delta(self, cell_size: i32) -> IVec2 {
        match self {
            Heading::Up => IVec2::new(0, -cell_size),
            Heading::Down => IVec2::new(0, cell_size),
            Heading::Left => IVec2::new(-cell_size, 0),
            Heading::Right => IVec2::new(cell_size, 0),
        }
    }

    /// Heading matching a non-zero axis-aligned delta
    pub fn from_delta(delta: IVec2) -> Option<Self> {
        match (delta.x.signum(), delta.y.signum()) {
            (0, -1) => Some(Heading::Up),
            (0, 1) => Some(Heading::Down),
            (-1, 0) => Some(Heading::Left),
            (1, 0) => Some(Heading::Right),
            _ => None,
        }
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    HitWall,
    AteSelf,
    /// A resize left the head outside the play-field
    ResizedOutOfBounds,
}

impl GameOverReason {
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::HitWall => "Hit the wall!",
            GameOverReason::AteSelf => "Ate yourself!",
            GameOverReason::ResizedOutOfBounds => "Screen resized - snake out of bounds!",
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Outcome of a single step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// No direction yet, nothing moved
    Idle,
    Continue,
    /// Head landed on the food; the tail stayed, so the snake grew by one
    AteFood,
    GameOver(GameOverReason),
}

/// The player's snake, head first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<IVec2>,
    direction: IVec2,
    next_direction: IVec2,
}

impl Snake {
    /// A one-segment snake that is not moving yet
    pub fn new(head: IVec2) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction: IVec2::ZERO,
            next_direction: IVec2::ZERO,
        }
    }

    /// Build a snake from head-first segments already travelling in `direction`
    pub fn from_segments(segments: impl IntoIterator<Item = IVec2>, direction: IVec2) -> Self {
        Self {
            body: segments.into_iter().collect(),
            direction,
            next_direction: IVec2::ZERO,
        }
    }

    pub fn head(&self) -> Option<IVec2> {
        self.body.front().copied()
    }

    pub fn segments(&self) -> &VecDeque<IVec2> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        self.body.contains(&pos)
    }

    /// Cells covered by the body, for food placement
    pub fn occupied(&self) -> HashSet<IVec2> {
        self.body.iter().copied().collect()
    }

    /// Committed direction of travel
    pub fn direction(&self) -> IVec2 {
        self.direction
    }

    /// Turn waiting for the next step
    pub fn next_direction(&self) -> IVec2 {
        self.next_direction
    }

    pub fn is_moving(&self) -> bool {
        self.direction != IVec2::ZERO
    }

    /// Buffer a turn. Only perpendicular turns are accepted: the requested
    /// axis must be the one that is currently zero. Reversals and repeats are
    /// ignored. Returns whether the turn was buffered.
    pub fn turn(&mut self, requested: IVec2) -> bool {
        let horizontal = requested.x != 0 && requested.y == 0;
        let vertical = requested.y != 0 && requested.x == 0;
        let accepted =
            (horizontal && self.direction.x == 0) || (vertical && self.direction.y == 0);
        if accepted {
            self.next_direction = requested;
        }
        accepted
    }

    pub fn steer(&mut self, heading: Heading, cell_size: i32) -> bool {
        self.turn(heading.delta(cell_size))
    }

    /// Advance one cell.
    ///
    /// Self-collision is tested against the body before the tail moves, so
    /// stepping into the cell the tail is about to leave still ends the game.
    pub fn step(&mut self, food: IVec2, grid: &Grid) -> StepResult {
        if self.next_direction != IVec2::ZERO {
            self.direction = self.next_direction;
        }
        if self.direction == IVec2::ZERO {
            return StepResult::Idle;
        }
        let Some(head) = self.head() else {
            return StepResult::Idle;
        };

        let new_head = head + self.direction;
        if !grid.contains(new_head) {
            return StepResult::GameOver(GameOverReason::HitWall);
        }
        if self.body.contains(&new_head) {
            return StepResult::GameOver(GameOverReason::AteSelf);
        }

        self.body.push_front(new_head);
        if new_head == food {
            StepResult::AteFood
        } else {
            self.body.pop_back();
            StepResult::Continue
        }
    }

    /// Drop segments outside `grid`, keeping order.
    ///
    /// Returns false and leaves the body untouched when nothing survives or
    /// the head would be lost. Surviving segments may have gaps between them.
    pub fn clip_to(&mut self, grid: &Grid) -> bool {
        let Some(head) = self.head() else {
            return false;
        };
        let kept: VecDeque<IVec2> = self.body.iter().copied().filter(|p| grid.contains(*p)).collect();
        if kept.is_empty() || !kept.contains(&head) {
            return false;
        }
        self.body = kept;
        true
    }
}
