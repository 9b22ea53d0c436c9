//! Frame tick and input dispatch
//!
//! `handle_action` applies one logical input to the state machine, `tick`
//! advances one frame. Both are deterministic for a given seed.

use super::autopilot;
use super::resize;
use super::particles::Tint;
use super::snake::{Heading, StepResult};
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Frames the demo lingers on the game-over screen before restarting
pub const DEMO_RESTART_TICKS: u64 = 40;

/// Logical input, already mapped from keys for the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Turn(Heading),
    Confirm,
    PauseResume,
    Restart,
    Menu,
    Settings,
    Quit,
    /// Autopilot on/off
    ToggleDemo,
}

/// Whether the front-end should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Apply one action to the state machine. Actions a screen doesn't handle
/// are ignored.
pub fn handle_action(state: &mut GameState, action: Action) -> Flow {
    if action == Action::ToggleDemo {
        state.demo_mode = !state.demo_mode;
        log::info!("Demo mode {}", if state.demo_mode { "on" } else { "off" });
        return Flow::Continue;
    }

    match (state.phase, action) {
        (GamePhase::Menu, Action::Confirm) => start(state),
        (GamePhase::Menu, Action::Settings) => {
            state.phase = GamePhase::Settings;
        }
        (GamePhase::Menu, Action::Quit) | (GamePhase::GameOver, Action::Quit) => {
            return Flow::Exit;
        }

        (GamePhase::Playing, Action::PauseResume) => {
            state.phase = GamePhase::Paused;
            state.events.push(GameEvent::Paused);
        }
        (GamePhase::Playing, Action::Restart) => start(state),
        (GamePhase::Playing, Action::Turn(heading)) => {
            state.snake.steer(heading, state.grid.cell_size);
        }

        (GamePhase::Paused, Action::PauseResume | Action::Confirm) => {
            state.phase = GamePhase::Playing;
            state.events.push(GameEvent::Resumed);
            // The window may have changed while paused
            resize::validate_bounds(state);
        }
        (GamePhase::Paused, Action::Menu) | (GamePhase::GameOver, Action::Menu) => {
            state.phase = GamePhase::Menu;
            state.menu_ticks = 0;
        }
        (GamePhase::Paused, Action::Restart) => start(state),

        (GamePhase::GameOver, Action::Restart | Action::Confirm) => start(state),

        (GamePhase::Settings, action) => return settings_action(state, action),

        _ => {}
    }
    Flow::Continue
}

fn start(state: &mut GameState) {
    state.reset();
    state.phase = GamePhase::Playing;
    state.events.push(GameEvent::Started);
    log::info!("Game started (speed {})", state.current_speed());
}

fn settings_action(state: &mut GameState, action: Action) -> Flow {
    let field = state.settings_cursor;
    match action {
        Action::Turn(Heading::Up) => state.settings_cursor = field.prev(),
        Action::Turn(Heading::Down) => state.settings_cursor = field.next(),
        Action::Turn(Heading::Left) => state.settings.adjust(field, -1),
        Action::Turn(Heading::Right) => state.settings.adjust(field, 1),
        Action::Confirm => state.settings.toggle(field),
        Action::Menu | Action::PauseResume => {
            state.apply_settings();
            state.phase = GamePhase::Menu;
            state.menu_ticks = 0;
            state.events.push(GameEvent::SettingsChanged);
            return Flow::Continue;
        }
        _ => return Flow::Continue,
    }
    state.apply_settings();
    state.events.push(GameEvent::CursorMoved);
    Flow::Continue
}

/// Advance one frame
pub fn tick(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => play_step(state),
        GamePhase::Menu => {
            state.menu_ticks += 1;
            if state.demo_mode {
                start(state);
            }
        }
        GamePhase::GameOver => {
            state.game_over_ticks += 1;
            if state.demo_mode && state.game_over_ticks >= DEMO_RESTART_TICKS {
                start(state);
            }
        }
        GamePhase::Paused | GamePhase::Settings => {}
    }

    state.particles.update();
}

fn play_step(state: &mut GameState) {
    if state.demo_mode {
        state.assisted = true;
        if let Some(heading) = autopilot::choose(state) {
            state.snake.steer(heading, state.grid.cell_size);
        }
    }

    let eaten = state.food;
    match state.snake.step(eaten, &state.grid) {
        StepResult::Idle => return,
        StepResult::Continue => {}
        StepResult::AteFood => {
            state.score += 1;
            let center = state.grid.cell_center(eaten);
            state
                .particles
                .spawn_explosion(center, Tint::Success, EAT_PARTICLES, &mut state.rng);
            state.respawn_food();
            state.events.push(GameEvent::FoodEaten { score: state.score });
            log::debug!("Ate food, score {} next food {}", state.score, state.food);
        }
        StepResult::GameOver(reason) => {
            state.game_over(reason);
            return;
        }
    }

    let food_center = state.grid.cell_center(state.food);
    state
        .particles
        .spawn_food_ambient(food_center, &mut state.rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{Settings, SettingsField};
    use crate::sim::snake::{GameOverReason, Snake};
    use glam::IVec2;

    fn state() -> GameState {
        GameState::with_window(12345, Settings::default(), 0, 250, 250)
    }

    fn playing() -> GameState {
        let mut state = state();
        handle_action(&mut state, Action::Confirm);
        state.drain_events();
        state
    }

    #[test]
    fn test_menu_to_playing() {
        let mut state = state();
        assert_eq!(handle_action(&mut state, Action::Confirm), Flow::Continue);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.drain_events(), vec![GameEvent::Started]);
    }

    #[test]
    fn test_quit_only_from_menu_and_game_over() {
        let mut state = state();
        assert_eq!(handle_action(&mut state, Action::Quit), Flow::Exit);

        let mut state = playing();
        assert_eq!(handle_action(&mut state, Action::Quit), Flow::Continue);
        assert_eq!(state.phase, GamePhase::Playing);

        state.game_over(GameOverReason::HitWall);
        assert_eq!(handle_action(&mut state, Action::Quit), Flow::Exit);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut state = playing();
        handle_action(&mut state, Action::PauseResume);
        assert_eq!(state.phase, GamePhase::Paused);

        // Frozen while paused
        let snake = state.snake.clone();
        tick(&mut state);
        assert_eq!(state.snake, snake);

        handle_action(&mut state, Action::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        handle_action(&mut state, Action::PauseResume);
        handle_action(&mut state, Action::PauseResume);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(
            state.drain_events(),
            vec![
                GameEvent::Paused,
                GameEvent::Resumed,
                GameEvent::Paused,
                GameEvent::Resumed
            ]
        );
    }

    #[test]
    fn test_paused_to_menu_and_restart() {
        let mut state = playing();
        handle_action(&mut state, Action::PauseResume);
        handle_action(&mut state, Action::Menu);
        assert_eq!(state.phase, GamePhase::Menu);

        let mut state = playing();
        state.score = 4;
        handle_action(&mut state, Action::PauseResume);
        handle_action(&mut state, Action::Restart);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_ignored_actions() {
        let mut state = state();
        handle_action(&mut state, Action::Turn(Heading::Up));
        handle_action(&mut state, Action::PauseResume);
        handle_action(&mut state, Action::Restart);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(!state.snake.is_moving());
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_idle_snake_waits_for_input() {
        let mut state = playing();
        let head = state.snake.head();
        tick(&mut state);
        tick(&mut state);
        assert_eq!(state.snake.head(), head);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_eating_scores_and_bursts() {
        let mut state = playing();
        state.snake = Snake::from_segments([IVec2::new(50, 50)], IVec2::new(25, 0));
        state.food = IVec2::new(75, 50);

        tick(&mut state);
        assert_eq!(state.score, 1);
        assert_eq!(state.snake.len(), 2);
        assert!(!state.snake.contains(state.food));
        assert_eq!(state.particles.explosions().len(), EAT_PARTICLES);
        assert_eq!(state.drain_events(), vec![GameEvent::FoodEaten { score: 1 }]);
    }

    #[test]
    fn test_wall_ends_game() {
        let mut state = playing();
        state.snake = Snake::from_segments([IVec2::new(0, 0), IVec2::new(25, 0)], IVec2::new(-25, 0));
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::HitWall));

        tick(&mut state);
        assert_eq!(state.game_over_ticks, 1);

        handle_action(&mut state, Action::Confirm);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.game_over_reason, None);
    }

    #[test]
    fn test_turn_applies_on_next_tick() {
        let mut state = playing();
        let head = state.snake.head().unwrap();
        handle_action(&mut state, Action::Turn(Heading::Right));
        handle_action(&mut state, Action::Turn(Heading::Left));
        tick(&mut state);
        // Left was still perpendicular to the idle snake, so it replaced Right
        assert_eq!(state.snake.head(), Some(head + IVec2::new(-25, 0)));
    }

    #[test]
    fn test_settings_screen() {
        let mut state = state();
        handle_action(&mut state, Action::Settings);
        assert_eq!(state.phase, GamePhase::Settings);
        assert_eq!(state.settings_cursor, SettingsField::BaseSpeed);

        handle_action(&mut state, Action::Turn(Heading::Right));
        assert_eq!(state.settings.base_speed, 9);

        handle_action(&mut state, Action::Turn(Heading::Up));
        assert_eq!(state.settings_cursor, SettingsField::Sound);
        handle_action(&mut state, Action::Confirm);
        assert!(!state.settings.sound);

        handle_action(&mut state, Action::Turn(Heading::Up));
        assert_eq!(state.settings_cursor, SettingsField::Particles);
        handle_action(&mut state, Action::Turn(Heading::Left));
        assert!(!state.settings.particles);
        assert!(!state.particles.enabled);

        handle_action(&mut state, Action::Menu);
        assert_eq!(state.phase, GamePhase::Menu);
        let events = state.drain_events();
        assert_eq!(events.last(), Some(&GameEvent::SettingsChanged));
        assert_eq!(
            events.iter().filter(|e| **e == GameEvent::CursorMoved).count(),
            5
        );
    }

    #[test]
    fn test_toggle_demo_anywhere() {
        let mut state = playing();
        handle_action(&mut state, Action::ToggleDemo);
        assert!(state.demo_mode);
        assert_eq!(state.phase, GamePhase::Playing);
        handle_action(&mut state, Action::ToggleDemo);
        assert!(!state.demo_mode);
    }

    #[test]
    fn test_demo_starts_and_restarts() {
        let mut state = state();
        state.demo_mode = true;
        tick(&mut state);
        assert_eq!(state.phase, GamePhase::Playing);

        state.game_over(GameOverReason::AteSelf);
        for _ in 0..DEMO_RESTART_TICKS {
            tick(&mut state);
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_resume_after_paused_resize_revalidates() {
        let mut state = GameState::with_window(3, Settings::default(), 0, 1000, 700);
        handle_action(&mut state, Action::Confirm);
        let body = [IVec2::new(550, 300), IVec2::new(575, 300), IVec2::new(600, 300), IVec2::new(625, 300)];
        state.snake = Snake::from_segments(body, IVec2::new(-25, 0));
        state.food = IVec2::new(900, 600);

        handle_action(&mut state, Action::PauseResume);
        resize::resize(&mut state, 600, 400);
        assert_eq!(state.food, IVec2::new(900, 600));
        assert_eq!(state.snake.len(), 4);

        handle_action(&mut state, Action::PauseResume);
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(state.grid.contains(state.food));
        assert!(!state.snake.contains(state.food));
        let kept: Vec<_> = state.snake.segments().iter().copied().collect();
        assert_eq!(kept, vec![IVec2::new(550, 300), IVec2::new(575, 300)]);

        for _ in 0..3 {
            tick(&mut state);
        }
        assert!(state.grid.contains(state.food));
    }

    #[test]
    fn test_resume_with_head_off_grid_ends_run() {
        let mut state = GameState::with_window(3, Settings::default(), 0, 1000, 700);
        handle_action(&mut state, Action::Confirm);
        state.snake = Snake::from_segments([IVec2::new(650, 300), IVec2::new(675, 300)], IVec2::new(-25, 0));

        handle_action(&mut state, Action::PauseResume);
        resize::resize(&mut state, 600, 400);
        state.drain_events();
        handle_action(&mut state, Action::Confirm);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::ResizedOutOfBounds));
        assert!(matches!(
            state.drain_events().as_slice(),
            [GameEvent::Resumed, GameEvent::GameOver { .. }]
        ));
    }

    #[test]
    fn test_demo_runs_never_set_record() {
        let mut state = GameState::with_window(21, Settings::default(), 0, 250, 250);
        state.demo_mode = true;
        let mut ended = 0;
        for _ in 0..20_000 {
            tick(&mut state);
            for event in state.drain_events() {
                if let GameEvent::GameOver { new_high_score, .. } = event {
                    assert!(!new_high_score);
                    ended += 1;
                }
            }
        }
        assert!(ended > 0);
        assert_eq!(state.high_score, 0);
    }

    #[test]
    fn test_particles_update_in_every_state() {
        let mut state = playing();
        state.game_over(GameOverReason::HitWall);
        let before = state.particles.len();
        for _ in 0..100 {
            tick(&mut state);
        }
        assert!(before > 0);
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = state();
        let mut state2 = state();
        state1.demo_mode = true;
        state2.demo_mode = true;

        for _ in 0..300 {
            tick(&mut state1);
            tick(&mut state2);
        }

        assert_eq!(state1.snake, state2.snake);
        assert_eq!(state1.food, state2.food);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.particles.len(), state2.particles.len());
    }
}
