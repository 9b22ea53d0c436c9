//! Keyboard mapping
//!
//! Keys are DOM `KeyboardEvent.key` names. The same key means different
//! things on different screens, so lookups go through the current phase.

use crate::sim::{Action, GamePhase, Heading};

/// Arrow keys and WASD
fn heading_for_key(key: &str) -> Option<Heading> {
    match key {
        "ArrowUp" | "w" => Some(Heading::Up),
        "ArrowDown" | "s" => Some(Heading::Down),
        "ArrowLeft" | "a" => Some(Heading::Left),
        "ArrowRight" | "d" => Some(Heading::Right),
        _ => None,
    }
}

/// Map a key press to an action for the given screen
pub fn action_for_key(phase: GamePhase, key: &str) -> Option<Action> {
    let lowered;
    let key = if key.chars().count() == 1 {
        lowered = key.to_lowercase();
        lowered.as_str()
    } else {
        key
    };

    match phase {
        GamePhase::Menu => match key {
            " " | "Enter" => Some(Action::Confirm),
            "s" => Some(Action::Settings),
            "Escape" | "q" => Some(Action::Quit),
            "i" => Some(Action::ToggleDemo),
            _ => None,
        },
        GamePhase::Playing => match key {
            "Escape" => Some(Action::PauseResume),
            "r" => Some(Action::Restart),
            "i" => Some(Action::ToggleDemo),
            _ => heading_for_key(key).map(Action::Turn),
        },
        GamePhase::Paused => match key {
            " " | "Escape" => Some(Action::PauseResume),
            "m" => Some(Action::Menu),
            "r" => Some(Action::Restart),
            "i" => Some(Action::ToggleDemo),
            _ => None,
        },
        GamePhase::GameOver => match key {
            "r" | " " => Some(Action::Restart),
            "m" => Some(Action::Menu),
            "Escape" | "q" => Some(Action::Quit),
            "i" => Some(Action::ToggleDemo),
            _ => None,
        },
        GamePhase::Settings => match key {
            " " | "Enter" => Some(Action::Confirm),
            "Escape" | "m" => Some(Action::Menu),
            "i" => Some(Action::ToggleDemo),
            _ => heading_for_key(key).map(Action::Turn),
        },
    }
}

/// Keys whose browser default (scrolling) should be suppressed
pub fn is_game_key(key: &str) -> bool {
    matches!(
        key,
        " " | "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight"
    )
}
