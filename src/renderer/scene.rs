//! Scene building: game state to pixel-space triangles
//!
//! Pure and platform independent so it can be tested natively. Text is not
//! drawn here; the front-end overlays it.

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GamePhase, GameState, Tint};

/// Menu background stripe spacing and width (pixels)
const STRIPE_SPACING: u32 = 50;
const STRIPE_WIDTH: f32 = 2.0;
/// Peak stripe opacity
const STRIPE_ALPHA: f32 = 30.0 / 255.0;

const PAUSE_OVERLAY_ALPHA: f32 = 128.0 / 255.0;
/// Game-over overlay fades in by this much per frame, up to the max
const GAME_OVER_FADE_PER_TICK: f32 = 3.0;
const GAME_OVER_OVERLAY_MAX: f32 = 150.0;

const CIRCLE_SEGMENTS: u32 = 12;

/// Build all triangles for the current frame
pub fn build(state: &GameState, time_ms: f64) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(1024);

    match state.phase {
        GamePhase::Menu | GamePhase::Settings => menu_background(state, &mut vertices),
        GamePhase::Playing | GamePhase::Paused | GamePhase::GameOver => {
            if state.settings.grid_visible {
                grid_lines(state, &mut vertices);
            }
            snake(state, &mut vertices);
            food(state, time_ms, &mut vertices);
            particles(state, &mut vertices);

            if let Some(alpha) = overlay_alpha(state) {
                let size = state.window.as_vec2();
                vertices.extend(shapes::rect(
                    Vec2::ZERO,
                    size,
                    colors::with_alpha(colors::BLACK, alpha),
                ));
            }
        }
    }

    vertices
}

/// Dimming over the board, if any
pub fn overlay_alpha(state: &GameState) -> Option<f32> {
    match state.phase {
        GamePhase::Paused => Some(PAUSE_OVERLAY_ALPHA),
        GamePhase::GameOver => {
            let fade = (state.game_over_ticks as f32 * GAME_OVER_FADE_PER_TICK)
                .min(GAME_OVER_OVERLAY_MAX);
            Some(fade / 255.0)
        }
        _ => None,
    }
}

fn menu_background(state: &GameState, out: &mut Vec<Vertex>) {
    let height = state.window.y as f32;
    for x in (0..state.window.x).step_by(STRIPE_SPACING as usize) {
        let phase = (x as f32 + state.menu_ticks as f32) * 0.01;
        let alpha = phase.sin().abs() * STRIPE_ALPHA;
        out.extend(shapes::rect(
            Vec2::new(x as f32, 0.0),
            Vec2::new(STRIPE_WIDTH, height),
            colors::with_alpha(colors::ACCENT, alpha),
        ));
    }
}

fn grid_lines(state: &GameState, out: &mut Vec<Vertex>) {
    let size = state.window.as_vec2();
    let step = state.grid.cell_size.max(1) as usize;
    for x in (0..state.window.x).step_by(step) {
        out.extend(shapes::rect(
            Vec2::new(x as f32, 0.0),
            Vec2::new(1.0, size.y),
            colors::GRID,
        ));
    }
    for y in (0..state.window.y).step_by(step) {
        out.extend(shapes::rect(
            Vec2::new(0.0, y as f32),
            Vec2::new(size.x, 1.0),
            colors::GRID,
        ));
    }
}

/// Segment color: head is bright, body fades toward the tail color
pub fn segment_color(index: usize, len: usize) -> [f32; 4] {
    if index == 0 {
        return colors::SNAKE_HEAD;
    }
    let ratio = (len - index) as f32 / len as f32;
    colors::lerp(colors::SNAKE_TAIL, colors::SNAKE_BODY, ratio)
}

fn snake(state: &GameState, out: &mut Vec<Vertex>) {
    let cell = Vec2::splat(state.grid.cell_size as f32);
    let len = state.snake.len();
    for (i, segment) in state.snake.segments().iter().enumerate() {
        let inset = if i == 0 { 2.0 } else { 1.0 };
        out.extend(shapes::inset_rect(
            segment.as_vec2(),
            cell,
            inset,
            segment_color(i, len),
        ));
    }
}

fn food(state: &GameState, time_ms: f64, out: &mut Vec<Vertex>) {
    let cell = state.grid.cell_size as f32;
    let pulse = ((time_ms * 0.005).sin().abs() * 3.0) as f32;
    let center = state.grid.cell_center(state.food);

    let glow_radius = (cell + 10.0 + pulse) / 2.0;
    let glow_alpha = (30.0 + pulse * 5.0) / 255.0;
    out.extend(shapes::glow(
        center,
        glow_radius,
        colors::with_alpha(colors::FOOD, glow_alpha),
        CIRCLE_SEGMENTS * 2,
    ));

    let size = cell - 4.0 + pulse;
    out.extend(shapes::rect(
        center - Vec2::splat(size / 2.0),
        Vec2::splat(size),
        colors::FOOD,
    ));
}

fn particles(state: &GameState, out: &mut Vec<Vertex>) {
    for particle in state.particles.iter() {
        let color = match particle.tint {
            Tint::Success => colors::SUCCESS,
            Tint::Danger => colors::FOOD,
        };
        out.extend(shapes::circle(
            particle.pos,
            particle.size,
            colors::with_alpha(color, particle.alpha()),
            CIRCLE_SEGMENTS,
        ));
    }
}
