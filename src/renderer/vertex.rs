//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Pixel-space vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    const fn rgb(r: u8, g: u8, b: u8) -> [f32; 4] {
        [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
    }

    pub const BACKGROUND: [f32; 4] = rgb(15, 15, 23);
    pub const GRID: [f32; 4] = rgb(25, 25, 35);
    pub const SNAKE_HEAD: [f32; 4] = rgb(102, 252, 241);
    pub const SNAKE_BODY: [f32; 4] = rgb(56, 178, 172);
    pub const SNAKE_TAIL: [f32; 4] = rgb(34, 116, 112);
    pub const FOOD: [f32; 4] = rgb(239, 68, 68);
    pub const TEXT_PRIMARY: [f32; 4] = rgb(248, 250, 252);
    pub const TEXT_SECONDARY: [f32; 4] = rgb(148, 163, 184);
    pub const ACCENT: [f32; 4] = rgb(139, 92, 246);
    pub const SUCCESS: [f32; 4] = rgb(34, 197, 94);
    pub const WARNING: [f32; 4] = rgb(251, 191, 36);
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Same color, different opacity
    pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
        [color[0], color[1], color[2], alpha.clamp(0.0, 1.0)]
    }

    /// Linear blend, `t` = 0 gives `a`
    pub fn lerp(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
        let t = t.clamp(0.0, 1.0);
        [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
            a[3] + (b[3] - a[3]) * t,
        ]
    }

    /// CSS `rgb()` string, used for DOM text
    pub fn css(color: [f32; 4]) -> String {
        format!(
            "rgb({}, {}, {})",
            (color[0] * 255.0).round() as u8,
            (color[1] * 255.0).round() as u8,
            (color[2] * 255.0).round() as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::colors::*;

    #[test]
    fn test_palette_and_helpers() {
        assert_eq!(css(FOOD), "rgb(239, 68, 68)");
        assert_eq!(lerp(BLACK, TEXT_PRIMARY, 0.0), BLACK);
        assert_eq!(lerp(SNAKE_BODY, SNAKE_TAIL, 1.0), SNAKE_TAIL);
        assert_eq!(with_alpha(ACCENT, 2.0)[3], 1.0);
    }
}
