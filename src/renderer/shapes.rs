//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Generate vertices for an axis-aligned filled rectangle
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Rectangle shrunk by `inset` pixels on every side
pub fn inset_rect(min: Vec2, size: Vec2, inset: f32, color: [f32; 4]) -> Vec<Vertex> {
    let inner = (size - Vec2::splat(inset * 2.0)).max(Vec2::ZERO);
    rect(min + Vec2::splat(inset), inner, color)
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Circle fading from `color` at the center to transparent at the edge
pub fn glow(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let edge = [color[0], color[1], color[2], 0.0];
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            edge,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            edge,
        ));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_corners() {
        let v = rect(Vec2::new(10.0, 20.0), Vec2::new(5.0, 5.0), [1.0; 4]);
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 20.0]);
        assert_eq!(v[5].position, [15.0, 25.0]);
    }

    #[test]
    fn test_inset_never_inverts() {
        let v = inset_rect(Vec2::ZERO, Vec2::splat(2.0), 5.0, [1.0; 4]);
        assert_eq!(v[0].position, [5.0, 5.0]);
        assert_eq!(v[5].position, [5.0, 5.0]);
    }

    #[test]
    fn test_circle_radius() {
        let v = circle(Vec2::new(50.0, 50.0), 10.0, [1.0; 4], 12);
        assert_eq!(v.len(), 36);
        for rim in v.iter().skip(1).step_by(3) {
            let d = Vec2::from(rim.position).distance(Vec2::new(50.0, 50.0));
            assert!((d - 10.0).abs() < 1e-3);
        }
    }
}
