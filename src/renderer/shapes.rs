//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::consts::{BASE_SPEED, JERK_SPEED};
use crate::sim::Rect;
use crate::sim::state::TrailPoint;

/// Interpolate color based on speed (slow=blue, medium=green, fast=red)
fn velocity_color(speed: f32, alpha: f32) -> [f32; 4] {
    // Normalize speed to 0-1 over the envelope the sim actually produces
    let t = ((speed - BASE_SPEED) / (JERK_SPEED - BASE_SPEED)).clamp(0.0, 1.0);

    let (r, g, b) = if t < 0.5 {
        // Blue to green
        let u = t / 0.5;
        (0.2, 0.4 + 0.4 * u, 1.0 - 0.6 * u)
    } else {
        // Green to red
        let u = (t - 0.5) / 0.5;
        (0.2 + 0.8 * u, 0.8 - 0.4 * u, 0.4 - 0.2 * u)
    };

    [r, g, b, alpha]
}

/// Generate vertices for a ball trail with velocity-based colors
/// (points are newest first)
pub fn ball_trail(trail: &[TrailPoint], ball_radius: f32) -> Vec<Vertex> {
    if trail.len() < 2 {
        return Vec::new();
    }

    let mut vertices = Vec::with_capacity(trail.len() * 6);
    let trail_len = trail.len() as f32;

    for i in 0..trail.len() - 1 {
        let p1 = &trail[i];
        let p2 = &trail[i + 1];

        // Fade alpha and width toward the tail
        let t1 = i as f32 / trail_len;
        let t2 = (i + 1) as f32 / trail_len;

        let alpha1 = (1.0 - t1) * 0.8;
        let alpha2 = (1.0 - t2) * 0.8;

        let width1 = ball_radius * (1.0 - t1 * 0.7);
        let width2 = ball_radius * (1.0 - t2 * 0.7);

        let color1 = velocity_color(p1.speed, alpha1);
        let color2 = velocity_color(p2.speed, alpha2);

        let dir = (p2.pos - p1.pos).normalize_or_zero();
        let perp = Vec2::new(-dir.y, dir.x);

        let v1a = p1.pos + perp * width1;
        let v1b = p1.pos - perp * width1;
        let v2a = p2.pos + perp * width2;
        let v2b = p2.pos - perp * width2;

        vertices.push(Vertex::new(v1a.x, v1a.y, color1));
        vertices.push(Vertex::new(v1b.x, v1b.y, color1));
        vertices.push(Vertex::new(v2a.x, v2a.y, color2));

        vertices.push(Vertex::new(v2a.x, v2a.y, color2));
        vertices.push(Vertex::new(v1b.x, v1b.y, color1));
        vertices.push(Vertex::new(v2b.x, v2b.y, color2));
    }

    vertices
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

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

/// Generate vertices for a filled axis-aligned rect (two triangles)
pub fn quad(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t) = (rect.left(), rect.top());
    let (r, b) = (rect.right(), rect.bottom());

    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_vertex_count() {
        let verts = quad(&Rect::new(0.0, 0.0, 10.0, 10.0), [1.0; 4]);
        assert_eq!(verts.len(), 6);
    }

    #[test]
    fn test_circle_vertex_count() {
        let verts = circle(Vec2::ZERO, 10.0, [1.0; 4], 12);
        assert_eq!(verts.len(), 36);
    }

    #[test]
    fn test_trail_needs_two_points() {
        let one = [TrailPoint {
            pos: Vec2::ZERO,
            speed: 7.0,
        }];
        assert!(ball_trail(&one, 10.0).is_empty());

        let two = [
            TrailPoint {
                pos: Vec2::new(0.0, 0.0),
                speed: 7.0,
            },
            TrailPoint {
                pos: Vec2::new(10.0, 0.0),
                speed: 7.0,
            },
        ];
        assert_eq!(ball_trail(&two, 10.0).len(), 6);
    }
}
