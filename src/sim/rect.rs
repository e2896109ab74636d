//! Axis-aligned rectangle geometry for balls, paddles, and tokens
//!
//! A rect is a top-left corner plus a size. The play area uses screen
//! coordinates: origin at the top-left, y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Build a rect around a center point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size * 0.5,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Center point
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Overlap test; rects that merely touch along an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Grow by (dx, dy) total, keeping the center fixed
    pub fn inflate(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            pos: self.pos - Vec2::new(dx, dy) * 0.5,
            size: self.size + Vec2::new(dx, dy),
        }
    }
}

/// Clamp a top-left position so a body of the given size stays inside the
/// play area
pub fn clamp_to_arena(pos: Vec2, size: Vec2, arena_w: f32, arena_h: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(0.0, arena_w - size.x),
        pos.y.clamp(0.0, arena_h - size.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        let c = Rect::new(20.0, 20.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let r = Rect::new(10.0, 20.0, 48.0, 48.0);
        let grown = r.inflate(10.0, 10.0);
        assert_eq!(r.center(), grown.center());
        assert!((grown.size.x - 58.0).abs() < 1e-6);
        assert!((grown.size.y - 58.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 50.0), Vec2::new(48.0, 48.0));
        assert_eq!(r.pos, Vec2::new(76.0, 26.0));
        assert_eq!(r.center(), Vec2::new(100.0, 50.0));
    }

    #[test]
    fn test_clamp_to_arena() {
        let size = Vec2::new(20.0, 20.0);
        let clamped = clamp_to_arena(Vec2::new(-5.0, 500.0), size, 800.0, 480.0);
        assert_eq!(clamped, Vec2::new(0.0, 460.0));
        let inside = clamp_to_arena(Vec2::new(100.0, 100.0), size, 800.0, 480.0);
        assert_eq!(inside, Vec2::new(100.0, 100.0));
    }
}
