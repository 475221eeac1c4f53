//! Connector geometry that particles travel along.

use glam::Vec2;

/// A straight or S-curved connector between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionPath {
    /// Where travel begins.
    pub start: Vec2,
    /// Where travel ends.
    pub end: Vec2,
    /// Bend through horizontal-midpoint control points instead of a line.
    pub curved: bool,
}

impl ConnectionPath {
    /// Straight connector.
    pub fn straight(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            curved: false,
        }
    }

    /// Curved connector leaving and arriving horizontally.
    pub fn curved(start: Vec2, end: Vec2) -> Self {
        Self {
            start,
            end,
            curved: true,
        }
    }

    /// Cubic Bezier control points. Straight paths use the thirds of the
    /// segment, which traces the same line.
    pub fn control_points(&self) -> (Vec2, Vec2) {
        if self.curved {
            let mid_x = (self.start.x + self.end.x) * 0.5;
            (Vec2::new(mid_x, self.start.y), Vec2::new(mid_x, self.end.y))
        } else {
            (
                self.start.lerp(self.end, 1.0 / 3.0),
                self.start.lerp(self.end, 2.0 / 3.0),
            )
        }
    }

    /// Point at travel progress `t`, clamped to [0, 1].
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        if !self.curved {
            return self.start.lerp(self.end, t);
        }
        let (c1, c2) = self.control_points();
        let u = 1.0 - t;
        self.start * (u * u * u)
            + c1 * (3.0 * u * u * t)
            + c2 * (3.0 * u * t * t)
            + self.end * (t * t * t)
    }

    /// Rough arc length from `segments` chords.
    pub fn length(&self, segments: usize) -> f32 {
        let segments = segments.max(1);
        let mut total = 0.0;
        let mut prev = self.start;
        for i in 1..=segments {
            let next = self.point_at(i as f32 / segments as f32);
            total += prev.distance(next);
            prev = next;
        }
        total
    }
}
