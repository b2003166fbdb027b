//! Planar coordinate types.
//!
//! The sandbox works on a flat canvas measured in abstract "units" (the
//! browser version used pixels).  All distances are Euclidean.

/// A point on the simulation canvas.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance.  Use for comparisons; avoids the `sqrt`.
    #[inline]
    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        self.distance_sq(other).sqrt()
    }

    /// Linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    #[inline]
    pub fn lerp(self, other: Point, t: f32) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// Move up to `step` units towards `target`.
    ///
    /// Returns the new position and the distance actually covered, which is
    /// `min(step, distance(self, target))`.
    pub fn move_towards(self, target: Point, step: f32) -> (Point, f32) {
        let d = self.distance(target);
        if d <= step || d == 0.0 {
            (target, d)
        } else {
            (self.lerp(target, step / d), step)
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// The rectangular canvas `[0, width] × [0, height]`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub width:  f32,
    pub height: f32,
}

impl Bounds {
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// `true` if both dimensions are finite and strictly positive.
    pub fn is_valid(self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    #[inline]
    pub fn contains(self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }

    /// Clamp `p` onto the canvas.
    #[inline]
    pub fn clamp(self, p: Point) -> Point {
        Point {
            x: p.x.clamp(0.0, self.width),
            y: p.y.clamp(0.0, self.height),
        }
    }
}

impl Default for Bounds {
    /// The sandbox page's 800 × 600 canvas.
    fn default() -> Self {
        Self { width: 800.0, height: 600.0 }
    }
}
