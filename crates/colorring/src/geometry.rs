use crate::config::SelectorConfig;

pub const FULL_TURN: f64 = 360.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `2 * half_side` centered on `center`.
    pub fn centered(center: Point, half_side: f64) -> Self {
        Self::new(
            center.x - half_side,
            center.y - half_side,
            half_side * 2.0,
            half_side * 2.0,
        )
    }
}

/// Folds any angle in degrees into `[0, 360)`.
///
/// Non-finite input has no meaningful direction and maps to 0.
pub fn normalize_degrees(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let normalized = angle.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly a full turn
    if normalized >= FULL_TURN {
        0.0
    } else {
        normalized
    }
}

/// Ring layout derived from the widget bounds. Nothing here outlives a resize:
/// every field is recomputed by [`Geometry::calculate`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub thumb_radius: f64,
    pub scale_factor: f64,
}

impl Geometry {
    pub fn calculate(width: f64, height: f64, config: &SelectorConfig, scale_factor: f64) -> Self {
        let (width, height) = (width.max(0.0), height.max(0.0));
        let center = Point::new(width / 2.0, height / 2.0);
        let outer_radius = (width.min(height) / 2.0 - config.outer_margin * scale_factor).max(0.0);
        let inner_radius = (outer_radius - config.ring_thickness * scale_factor).max(0.0);

        Self {
            center,
            outer_radius,
            inner_radius,
            thumb_radius: config.thumb.radius * scale_factor,
            scale_factor,
        }
    }

    /// Radius of the circle the thumb travels on.
    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Presses farther than this from the center are ignored.
    pub fn touch_radius(&self) -> f64 {
        self.mid_radius() + self.thumb_radius
    }

    pub fn accepts(&self, point: Point) -> bool {
        self.center.distance_to(point) <= self.touch_radius()
    }

    pub fn angle_of(&self, point: Point) -> f64 {
        let (dx, dy) = (point.x - self.center.x, point.y - self.center.y);
        normalize_degrees(dy.atan2(dx).to_degrees())
    }

    pub fn point_at(&self, angle: f64, radius: f64) -> Point {
        let rad = angle.to_radians();
        Point::new(
            self.center.x + radius * rad.cos(),
            self.center.y + radius * rad.sin(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.outer_radius <= 0.0
    }
}
