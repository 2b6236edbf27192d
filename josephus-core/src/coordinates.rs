use serde::{Deserialize, Serialize};

const ANGLE_NUDGE: f64 = 1e-6;

/// Circle-local position; the circle center is the origin and `y` grows downward
/// like screen space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Normalizes an integer angle in degrees into `[0, 360)`.
pub fn wrap_degrees(degrees: i32) -> i32 {
    degrees.rem_euclid(360)
}

/// The heading pointing the other way, `(180 + degrees) % 360`.
pub fn opposite_degrees(degrees: i32) -> i32 {
    wrap_degrees(180 + degrees)
}

/// Heading from `from` toward `to` in whole degrees, `[0, 360)`.
pub fn heading_degrees(from: Point, to: Point) -> i32 {
    let dx = f64::from(to.x - from.x);
    let dy = f64::from(to.y - from.y);
    let mut angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 {
        angle += 360.0;
    }
    // Truncates like an integer cast; the nudge keeps exact axes such as 180.0
    // from landing on 179 through rounding error.
    wrap_degrees((angle + ANGLE_NUDGE).floor() as i32)
}
