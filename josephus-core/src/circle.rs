use std::f64::consts::PI;

use crate::coordinates::{Point, wrap_degrees};
use crate::soldier::{FRAME_COUNT, Soldier};

pub const BASE_SPRITE_WIDTH: f32 = 289.0;
pub const BASE_SPRITE_HEIGHT: f32 = 224.0;
/// Circles at least this large shrink sprites by `n / 7`.
const LARGE_CIRCLE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

/// On-screen geometry derived from the soldier count and the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleLayout {
    pub sprite: SpriteSize,
    pub radius: f32,
}

impl CircleLayout {
    pub fn for_viewport(soldiers: usize, viewport: f32) -> Self {
        let sprite = sprite_size_for(soldiers);
        let radius = circle_radius(soldiers, sprite.width, viewport);
        Self { sprite, radius }
    }
}

pub fn sprite_size_for(soldiers: usize) -> SpriteSize {
    let divisor = if soldiers >= LARGE_CIRCLE {
        soldiers / 7
    } else {
        2
    } as f32;
    SpriteSize {
        width: BASE_SPRITE_WIDTH / divisor,
        height: BASE_SPRITE_HEIGHT / divisor,
    }
}

/// Radius that spaces the sprites shoulder to shoulder, clamped so the ring
/// fits inside a square viewport.
pub fn circle_radius(soldiers: usize, sprite_width: f32, viewport: f32) -> f32 {
    let fitted = soldiers as f32 * sprite_width / (2.0 * std::f32::consts::PI);
    let max_radius = viewport / 2.0 - sprite_width / 2.0;
    fitted.min(max_radius)
}

/// Places soldier 0 at the top and the rest clockwise, all facing the center.
pub fn arrange_in_circle(soldiers: usize, radius: f32) -> Vec<Soldier> {
    let count = soldiers.max(1) as f64;

    (0..soldiers)
        .map(|index| {
            let degrees = index as f64 * 360.0 / count;
            let angle = degrees.to_radians();
            let position = Point::new(
                (radius as f64 * (angle - PI / 2.0).cos()) as f32,
                (radius as f64 * (angle - PI / 2.0).sin()) as f32,
            );
            let rotation = wrap_degrees((degrees + 90.0) as i32);
            Soldier::new(position, rotation, index % FRAME_COUNT)
        })
        .collect()
}
