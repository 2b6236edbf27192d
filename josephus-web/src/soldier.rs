use josephus_core::{CircleLayout, FrameKind, Soldier, SpriteFrame, SpriteSize};
use macroquad::prelude::*;

pub const SURVIVOR_TINT: Color = Color::from_rgba(174, 241, 140, 255);
pub const DEAD_TINT: Color = Color::from_rgba(255, 0, 0, 255);

#[derive(Debug, Clone)]
pub struct SoldierDrawConfig {
    pub sprite: SpriteSize,
    pub live_tint: Color,
    pub survivor_tint: Color,
    pub dead_tint: Color,
}

impl SoldierDrawConfig {
    pub fn for_layout(layout: &CircleLayout) -> Self {
        Self {
            sprite: layout.sprite,
            live_tint: WHITE,
            survivor_tint: SURVIVOR_TINT,
            dead_tint: DEAD_TINT,
        }
    }

    pub fn tint_for(&self, frame: &SpriteFrame) -> Color {
        match frame.kind {
            FrameKind::Dead => self.dead_tint,
            _ if frame.tinted => self.survivor_tint,
            _ => self.live_tint,
        }
    }
}

/// Soldier positions are relative to the circle center, which sits in the
/// middle of the screen.
pub fn soldier_screen_center(soldier: &Soldier, circle_center: Vec2) -> Vec2 {
    let position = soldier.position();
    circle_center + vec2(position.x, position.y)
}

/// Destination rectangle centred on `center`.
pub fn dest_rect(center: Vec2, sprite: SpriteSize) -> Rect {
    Rect::new(
        center.x - sprite.width * 0.5,
        center.y - sprite.height * 0.5,
        sprite.width,
        sprite.height,
    )
}

pub fn draw_soldier(
    texture: &Texture2D,
    soldier: &Soldier,
    frame: &SpriteFrame,
    circle_center: Vec2,
    config: &SoldierDrawConfig,
) {
    let rect = dest_rect(soldier_screen_center(soldier, circle_center), config.sprite);

    // Rotation is about the rectangle center; sprites are drawn facing +x.
    draw_texture_ex(
        texture,
        rect.x,
        rect.y,
        config.tint_for(frame),
        DrawTextureParams {
            dest_size: Some(vec2(rect.w, rect.h)),
            rotation: (soldier.rotation() as f32).to_radians(),
            ..Default::default()
        },
    );
}
