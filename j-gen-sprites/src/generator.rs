use std::error::Error;
use std::f32::consts::{PI, TAU};
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use josephus_core::{FRAME_COUNT, FrameKind};

use crate::layout::{self, SPRITE_PIXEL_HEIGHT, SPRITE_PIXEL_WIDTH};

const AA_SAMPLES_PER_AXIS: u32 = 4;
const AA_SAMPLE_COUNT: u32 = AA_SAMPLES_PER_AXIS * AA_SAMPLES_PER_AXIS;
const SPECKLE_STRENGTH: i16 = 10;

// Frames are drawn facing +x; the viewer rotates them about their center.
const CENTER_X: f32 = SPRITE_PIXEL_WIDTH as f32 * 0.5;
const CENTER_Y: f32 = SPRITE_PIXEL_HEIGHT as f32 * 0.5;

const UNIFORM: Rgba<u8> = Rgba([214, 214, 206, 255]);
const SKIN: Rgba<u8> = Rgba([236, 222, 204, 255]);
const BOOTS: Rgba<u8> = Rgba([92, 88, 84, 255]);
const STEEL: Rgba<u8> = Rgba([250, 250, 250, 255]);
const BLOOD: Rgba<u8> = Rgba([150, 20, 20, 230]);

#[derive(Clone, Copy)]
enum Shape {
    Disc {
        cx: f32,
        cy: f32,
        r: f32,
    },
    Ellipse {
        cx: f32,
        cy: f32,
        rx: f32,
        ry: f32,
    },
    Stroke {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
    },
}

impl Shape {
    fn covers(&self, x: f32, y: f32) -> bool {
        match *self {
            Shape::Disc { cx, cy, r } => (x - cx).powi(2) + (y - cy).powi(2) <= r * r,
            Shape::Ellipse { cx, cy, rx, ry } => {
                ((x - cx) / rx).powi(2) + ((y - cy) / ry).powi(2) <= 1.0
            }
            Shape::Stroke {
                x1,
                y1,
                x2,
                y2,
                width,
            } => point_near_segment(x, y, (x1, y1), (x2, y2), width * 0.5),
        }
    }
}

/// Round-capped segment test.
fn point_near_segment(x: f32, y: f32, from: (f32, f32), to: (f32, f32), radius: f32) -> bool {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let len_sq = dx * dx + dy * dy;

    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((x - from.0) * dx + (y - from.1) * dy) / len_sq).clamp(0.0, 1.0)
    };
    let proj_x = from.0 + dx * t;
    let proj_y = from.1 + dy * t;
    (x - proj_x).powi(2) + (y - proj_y).powi(2) <= radius * radius
}

struct Layer {
    shape: Shape,
    color: Rgba<u8>,
    speckled: bool,
}

fn layer(shape: Shape, color: Rgba<u8>) -> Layer {
    Layer {
        shape,
        color,
        speckled: false,
    }
}

fn cloth(shape: Shape) -> Layer {
    Layer {
        shape,
        color: UNIFORM,
        speckled: true,
    }
}

/// Animation phase in `[0, 1)` for a cycle frame.
fn phase(index: usize) -> f32 {
    index as f32 / FRAME_COUNT as f32
}

fn boots(stride: f32) -> [Layer; 2] {
    [
        layer(
            Shape::Ellipse {
                cx: CENTER_X + stride,
                cy: CENTER_Y - 26.0,
                rx: 20.0,
                ry: 12.0,
            },
            BOOTS,
        ),
        layer(
            Shape::Ellipse {
                cx: CENTER_X - stride,
                cy: CENTER_Y + 26.0,
                rx: 20.0,
                ry: 12.0,
            },
            BOOTS,
        ),
    ]
}

/// Torso, arm and head of a standing soldier. `hand` is where the knife hand
/// ends up; `blade_angle` points the knife, 0 being straight ahead.
fn upper_body(breath: f32, hand: (f32, f32), blade_angle: f32, blade_len: f32) -> Vec<Layer> {
    let shoulder = (CENTER_X + 4.0, CENTER_Y + 42.0 * breath);
    let blade_tip = (
        hand.0 + blade_len * blade_angle.cos(),
        hand.1 + blade_len * blade_angle.sin(),
    );

    vec![
        cloth(Shape::Ellipse {
            cx: CENTER_X,
            cy: CENTER_Y,
            rx: 34.0,
            ry: 64.0 * breath,
        }),
        cloth(Shape::Stroke {
            x1: shoulder.0,
            y1: shoulder.1,
            x2: hand.0,
            y2: hand.1,
            width: 22.0,
        }),
        cloth(Shape::Stroke {
            x1: CENTER_X + 4.0,
            y1: CENTER_Y - 42.0 * breath,
            x2: CENTER_X + 38.0,
            y2: CENTER_Y - 26.0,
            width: 22.0,
        }),
        layer(
            Shape::Stroke {
                x1: hand.0,
                y1: hand.1,
                x2: blade_tip.0,
                y2: blade_tip.1,
                width: 7.0,
            },
            STEEL,
        ),
        layer(
            Shape::Disc {
                cx: hand.0,
                cy: hand.1,
                r: 10.0,
            },
            SKIN,
        ),
        layer(
            Shape::Disc {
                cx: CENTER_X + 2.0,
                cy: CENTER_Y,
                r: 28.0,
            },
            SKIN,
        ),
    ]
}

fn soldier_layers(kind: FrameKind, index: usize) -> Vec<Layer> {
    let t = phase(index);
    let rest_hand = (CENTER_X + 62.0, CENTER_Y + 22.0);

    match kind {
        FrameKind::Idle => {
            let breath = 1.0 + 0.03 * (t * TAU).sin();
            let mut layers: Vec<Layer> = boots(0.0).into_iter().collect();
            layers.extend(upper_body(breath, rest_hand, 0.0, 48.0));
            layers
        }
        FrameKind::Move => {
            let stride = 22.0 * (t * TAU).sin();
            let sway = 6.0 * (t * TAU).cos();
            let mut layers: Vec<Layer> = boots(stride).into_iter().collect();
            layers.extend(upper_body(1.0, (rest_hand.0, rest_hand.1 + sway), 0.0, 48.0));
            layers
        }
        FrameKind::Reload => {
            let thrust = (t * PI).sin();
            let hand = (rest_hand.0 + 30.0 * thrust, rest_hand.1 - 14.0 * thrust);
            let mut layers: Vec<Layer> = boots(0.0).into_iter().collect();
            layers.extend(upper_body(1.0, hand, -0.2 * thrust, 48.0));
            layers
        }
        FrameKind::Suicide => {
            let turn = t.min(1.0);
            let hand = (rest_hand.0 - 22.0 * turn, rest_hand.1 - 18.0 * turn);
            let mut layers: Vec<Layer> = boots(0.0).into_iter().collect();
            layers.extend(upper_body(1.0, hand, PI * turn, 48.0 - 12.0 * turn));
            layers
        }
        FrameKind::Dead => vec![
            layer(
                Shape::Ellipse {
                    cx: CENTER_X - 10.0,
                    cy: CENTER_Y + 8.0,
                    rx: 110.0,
                    ry: 70.0,
                },
                BLOOD,
            ),
            cloth(Shape::Ellipse {
                cx: CENTER_X + 12.0,
                cy: CENTER_Y,
                rx: 72.0,
                ry: 32.0,
            }),
            layer(
                Shape::Disc {
                    cx: CENTER_X - 72.0,
                    cy: CENTER_Y + 6.0,
                    r: 26.0,
                },
                SKIN,
            ),
        ],
    }
}

fn frame_seed(kind: FrameKind, index: usize) -> u64 {
    let kind_tag = match kind {
        FrameKind::Idle => 1,
        FrameKind::Move => 2,
        FrameKind::Reload => 3,
        FrameKind::Suicide => 4,
        FrameKind::Dead => 5,
    };
    kind_tag * 1_000 + index as u64
}

/// Rasterizes one soldier frame with 4x4 supersampling. Same input, same
/// pixels.
pub fn render_frame(kind: FrameKind, index: usize) -> RgbaImage {
    let layers = soldier_layers(kind, index);
    let mut rng = fastrand::Rng::with_seed(frame_seed(kind, index));
    let mut image =
        RgbaImage::from_pixel(SPRITE_PIXEL_WIDTH, SPRITE_PIXEL_HEIGHT, Rgba([0, 0, 0, 0]));
    let samples_per_axis = AA_SAMPLES_PER_AXIS as f32;
    let inv_sample_count = 1.0 / AA_SAMPLE_COUNT as f32;

    for y in 0..SPRITE_PIXEL_HEIGHT {
        for x in 0..SPRITE_PIXEL_WIDTH {
            let mut sum = [0.0f32; 4];
            let mut speckled = false;

            for sy in 0..AA_SAMPLES_PER_AXIS {
                for sx in 0..AA_SAMPLES_PER_AXIS {
                    let sample_x = x as f32 + (sx as f32 + 0.5) / samples_per_axis;
                    let sample_y = y as f32 + (sy as f32 + 0.5) / samples_per_axis;

                    // Later layers paint over earlier ones.
                    if let Some(hit) = layers
                        .iter()
                        .rev()
                        .find(|layer| layer.shape.covers(sample_x, sample_y))
                    {
                        speckled |= hit.speckled;
                        for (channel, value) in sum.iter_mut().zip(hit.color.0) {
                            *channel += value as f32;
                        }
                    }
                }
            }

            if sum[3] == 0.0 {
                continue;
            }

            let noise = if speckled {
                rng.i16(-SPECKLE_STRENGTH..=SPECKLE_STRENGTH) as f32
            } else {
                0.0
            };
            let shade = |channel: f32| {
                (channel * inv_sample_count + noise)
                    .clamp(0.0, 255.0)
                    .round() as u8
            };
            image.put_pixel(
                x,
                y,
                Rgba([
                    shade(sum[0]),
                    shade(sum[1]),
                    shade(sum[2]),
                    (sum[3] * inv_sample_count).round() as u8,
                ]),
            );
        }
    }

    image
}

/// Writes every frame the viewer expects under `root`. Returns the written
/// paths in loading order.
pub fn write_frames(root: &Path) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let mut written = Vec::with_capacity(layout::total_frame_count());

    for (kind, index) in layout::all_frames() {
        let path = layout::frame_path(root, kind, index);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        render_frame(kind, index).save(&path)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opaque_pixels(image: &RgbaImage) -> usize {
        image.pixels().filter(|pixel| pixel.0[3] > 0).count()
    }

    #[test]
    fn frames_have_the_on_disk_size() {
        let image = render_frame(FrameKind::Idle, 0);
        assert_eq!(image.dimensions(), (SPRITE_PIXEL_WIDTH, SPRITE_PIXEL_HEIGHT));
    }

    #[test]
    fn rendering_is_deterministic() {
        let first = render_frame(FrameKind::Move, 5);
        let second = render_frame(FrameKind::Move, 5);
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn corners_stay_transparent() {
        for (kind, index) in layout::all_frames() {
            let image = render_frame(kind, index);
            assert_eq!(image.get_pixel(0, 0).0[3], 0);
            assert_eq!(
                image.get_pixel(SPRITE_PIXEL_WIDTH - 1, SPRITE_PIXEL_HEIGHT - 1).0[3],
                0
            );
            assert!(opaque_pixels(&image) > 0);
        }
    }

    #[test]
    fn knife_points_ahead_at_rest() {
        let image = render_frame(FrameKind::Idle, 0);
        let tip_x = (CENTER_X + 62.0 + 40.0) as u32;
        let tip_y = (CENTER_Y + 22.0) as u32;
        assert_eq!(*image.get_pixel(tip_x, tip_y), STEEL);
    }

    #[test]
    fn reload_thrust_changes_the_frame() {
        let rest = render_frame(FrameKind::Reload, 0);
        let thrust = render_frame(FrameKind::Reload, 10);
        assert_ne!(rest.as_raw(), thrust.as_raw());
    }

    #[test]
    fn writes_every_expected_file() {
        let root = std::env::temp_dir().join(format!("j-gen-sprites-{}", std::process::id()));
        let written = write_frames(&root).unwrap();
        assert_eq!(written.len(), layout::total_frame_count());
        assert!(root.join("dead.png").is_file());
        assert!(root.join("seppuku").join("survivor-meleeattack_knife_0.png").is_file());
        std::fs::remove_dir_all(&root).unwrap();
    }
}
