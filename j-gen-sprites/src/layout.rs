use std::path::{Path, PathBuf};

use josephus_core::FrameKind;

/// Pixel size of every soldier frame on disk. The viewer scales it down.
pub const SPRITE_PIXEL_WIDTH: u32 = 289;
pub const SPRITE_PIXEL_HEIGHT: u32 = 224;

pub const DEFAULT_ASSET_ROOT: &str = "res";

/// Path of one frame, relative to the asset root.
pub fn frame_relative_path(kind: FrameKind, index: usize) -> PathBuf {
    match kind {
        FrameKind::Idle => PathBuf::from("idle").join(format!("{index}.png")),
        FrameKind::Move => PathBuf::from("move").join(format!("{index}.png")),
        FrameKind::Reload => PathBuf::from("reload").join(format!("{index}.png")),
        FrameKind::Suicide => {
            PathBuf::from("seppuku").join(format!("survivor-meleeattack_knife_{index}.png"))
        }
        FrameKind::Dead => PathBuf::from("dead.png"),
    }
}

pub fn frame_path(root: &Path, kind: FrameKind, index: usize) -> PathBuf {
    root.join(frame_relative_path(kind, index))
}

/// Every frame the viewer loads, in loading order.
pub fn all_frames() -> impl Iterator<Item = (FrameKind, usize)> {
    FrameKind::ANIMATED
        .into_iter()
        .chain(std::iter::once(FrameKind::Dead))
        .flat_map(|kind| (0..kind.frame_count()).map(move |index| (kind, index)))
}

pub fn total_frame_count() -> usize {
    all_frames().count()
}
