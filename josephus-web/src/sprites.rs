use std::collections::HashMap;
use std::path::Path;

use j_gen_sprites::layout;
use josephus_core::{FrameKind, SpriteFrame};
use macroquad::prelude::*;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to load texture {path}: {message}")]
    Load { path: String, message: String },
    #[error("texture {path} has no pixels")]
    Empty { path: String },
}

/// Every soldier frame, loaded up front.
pub struct SpriteTextures {
    frames: HashMap<(FrameKind, usize), Texture2D>,
}

impl SpriteTextures {
    /// Loads the full frame set under `root`. Any missing or empty frame
    /// aborts the load.
    pub async fn load(root: &str) -> Result<Self, AssetError> {
        let root = Path::new(root);
        let mut frames = HashMap::with_capacity(layout::total_frame_count());

        for (kind, index) in layout::all_frames() {
            let path = layout::frame_path(root, kind, index)
                .to_string_lossy()
                .into_owned();
            let texture = load_texture(&path)
                .await
                .map_err(|err| AssetError::Load {
                    path: path.clone(),
                    message: err.to_string(),
                })?;
            if texture.width() < 1.0 || texture.height() < 1.0 {
                return Err(AssetError::Empty { path });
            }
            texture.set_filter(FilterMode::Linear);
            frames.insert((kind, index), texture);
        }

        log::info!("loaded {} soldier frames from {}", frames.len(), root.display());
        Ok(Self { frames })
    }

    pub fn get(&self, frame: &SpriteFrame) -> Option<&Texture2D> {
        self.frames.get(&(frame.kind, frame.index))
    }
}
