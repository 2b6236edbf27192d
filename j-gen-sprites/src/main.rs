#![cfg(feature = "generator")]

use std::error::Error;
use std::path::PathBuf;

use j_gen_sprites::generator::write_frames;
use j_gen_sprites::layout::DEFAULT_ASSET_ROOT;

fn workspace_root() -> Result<PathBuf, Box<dyn Error>> {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(PathBuf::from)
        .ok_or_else(|| "manifest directory has no parent".into())
}

fn main() -> Result<(), Box<dyn Error>> {
    let root = match std::env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => workspace_root()?.join(DEFAULT_ASSET_ROOT),
    };

    let written = write_frames(&root)?;
    for path in &written {
        println!("wrote {}", path.display());
    }
    println!("{} frames under {}", written.len(), root.display());

    Ok(())
}
