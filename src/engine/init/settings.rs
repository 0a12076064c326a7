use serde::Deserialize;

use crate::core::bitmap::rgba;
use crate::core::error::WorldError;

use super::EngineCore;

/// World layout bundle: which chunk coordinates exist and what backs
/// them. Supplied by the host; nothing here is derived from occupants.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldLayout {
    /// Background texture name shared by every tile of every chunk
    pub background: String,
    /// Chunk coordinates to create, `[x, y]` pairs
    pub chunks: Vec<[i32; 2]>,
    /// Framebuffer clear color as `[r, g, b, a]`
    #[serde(default)]
    pub clear_color: Option<[u8; 4]>,
}

pub(super) fn load_layout_json(core: &mut EngineCore, json: &str) -> Result<(), String> {
    let layout: WorldLayout = serde_json::from_str(json).map_err(|e| e.to_string())?;
    apply_layout(core, &layout).map_err(|e| e.to_string())
}

pub(super) fn apply_layout(core: &mut EngineCore, layout: &WorldLayout) -> Result<(), WorldError> {
    if let Some([r, g, b, a]) = layout.clear_color {
        core.clear_color = rgba(r, g, b, a);
    }
    for &[cx, cy] in &layout.chunks {
        core.world
            .create_chunk((cx, cy), &core.textures, &layout.background)?;
    }
    log::debug!("world layout loaded: {} chunks", layout.chunks.len());
    Ok(())
}
