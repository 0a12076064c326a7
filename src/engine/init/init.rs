use crate::core::bitmap::{rgba, Bitmap};
use crate::domain::sprite::SpriteRegistry;
use crate::domain::textures::TextureRegistry;
use crate::spatial::world::WorldIndex;

use super::EngineCore;

pub(super) fn create_engine_core(width: u32, height: u32) -> EngineCore {
    EngineCore {
        textures: TextureRegistry::new(),
        world: WorldIndex::new(),
        sprites: SpriteRegistry::new(),
        framebuffer: Bitmap::new(width, height),
        clear_color: rgba(0, 0, 0, 255),
        frame: 0,
    }
}
