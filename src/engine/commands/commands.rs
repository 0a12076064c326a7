use std::rc::Rc;

use crate::core::bitmap::Bitmap;
use crate::core::coords::{ChunkCoord, PixelPos};
use crate::core::error::WorldError;
use crate::domain::sprite::SpriteId;
use crate::domain::textures::TextureProvider;

use super::EngineCore;

pub(super) fn create_chunk(
    core: &mut EngineCore,
    coord: ChunkCoord,
    background: &str,
) -> Result<(), WorldError> {
    core.world.create_chunk(coord, &core.textures, background)
}

pub(super) fn spawn_sprite(
    core: &mut EngineCore,
    position: PixelPos,
    texture_names: &[String],
) -> Result<SpriteId, WorldError> {
    let frames = resolve_frames(core, texture_names)?;
    core.sprites.spawn(&mut core.world, position, frames)
}

pub(super) fn move_sprite_to(
    core: &mut EngineCore,
    id: SpriteId,
    position: PixelPos,
) -> Result<(), WorldError> {
    core.sprites.move_to(&mut core.world, id, position)
}

pub(super) fn move_sprite_by(
    core: &mut EngineCore,
    id: SpriteId,
    delta: PixelPos,
) -> Result<(), WorldError> {
    core.sprites.move_by(&mut core.world, id, delta)
}

pub(super) fn set_sprite_textures(
    core: &mut EngineCore,
    id: SpriteId,
    texture_names: &[String],
) -> Result<(), WorldError> {
    let frames = resolve_frames(core, texture_names)?;
    core.sprites.set_frames(&mut core.world, id, frames)
}

pub(super) fn despawn_sprite(core: &mut EngineCore, id: SpriteId) -> Result<(), WorldError> {
    core.sprites.despawn(&mut core.world, id)
}

fn resolve_frames(
    core: &EngineCore,
    texture_names: &[String],
) -> Result<Vec<Rc<Bitmap>>, WorldError> {
    texture_names
        .iter()
        .map(|name| core.textures.get_texture(name))
        .collect()
}
