use crate::core::coords::PixelPos;
use crate::core::error::WorldError;

use super::EngineCore;

pub(super) fn update(core: &mut EngineCore) -> Result<(), WorldError> {
    core.sprites.advance_animations(&mut core.world)
}

pub(super) fn draw(core: &mut EngineCore, offset: PixelPos) {
    core.framebuffer.fill(core.clear_color);
    core.world.draw(&mut core.framebuffer, offset);
    core.frame += 1;
}
