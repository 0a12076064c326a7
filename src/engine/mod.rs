//! Engine orchestration.
//!
//! `EngineCore` owns the texture registry, the world index, the sprite
//! registry and the presentation framebuffer, and exposes the two frame
//! entry points the host loop calls: `update` (between frames) and
//! `draw` (once per presented frame). It only orchestrates — cache
//! semantics live in `spatial/`, occupant bookkeeping in `domain/`.

use crate::core::bitmap::Bitmap;
use crate::core::coords::{ChunkCoord, PixelPos, PixelRect};
use crate::core::error::WorldError;
use crate::domain::sprite::{SpriteId, SpriteRegistry};
use crate::domain::textures::TextureRegistry;
use crate::spatial::tile::Tile;
use crate::spatial::world::WorldIndex;

#[path = "commands/commands.rs"]
mod commands;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
#[path = "frame/frame.rs"]
mod frame;
mod facade;

pub use facade::Engine;
pub use settings::WorldLayout;

pub struct EngineCore {
    textures: TextureRegistry,
    world: WorldIndex,
    sprites: SpriteRegistry,
    framebuffer: Bitmap,
    clear_color: u32,
    frame: u64,
}

impl EngineCore {
    /// Create an engine presenting into a `width` x `height` framebuffer
    pub fn new(width: u32, height: u32) -> Self {
        init::create_engine_core(width, height)
    }

    pub fn width(&self) -> u32 {
        self.framebuffer.width()
    }

    pub fn height(&self) -> u32 {
        self.framebuffer.height()
    }

    /// Number of completed draw passes
    pub fn frame(&self) -> u64 {
        self.frame
    }

    // === Assets ===

    /// Register a texture under a name
    pub fn register_texture(&mut self, name: &str, bitmap: Bitmap) {
        self.textures.register(name, bitmap);
    }

    /// Register a texture from a raw RGBA byte buffer
    pub fn register_texture_rgba(
        &mut self,
        name: &str,
        width: u32,
        height: u32,
        data: &[u8],
    ) -> Result<(), WorldError> {
        self.textures.register_rgba(name, width, height, data)?;
        Ok(())
    }

    // === World layout ===

    /// Load a JSON world layout (background texture + chunk coordinates)
    pub fn load_layout_json(&mut self, json: &str) -> Result<(), String> {
        settings::load_layout_json(self, json)
    }

    /// Create one chunk backed by the named background texture
    pub fn create_chunk(&mut self, coord: ChunkCoord, background: &str) -> Result<(), WorldError> {
        commands::create_chunk(self, coord, background)
    }

    pub fn chunk_count(&self) -> usize {
        self.world.chunk_count()
    }

    /// Read access to the cache for collaborators and tests
    pub fn world(&self) -> &WorldIndex {
        &self.world
    }

    /// Loaded tiles intersecting a pixel rectangle
    pub fn visible_tiles_for(&self, rect: &PixelRect) -> Vec<&Tile> {
        self.world.visible_tiles_for(rect)
    }

    // === Sprites ===

    /// Spawn a sprite at a position with one animation frame per texture
    /// name. The chunk owning the position must exist.
    pub fn spawn_sprite(
        &mut self,
        position: PixelPos,
        texture_names: &[String],
    ) -> Result<SpriteId, WorldError> {
        commands::spawn_sprite(self, position, texture_names)
    }

    pub fn move_sprite_to(&mut self, id: SpriteId, position: PixelPos) -> Result<(), WorldError> {
        commands::move_sprite_to(self, id, position)
    }

    pub fn move_sprite_by(&mut self, id: SpriteId, delta: PixelPos) -> Result<(), WorldError> {
        commands::move_sprite_by(self, id, delta)
    }

    /// Swap a sprite's animation frames for other textures
    pub fn set_sprite_textures(
        &mut self,
        id: SpriteId,
        texture_names: &[String],
    ) -> Result<(), WorldError> {
        commands::set_sprite_textures(self, id, texture_names)
    }

    pub fn despawn_sprite(&mut self, id: SpriteId) -> Result<(), WorldError> {
        commands::despawn_sprite(self, id)
    }

    pub fn sprite_count(&self) -> usize {
        self.sprites.len()
    }

    // === Frame entry points ===

    /// Between-frames tick: advance sprite animations
    pub fn update(&mut self) -> Result<(), WorldError> {
        frame::update(self)
    }

    /// Per-frame draw pass: clear the framebuffer and composite the
    /// world at the given pixel offset
    pub fn draw(&mut self, offset: PixelPos) {
        frame::draw(self, offset);
    }

    /// Presented pixels of the last draw pass
    pub fn framebuffer(&self) -> &Bitmap {
        &self.framebuffer
    }

    pub fn set_clear_color(&mut self, color: u32) {
        self.clear_color = color;
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
