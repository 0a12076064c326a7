//! Reference occupant implementation and the movement protocol driver.
//!
//! The cache only stays coherent if every mutation of an occupant's
//! position or image is bracketed by withdraw-then-place against the
//! world index. `SpriteRegistry` owns that bracket so callers cannot get
//! it wrong: `move_to`, `move_by`, `set_frames` and `advance_animations`
//! all withdraw at the old state, mutate, and re-place at the new state.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::core::bitmap::Bitmap;
use crate::core::coords::PixelPos;
use crate::core::error::WorldError;
use crate::domain::occupant::{Occupant, OccupantRef};
use crate::spatial::world::WorldIndex;

/// Registry handle for a spawned sprite
pub type SpriteId = u32;

/// A positioned, optionally animated occupant. Interior-mutable: the
/// registry mutates it through `&self` while the cache holds handles.
pub struct Sprite {
    position: Cell<PixelPos>,
    frames: RefCell<Vec<Rc<Bitmap>>>,
    frame_index: Cell<usize>,
}

impl Sprite {
    /// Build a sprite from its animation frames (at least one)
    pub fn new(position: PixelPos, frames: Vec<Rc<Bitmap>>) -> Rc<Self> {
        debug_assert!(!frames.is_empty(), "sprite needs at least one frame");
        Rc::new(Self {
            position: Cell::new(position),
            frames: RefCell::new(frames),
            frame_index: Cell::new(0),
        })
    }

    pub fn position(&self) -> PixelPos {
        self.position.get()
    }

    /// More than one frame: `advance_animations` will cycle it
    pub fn is_animated(&self) -> bool {
        self.frames.borrow().len() > 1
    }

    fn set_position(&self, position: PixelPos) {
        self.position.set(position);
    }

    fn set_frames(&self, frames: Vec<Rc<Bitmap>>) {
        debug_assert!(!frames.is_empty(), "sprite needs at least one frame");
        self.frame_index.set(0);
        *self.frames.borrow_mut() = frames;
    }

    fn advance_frame(&self) {
        let len = self.frames.borrow().len();
        self.frame_index.set((self.frame_index.get() + 1) % len);
    }
}

impl Occupant for Sprite {
    fn render_position(&self) -> PixelPos {
        self.position.get()
    }

    /// Anchor y orders sprites back-to-front down the screen
    fn depth_key(&self) -> i32 {
        self.position.get().1
    }

    fn image(&self) -> Rc<Bitmap> {
        Rc::clone(&self.frames.borrow()[self.frame_index.get()])
    }
}

/// Id-keyed sprite store driving the two-step movement protocol
#[derive(Default)]
pub struct SpriteRegistry {
    sprites: HashMap<SpriteId, Rc<Sprite>>,
    next_id: SpriteId,
}

impl SpriteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn get(&self, id: SpriteId) -> Option<Rc<Sprite>> {
        self.sprites.get(&id).cloned()
    }

    /// Create a sprite and place it into the world. The target chunk must
    /// already exist.
    pub fn spawn(
        &mut self,
        world: &mut WorldIndex,
        position: PixelPos,
        frames: Vec<Rc<Bitmap>>,
    ) -> Result<SpriteId, WorldError> {
        let sprite = Sprite::new(position, frames);
        world.place_occupant(&handle(&sprite))?;

        let id = self.next_id;
        self.next_id += 1;
        self.sprites.insert(id, sprite);
        Ok(id)
    }

    /// Withdraw, move, re-place. On a placement failure (moving into a
    /// missing chunk) the sprite stays registered but is out of the
    /// cache; re-placing it at a loaded position recovers.
    pub fn move_to(
        &mut self,
        world: &mut WorldIndex,
        id: SpriteId,
        position: PixelPos,
    ) -> Result<(), WorldError> {
        let sprite = self.lookup(id)?;
        world.withdraw_occupant(&handle(&sprite))?;
        sprite.set_position(position);
        world.place_occupant(&handle(&sprite))
    }

    pub fn move_by(
        &mut self,
        world: &mut WorldIndex,
        id: SpriteId,
        delta: PixelPos,
    ) -> Result<(), WorldError> {
        let sprite = self.lookup(id)?;
        let (x, y) = sprite.position();
        self.move_to(world, id, (x + delta.0, y + delta.1))
    }

    /// Swap the animation frames; bracketed like a move so the owning
    /// tile repaints with the new image.
    pub fn set_frames(
        &mut self,
        world: &mut WorldIndex,
        id: SpriteId,
        frames: Vec<Rc<Bitmap>>,
    ) -> Result<(), WorldError> {
        let sprite = self.lookup(id)?;
        world.withdraw_occupant(&handle(&sprite))?;
        sprite.set_frames(frames);
        world.place_occupant(&handle(&sprite))
    }

    /// Withdraw from the world and drop the registration
    pub fn despawn(&mut self, world: &mut WorldIndex, id: SpriteId) -> Result<(), WorldError> {
        let sprite = self.lookup(id)?;
        world.withdraw_occupant(&handle(&sprite))?;
        self.sprites.remove(&id);
        Ok(())
    }

    /// Step every animated sprite one frame, re-placing each so its tile
    /// regenerates with the new image.
    pub fn advance_animations(&mut self, world: &mut WorldIndex) -> Result<(), WorldError> {
        for sprite in self.sprites.values() {
            if !sprite.is_animated() {
                continue;
            }
            world.withdraw_occupant(&handle(sprite))?;
            sprite.advance_frame();
            world.place_occupant(&handle(sprite))?;
        }
        Ok(())
    }

    fn lookup(&self, id: SpriteId) -> Result<Rc<Sprite>, WorldError> {
        self.sprites
            .get(&id)
            .cloned()
            .ok_or(WorldError::UnknownSprite(id))
    }
}

#[inline]
fn handle(sprite: &Rc<Sprite>) -> OccupantRef {
    sprite.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::bitmap::rgba;
    use crate::domain::textures::TextureRegistry;

    const BG: u32 = rgba(0, 60, 0, 255);

    fn world() -> WorldIndex {
        let mut textures = TextureRegistry::new();
        textures.register("grass-tile", Bitmap::solid(16, 16, BG));
        let mut world = WorldIndex::new();
        world.create_chunk((0, 0), &textures, "grass-tile").unwrap();
        world
    }

    fn frame(color: u32) -> Rc<Bitmap> {
        Rc::new(Bitmap::solid(1, 1, color))
    }

    #[test]
    fn spawn_places_and_despawn_withdraws() {
        let mut world = world();
        let mut sprites = SpriteRegistry::new();

        let id = sprites.spawn(&mut world, (10, 20), vec![frame(1)]).unwrap();
        assert_eq!(world.occupant_count(), 1);

        sprites.despawn(&mut world, id).unwrap();
        assert_eq!(world.occupant_count(), 0);
        assert!(sprites.is_empty());
        assert_eq!(
            sprites.despawn(&mut world, id),
            Err(WorldError::UnknownSprite(id))
        );
    }

    #[test]
    fn spawn_outside_loaded_chunks_fails_and_registers_nothing() {
        let mut world = world();
        let mut sprites = SpriteRegistry::new();
        let err = sprites.spawn(&mut world, (-1, 0), vec![frame(1)]).unwrap_err();
        assert_eq!(err, WorldError::ChunkNotLoaded((-1, 0)));
        assert!(sprites.is_empty());
    }

    #[test]
    fn move_to_relocates_between_tiles() {
        let mut world = world();
        let mut sprites = SpriteRegistry::new();
        let id = sprites.spawn(&mut world, (10, 20), vec![frame(1)]).unwrap();

        sprites.move_to(&mut world, id, (70, 90)).unwrap();

        assert_eq!(world.lookup_tile((0, 1)).unwrap().occupant_count(), 0);
        assert_eq!(world.lookup_tile((4, 5)).unwrap().occupant_count(), 1);
        assert_eq!(sprites.get(id).unwrap().position(), (70, 90));
    }

    #[test]
    fn move_by_accumulates() {
        let mut world = world();
        let mut sprites = SpriteRegistry::new();
        let id = sprites.spawn(&mut world, (0, 0), vec![frame(1)]).unwrap();

        sprites.move_by(&mut world, id, (3, 4)).unwrap();
        sprites.move_by(&mut world, id, (3, 4)).unwrap();
        assert_eq!(sprites.get(id).unwrap().position(), (6, 8));
        assert_eq!(world.occupant_count(), 1);
    }

    #[test]
    fn advance_animations_cycles_frames_and_keeps_cache_coherent() {
        let mut world = world();
        let mut sprites = SpriteRegistry::new();
        let id = sprites
            .spawn(&mut world, (5, 5), vec![frame(1), frame(2)])
            .unwrap();
        let sprite = sprites.get(id).unwrap();
        assert_eq!(sprite.image().pixel(0, 0), Some(1));

        sprites.advance_animations(&mut world).unwrap();
        assert_eq!(sprite.image().pixel(0, 0), Some(2));
        assert_eq!(world.occupant_count(), 1);

        sprites.advance_animations(&mut world).unwrap();
        assert_eq!(sprite.image().pixel(0, 0), Some(1));
    }

    #[test]
    fn static_sprites_are_untouched_by_animation_ticks() {
        let mut world = world();
        let mut sprites = SpriteRegistry::new();
        let id = sprites.spawn(&mut world, (5, 5), vec![frame(9)]).unwrap();

        // The owning tile settles after a draw-equivalent regeneration.
        world.chunk_mut((0, 0)).unwrap().regenerate();

        sprites.advance_animations(&mut world).unwrap();
        assert!(!world.chunk((0, 0)).unwrap().is_dirty());
        assert_eq!(sprites.get(id).unwrap().image().pixel(0, 0), Some(9));
    }
}
