//! A 128x128 pixel cache unit: an 8x8 grid of tiles plus the composited
//! chunk canvas.
//!
//! The composite is differential: a tile's bitmap is copied into the
//! canvas only when the tile reports `consume_changed()`, so unchanged
//! regions keep the previous composite. Tiles repaint themselves fully,
//! which is what makes the region replacement safe.

use std::rc::Rc;

use crate::core::bitmap::Bitmap;
use crate::core::coords::{
    chunk_of_pixel, intra_chunk_of_pixel, slot_origin, tile_slot, ChunkCoord, CHUNK_SIZE,
    TILES_PER_CHUNK,
};
use crate::core::error::WorldError;
use crate::domain::occupant::OccupantRef;
use crate::domain::textures::TextureProvider;
use crate::spatial::tile::Tile;

impl std::fmt::Debug for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chunk")
            .field("coord", &self.coord)
            .field("tiles", &self.tiles.len())
            .field("alive", &self.alive)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

pub struct Chunk {
    coord: ChunkCoord,
    /// Row-major tile slots; a dead tile retires to `None` so sibling
    /// indices stay valid.
    tiles: Vec<Option<Tile>>,
    image: Bitmap,
    alive: bool,
    dirty: bool,
}

impl Chunk {
    /// Create a chunk with all 64 tiles built eagerly, every tile backed
    /// by the named background texture.
    pub fn new(
        coord: ChunkCoord,
        textures: &dyn TextureProvider,
        background: &str,
    ) -> Result<Self, WorldError> {
        let background = textures.get_texture(background)?;
        let origin = (coord.0 * CHUNK_SIZE, coord.1 * CHUNK_SIZE);

        let tiles = (0..TILES_PER_CHUNK)
            .map(|slot| {
                let (ox, oy) = slot_origin(slot);
                Some(Tile::new((origin.0 + ox, origin.1 + oy), Rc::clone(&background)))
            })
            .collect();

        Ok(Self {
            coord,
            tiles,
            image: Bitmap::new(CHUNK_SIZE as u32, CHUNK_SIZE as u32),
            alive: true,
            dirty: true,
        })
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Composited canvas as of the last regeneration
    pub fn image(&self) -> &Bitmap {
        &self.image
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Eviction hook; the world drops chunks reporting dead at draw time
    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Tile at an intra-chunk offset, `None` when the slot is retired
    pub fn tile(&self, intra: (i32, i32)) -> Option<&Tile> {
        self.tiles.get(tile_slot(intra))?.as_ref()
    }

    /// Total occupants across all live tiles
    pub fn occupant_count(&self) -> usize {
        self.tiles
            .iter()
            .flatten()
            .map(Tile::occupant_count)
            .sum()
    }

    /// Route a placement to the tile owning the occupant's position
    pub fn add_occupant(&mut self, occupant: &OccupantRef) -> Result<(), WorldError> {
        let tile = self.resolve_tile(occupant)?;
        tile.add_occupant(occupant);
        self.dirty = true;
        Ok(())
    }

    /// Route a removal to the tile owning the occupant's current position
    pub fn remove_occupant(&mut self, occupant: &OccupantRef) -> Result<(), WorldError> {
        let tile = self.resolve_tile(occupant)?;
        tile.remove_occupant(occupant)?;
        self.dirty = true;
        Ok(())
    }

    /// Recomposite the canvas if any tile mutated since the last pass.
    /// Tiles regenerate first; dead ones retire. Then only tiles
    /// reporting changed are re-blitted — everything else keeps its
    /// previous canvas region.
    pub fn regenerate(&mut self) {
        if !self.dirty {
            return;
        }

        for slot in 0..self.tiles.len() {
            if let Some(tile) = self.tiles[slot].as_mut() {
                if !tile.advance() {
                    log::debug!("chunk {:?}: retiring dead tile slot {}", self.coord, slot);
                    self.tiles[slot] = None;
                }
            }
        }

        for slot in 0..self.tiles.len() {
            let Some(tile) = self.tiles[slot].as_mut() else {
                continue;
            };
            if tile.consume_changed() {
                let (ox, oy) = slot_origin(slot);
                self.image.copy_from(tile.image(), ox, oy);
            }
        }

        self.dirty = false;
    }

    /// Regenerate if dirty; reports liveness to the world index
    pub fn advance(&mut self) -> bool {
        if self.dirty {
            self.regenerate();
        }
        self.alive
    }

    fn resolve_tile(&mut self, occupant: &OccupantRef) -> Result<&mut Tile, WorldError> {
        let position = occupant.render_position();
        debug_assert_eq!(
            chunk_of_pixel(position),
            self.coord,
            "occupant at {:?} routed to chunk {:?}",
            position,
            self.coord,
        );

        let slot = tile_slot(intra_chunk_of_pixel(position));
        if slot >= self.tiles.len() {
            return Err(WorldError::TileIndexOutOfRange { index: slot, pixel: position });
        }
        self.tiles[slot]
            .as_mut()
            .ok_or(WorldError::TileRetired { chunk: self.coord, slot })
    }
}
