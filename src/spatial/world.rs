//! Sparse world index: chunk coordinate -> chunk.
//!
//! Chunks exist only where a caller created them; placement into a
//! missing chunk is an error, never an implicit creation. The draw pass
//! is also the eviction point: chunks reporting dead are dropped by
//! rebuilding the map, never by deleting during traversal.

use std::collections::HashMap;

use crate::core::bitmap::Bitmap;
use crate::core::coords::{
    chunk_of, chunk_of_pixel, intra_chunk, visible_tiles, ChunkCoord, PixelPos, PixelRect,
    TileCoord, CHUNK_SIZE,
};
use crate::core::error::WorldError;
use crate::domain::occupant::OccupantRef;
use crate::domain::textures::TextureProvider;
use crate::spatial::chunk::Chunk;
use crate::spatial::tile::Tile;

#[derive(Default)]
pub struct WorldIndex {
    chunks: HashMap<ChunkCoord, Chunk>,
}

impl WorldIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunk_mut(&mut self, coord: ChunkCoord) -> Option<&mut Chunk> {
        self.chunks.get_mut(&coord)
    }

    /// Total occupants across all loaded chunks
    pub fn occupant_count(&self) -> usize {
        self.chunks.values().map(Chunk::occupant_count).sum()
    }

    /// Create a chunk at a coordinate. Creating twice is an error; the
    /// first chunk's occupants would be silently lost by an overwrite.
    pub fn create_chunk(
        &mut self,
        coord: ChunkCoord,
        textures: &dyn TextureProvider,
        background: &str,
    ) -> Result<(), WorldError> {
        if self.chunks.contains_key(&coord) {
            return Err(WorldError::ChunkAlreadyExists(coord));
        }
        let chunk = Chunk::new(coord, textures, background)?;
        log::debug!("chunk created at {:?}", coord);
        self.chunks.insert(coord, chunk);
        Ok(())
    }

    /// Tile at a tile coordinate, absent when no chunk is loaded there.
    /// Never creates anything.
    pub fn lookup_tile(&self, tile: TileCoord) -> Option<&Tile> {
        self.chunks.get(&chunk_of(tile))?.tile(intra_chunk(tile))
    }

    /// All loaded tiles intersecting a pixel rectangle, unloaded
    /// coordinates silently dropped.
    pub fn visible_tiles_for(&self, rect: &PixelRect) -> Vec<&Tile> {
        let (xs, ys) = visible_tiles(rect);
        let mut tiles = Vec::new();
        for x in xs {
            for y in ys.clone() {
                if let Some(tile) = self.lookup_tile((x, y)) {
                    tiles.push(tile);
                }
            }
        }
        tiles
    }

    /// Place an occupant into the chunk owning its pixel position
    pub fn place_occupant(&mut self, occupant: &OccupantRef) -> Result<(), WorldError> {
        let coord = chunk_of_pixel(occupant.render_position());
        self.chunks
            .get_mut(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))?
            .add_occupant(occupant)
    }

    /// Remove an occupant from the chunk owning its current position
    pub fn withdraw_occupant(&mut self, occupant: &OccupantRef) -> Result<(), WorldError> {
        let coord = chunk_of_pixel(occupant.render_position());
        self.chunks
            .get_mut(&coord)
            .ok_or(WorldError::ChunkNotLoaded(coord))?
            .remove_occupant(occupant)
    }

    /// Per-frame draw pass: advance every chunk, drop the dead ones, and
    /// blit every survivor's canvas at `offset + coord * 128`.
    pub fn draw(&mut self, canvas: &mut Bitmap, offset: PixelPos) {
        let chunks = std::mem::take(&mut self.chunks);
        let mut survivors = HashMap::with_capacity(chunks.len());
        for (coord, mut chunk) in chunks {
            if chunk.advance() {
                survivors.insert(coord, chunk);
            } else {
                log::debug!("evicting dead chunk at {:?}", coord);
            }
        }
        self.chunks = survivors;

        for (coord, chunk) in &self.chunks {
            canvas.blit_over(
                chunk.image(),
                offset.0 + coord.0 * CHUNK_SIZE,
                offset.1 + coord.1 * CHUNK_SIZE,
            );
        }
    }
}
