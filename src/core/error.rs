//! Error taxonomy for the render cache.
//!
//! Every variant is a programmer error or an arithmetic defect, not a
//! transient condition: nothing here is retried internally, and the frame
//! loop is expected to treat any of them as fatal for the frame.

use thiserror::Error;

use crate::core::coords::{ChunkCoord, PixelPos};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Placement or removal routed to a chunk coordinate nothing was
    /// created at. Chunks are never created implicitly.
    #[error("no chunk loaded at {0:?}")]
    ChunkNotLoaded(ChunkCoord),

    /// `create_chunk` on a coordinate that is already populated.
    #[error("chunk already exists at {0:?}")]
    ChunkAlreadyExists(ChunkCoord),

    /// Removal did not find the occupant at the sub-cell derived from its
    /// current position. The caller broke the withdraw-before-move
    /// protocol, or never placed the occupant.
    #[error("occupant not found at sub-cell {sub_cell:?} of tile {tile:?}")]
    OccupantNotFound {
        tile: (i32, i32),
        sub_cell: (i32, i32),
    },

    /// Operation addressed a tile slot whose tile was dropped as dead.
    #[error("tile slot {slot} of chunk {chunk:?} is retired")]
    TileRetired { chunk: ChunkCoord, slot: usize },

    /// Intra-chunk tile index escaped `0..64` — a coordinate-arithmetic
    /// defect upstream, never a data condition.
    #[error("intra-chunk tile index {index} out of range for pixel {pixel:?}")]
    TileIndexOutOfRange { index: usize, pixel: PixelPos },

    /// Texture lookup for a name never registered.
    #[error("unknown texture: {0}")]
    UnknownTexture(String),

    /// Sprite operation on an id that was never spawned or was despawned.
    #[error("unknown sprite id: {0}")]
    UnknownSprite(u32),

    /// A pixel buffer length does not match its declared dimensions.
    #[error("bitmap buffer length {actual} does not match dimensions ({expected} expected)")]
    BitmapSizeMismatch { expected: usize, actual: usize },
}
