//! Coordinate arithmetic across the three scales of the tile world.
//!
//! Pixel coordinates, tile coordinates (16x16 px cells) and chunk
//! coordinates (8x8 tiles = 128x128 px). All conversions use floor
//! division so negative coordinates round toward negative infinity.

/// Tile edge length in pixels
pub const TILE_SIZE: i32 = 16;

/// Chunk edge length in tiles
pub const CHUNK_TILES: i32 = 8;

/// Chunk edge length in pixels
pub const CHUNK_SIZE: i32 = TILE_SIZE * CHUNK_TILES;

/// Number of tile slots in a chunk
pub const TILES_PER_CHUNK: usize = (CHUNK_TILES * CHUNK_TILES) as usize;

/// Position in pixel space
pub type PixelPos = (i32, i32);

/// Position in tile space
pub type TileCoord = (i32, i32);

/// Position in chunk space
pub type ChunkCoord = (i32, i32);

/// Axis-aligned pixel rectangle (integer, width/height may be zero)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PixelRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

// === Pixel -> tile -> chunk ===

/// Tile containing a pixel position
#[inline]
pub fn tile_of(pixel: PixelPos) -> TileCoord {
    (pixel.0.div_euclid(TILE_SIZE), pixel.1.div_euclid(TILE_SIZE))
}

/// Chunk containing a tile coordinate
#[inline]
pub fn chunk_of(tile: TileCoord) -> ChunkCoord {
    (tile.0.div_euclid(CHUNK_TILES), tile.1.div_euclid(CHUNK_TILES))
}

/// Tile offset within its chunk, always in `0..8` per axis
#[inline]
pub fn intra_chunk(tile: TileCoord) -> (i32, i32) {
    (tile.0.rem_euclid(CHUNK_TILES), tile.1.rem_euclid(CHUNK_TILES))
}

/// Chunk containing a pixel position (composition of the two steps above)
#[inline]
pub fn chunk_of_pixel(pixel: PixelPos) -> ChunkCoord {
    (pixel.0.div_euclid(CHUNK_SIZE), pixel.1.div_euclid(CHUNK_SIZE))
}

/// Tile offset within the owning chunk for a pixel position:
/// `(pixel div 16) mod 8` per axis.
#[inline]
pub fn intra_chunk_of_pixel(pixel: PixelPos) -> (i32, i32) {
    intra_chunk(tile_of(pixel))
}

/// Row-major slot index for an intra-chunk tile offset
#[inline]
pub fn tile_slot(intra: (i32, i32)) -> usize {
    (intra.0 + intra.1 * CHUNK_TILES) as usize
}

/// Pixel origin of a tile slot inside its chunk canvas
#[inline]
pub fn slot_origin(slot: usize) -> (i32, i32) {
    let slot = slot as i32;
    (slot % CHUNK_TILES * TILE_SIZE, slot / CHUNK_TILES * TILE_SIZE)
}

/// Pixel origin of a tile in world space
#[inline]
pub fn tile_origin(tile: TileCoord) -> PixelPos {
    (tile.0 * TILE_SIZE, tile.1 * TILE_SIZE)
}

// === Viewport queries ===

/// Half-open tile ranges `[floor(left/16), ceil(right/16))` per axis
/// covering a pixel rectangle. Empty rectangles yield empty ranges.
pub fn visible_tiles(rect: &PixelRect) -> (std::ops::Range<i32>, std::ops::Range<i32>) {
    if rect.is_empty() {
        return (0..0, 0..0);
    }
    let x0 = rect.x.div_euclid(TILE_SIZE);
    let y0 = rect.y.div_euclid(TILE_SIZE);
    let x1 = div_ceil_i32(rect.right(), TILE_SIZE);
    let y1 = div_ceil_i32(rect.bottom(), TILE_SIZE);
    (x0..x1, y0..y1)
}

/// Ceil division for signed integers with a positive divisor, matching
/// `i32::div_ceil` (still unstable under `int_roundings`) via stable ops.
#[inline]
fn div_ceil_i32(a: i32, b: i32) -> i32 {
    a.div_euclid(b) + (a.rem_euclid(b) != 0) as i32
}
