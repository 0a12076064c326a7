//! A 16x16 pixel cache cell: the occupants anchored inside it plus the
//! composited bitmap of background and occupants.
//!
//! Two dirty bits with different consumers:
//! - `render_required` tells the tile itself to repaint, cleared only by
//!   `regenerate`.
//! - `changed` tells the owning chunk to re-blit this tile's bitmap into
//!   its canvas, cleared by `consume_changed` (read-once).
//!
//! They are always set together on mutation but cleared independently;
//! collapsing them would break the chunk's differential composite.

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::core::bitmap::Bitmap;
use crate::core::coords::{tile_of, PixelPos, TILE_SIZE};
use crate::core::error::WorldError;
use crate::domain::occupant::{same_occupant, OccupantRef};

/// Sub-cell key: occupant pixel offset inside the tile, `0..15` per axis
pub type SubCell = (i32, i32);

pub struct Tile {
    /// World-space pixel origin of this cell
    origin: PixelPos,
    background: Rc<Bitmap>,
    image: Bitmap,
    /// Occupants grouped by sub-cell, each group in insertion order
    occupants: BTreeMap<SubCell, Vec<OccupantRef>>,
    alive: bool,
    changed: bool,
    render_required: bool,
}

impl Tile {
    /// Create an empty tile. Both dirty bits start set so the first
    /// advance paints the background into the cache.
    pub fn new(origin: PixelPos, background: Rc<Bitmap>) -> Self {
        Self {
            origin,
            background,
            image: Bitmap::new(TILE_SIZE as u32, TILE_SIZE as u32),
            occupants: BTreeMap::new(),
            alive: true,
            changed: true,
            render_required: true,
        }
    }

    /// World-space pixel origin of the cell
    pub fn origin(&self) -> PixelPos {
        self.origin
    }

    /// Composited bitmap as of the last regeneration
    pub fn image(&self) -> &Bitmap {
        &self.image
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Eviction hook for a collaborator-driven unloading policy; nothing
    /// in the cache itself clears this.
    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    /// Total occupants across all sub-cells
    pub fn occupant_count(&self) -> usize {
        self.occupants.values().map(Vec::len).sum()
    }

    /// Anchor the occupant at the sub-cell derived from its current
    /// position. The anchor must fall inside this cell; quantized keys
    /// outside `0..15` are a caller contract violation.
    pub fn add_occupant(&mut self, occupant: &OccupantRef) {
        let sub_cell = self.sub_cell_of(occupant.render_position());
        debug_assert!(
            (0..TILE_SIZE).contains(&sub_cell.0) && (0..TILE_SIZE).contains(&sub_cell.1),
            "occupant anchor {:?} outside tile at {:?}",
            occupant.render_position(),
            self.origin,
        );

        self.occupants
            .entry(sub_cell)
            .or_default()
            .push(Rc::clone(occupant));

        self.mark_mutated();
    }

    /// Remove the occupant from the sub-cell derived from its *current*
    /// position — callers moving an occupant must remove it before
    /// mutating the position.
    pub fn remove_occupant(&mut self, occupant: &OccupantRef) -> Result<(), WorldError> {
        let sub_cell = self.sub_cell_of(occupant.render_position());
        let not_found = || WorldError::OccupantNotFound {
            tile: tile_of(self.origin),
            sub_cell,
        };

        let seq = self.occupants.get_mut(&sub_cell).ok_or_else(not_found)?;
        let index = seq
            .iter()
            .position(|o| same_occupant(o, occupant))
            .ok_or_else(not_found)?;

        seq.remove(index);
        if seq.is_empty() {
            self.occupants.remove(&sub_cell);
        }

        self.mark_mutated();
        Ok(())
    }

    /// Repaint the cached bitmap if the occupant set changed since the
    /// last repaint. Always a full repaint: background copy, then every
    /// occupant image in ascending `depth_key` order (stable, so
    /// same-depth occupants keep insertion order). A vacated sub-cell is
    /// erased by the background copy.
    pub fn regenerate(&mut self) {
        if !self.render_required {
            return;
        }

        let mut image = Bitmap::new(TILE_SIZE as u32, TILE_SIZE as u32);
        image.copy_from(&self.background, 0, 0);

        let mut order: Vec<(SubCell, &OccupantRef)> = Vec::new();
        for (sub_cell, seq) in &self.occupants {
            for occupant in seq {
                order.push((*sub_cell, occupant));
            }
        }
        order.sort_by_key(|(_, occupant)| occupant.depth_key());

        for (sub_cell, occupant) in order {
            image.blit_over(&occupant.image(), sub_cell.0, sub_cell.1);
        }

        log::trace!("tile {:?} regenerated", tile_of(self.origin));
        self.image = image;
        self.render_required = false;
    }

    /// Read-and-clear the chunk-facing dirty bit. Two composite passes in
    /// one frame must not both re-blit this tile.
    pub fn consume_changed(&mut self) -> bool {
        let changed = self.changed;
        self.changed = false;
        changed
    }

    /// Regenerate if required; reports liveness to the owning chunk.
    pub fn advance(&mut self) -> bool {
        if self.render_required {
            self.regenerate();
        }
        self.alive
    }

    #[inline]
    fn sub_cell_of(&self, position: PixelPos) -> SubCell {
        (position.0 - self.origin.0, position.1 - self.origin.1)
    }

    fn mark_mutated(&mut self) {
        self.changed = true;
        self.render_required = true;
    }
}
