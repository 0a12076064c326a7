//! The read-only capability set the cache requires from anything placed
//! into it. Movement rules, animation and health live with the caller.

use std::rc::Rc;

use crate::core::bitmap::Bitmap;
use crate::core::coords::PixelPos;

/// A drawable entity anchored in the tile world.
///
/// Implementations may be interior-mutable; the cache only ever takes
/// `&self`. The contract that matters is temporal: `render_position` is
/// read at placement and at removal, so a caller that moves an occupant
/// must withdraw it *before* mutating the position and re-place it after.
pub trait Occupant {
    /// Pixel anchor of the occupant (top-left of its image)
    fn render_position(&self) -> PixelPos;

    /// Back-to-front ordering key; lower keys are drawn first
    fn depth_key(&self) -> i32;

    /// Current image, blitted with alpha at the anchor
    fn image(&self) -> Rc<Bitmap>;
}

/// Shared handle to an occupant
pub type OccupantRef = Rc<dyn Occupant>;

/// Identity comparison for occupant handles.
///
/// Compares the data pointers of the allocations, sidestepping the
/// vtable-identity caveat of `Rc::ptr_eq` on trait objects.
#[inline]
pub fn same_occupant(a: &OccupantRef, b: &OccupantRef) -> bool {
    Rc::as_ptr(a) as *const () == Rc::as_ptr(b) as *const ()
}
