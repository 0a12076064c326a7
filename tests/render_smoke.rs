use std::cell::Cell;
use std::rc::Rc;

use tilescape_engine::{
    rgba, Bitmap, Occupant, OccupantRef, TextureRegistry, WorldError, WorldIndex,
};

const BG: u32 = rgba(30, 140, 30, 255);
const TREE: u32 = rgba(90, 60, 20, 255);

/// Minimal scenery occupant driven directly against the world index,
/// the way an entity-controller collaborator would.
struct Scenery {
    position: Cell<(i32, i32)>,
    image: Rc<Bitmap>,
}

impl Scenery {
    fn new(x: i32, y: i32, color: u32) -> Rc<Self> {
        Rc::new(Self {
            position: Cell::new((x, y)),
            image: Rc::new(Bitmap::solid(1, 1, color)),
        })
    }
}

impl Occupant for Scenery {
    fn render_position(&self) -> (i32, i32) {
        self.position.get()
    }

    fn depth_key(&self) -> i32 {
        self.position.get().1
    }

    fn image(&self) -> Rc<Bitmap> {
        Rc::clone(&self.image)
    }
}

fn world_with_chunk() -> (WorldIndex, TextureRegistry) {
    let mut textures = TextureRegistry::new();
    textures.register("grass-tile", Bitmap::solid(16, 16, BG));
    let mut world = WorldIndex::new();
    world.create_chunk((0, 0), &textures, "grass-tile").unwrap();
    (world, textures)
}

#[test]
fn occupant_at_10_20_shows_at_10_20_after_one_draw() {
    let (mut world, _textures) = world_with_chunk();
    let tree = Scenery::new(10, 20, TREE);
    let handle: OccupantRef = tree.clone();
    world.place_occupant(&handle).unwrap();

    let mut canvas = Bitmap::new(128, 128);
    world.draw(&mut canvas, (0, 0));

    assert_eq!(canvas.pixel(10, 20), Some(TREE));
    assert_eq!(canvas.pixel(10, 21), Some(BG));
}

#[test]
fn movement_is_an_explicit_withdraw_place_pair() {
    let (mut world, _textures) = world_with_chunk();
    let walker = Scenery::new(10, 20, TREE);
    let handle: OccupantRef = walker.clone();
    world.place_occupant(&handle).unwrap();

    world.withdraw_occupant(&handle).unwrap();
    walker.position.set((90, 100));
    world.place_occupant(&handle).unwrap();

    let mut canvas = Bitmap::new(128, 128);
    world.draw(&mut canvas, (0, 0));
    assert_eq!(canvas.pixel(10, 20), Some(BG));
    assert_eq!(canvas.pixel(90, 100), Some(TREE));
}

#[test]
fn skipping_the_withdraw_leaves_the_cache_stale_and_surfaces_on_removal() {
    let (mut world, _textures) = world_with_chunk();
    let walker = Scenery::new(10, 20, TREE);
    let handle: OccupantRef = walker.clone();
    world.place_occupant(&handle).unwrap();

    // Protocol violation: position mutated while still placed.
    walker.position.set((90, 100));
    let err = world.withdraw_occupant(&handle).unwrap_err();
    assert_eq!(
        err,
        WorldError::OccupantNotFound { tile: (5, 6), sub_cell: (10, 4) }
    );
}

#[test]
fn occupancy_totals_match_adds_minus_removes() {
    let (mut world, _textures) = world_with_chunk();
    let occupants: Vec<Rc<Scenery>> = (0..10)
        .map(|i| Scenery::new(3 + i * 11, 5 + i * 9, TREE))
        .collect();

    for o in &occupants {
        let handle: OccupantRef = o.clone();
        world.place_occupant(&handle).unwrap();
    }
    for o in occupants.iter().take(4) {
        let handle: OccupantRef = o.clone();
        world.withdraw_occupant(&handle).unwrap();
    }

    assert_eq!(world.occupant_count(), 6);
}

#[test]
fn depth_keys_order_overlapping_occupants() {
    let (mut world, _textures) = world_with_chunk();

    // Same anchor pixel, same y, so the depth keys tie.
    let back = Scenery::new(40, 40, rgba(1, 1, 1, 255));
    let front = Scenery::new(40, 40, rgba(2, 2, 2, 255));
    let back_handle: OccupantRef = back.clone();
    let front_handle: OccupantRef = front.clone();

    world.place_occupant(&back_handle).unwrap();
    world.place_occupant(&front_handle).unwrap();

    let mut canvas = Bitmap::new(128, 128);
    world.draw(&mut canvas, (0, 0));

    // Equal depth keys: insertion order decides, later on top.
    assert_eq!(canvas.pixel(40, 40), Some(rgba(2, 2, 2, 255)));
}
