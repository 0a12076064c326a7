#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use tilescape_engine::Engine;

#[wasm_bindgen_test]
fn facade_round_trip() {
    let mut engine = Engine::new(256, 128);

    let grass = vec![0u8; 16 * 16 * 4];
    engine.register_texture("grass-tile", 16, 16, &grass).unwrap();

    let player = vec![200u8, 10, 10, 255];
    engine.register_texture("player-0", 1, 1, &player).unwrap();

    engine.create_chunk(0, 0, "grass-tile").unwrap();
    let id = engine.spawn_sprite(10, 20, vec!["player-0".into()]).unwrap();

    engine.draw(0, 0);
    assert_eq!(engine.frame(), 1);
    assert_eq!(engine.framebuffer_len(), 256 * 128);

    engine.move_sprite_by(id, 1, 0).unwrap();
    engine.despawn_sprite(id).unwrap();
    assert_eq!(engine.sprite_count(), 0);
}
