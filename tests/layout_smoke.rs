use tilescape_engine::{rgba, Bitmap, EngineCore};

const BG: u32 = rgba(25, 110, 25, 255);

fn engine() -> EngineCore {
    let mut engine = EngineCore::new(512, 288);
    engine.register_texture("grass-tile", Bitmap::solid(16, 16, BG));
    engine.register_texture("player-0", Bitmap::solid(1, 1, rgba(220, 30, 30, 255)));
    engine
}

#[test]
fn layout_smoke() {
    let mut engine = engine();
    engine
        .load_layout_json(
            r#"{
                "background": "grass-tile",
                "chunks": [[0, 0], [1, 0], [2, 0], [3, 0], [0, 1], [1, 1], [2, 1], [3, 1]]
            }"#,
        )
        .unwrap();
    assert_eq!(engine.chunk_count(), 8);

    let id = engine
        .spawn_sprite((0, 0), &["player-0".to_string()])
        .unwrap();
    engine.move_sprite_by(id, (200, 150)).unwrap();

    engine.draw((0, 16));
    assert_eq!(engine.frame(), 1);
    assert_eq!(engine.framebuffer().pixel(200, 166), Some(rgba(220, 30, 30, 255)));
    assert_eq!(engine.framebuffer().pixel(0, 16), Some(BG));
}

#[test]
fn layout_with_unknown_background_fails_loudly() {
    let mut engine = engine();
    let err = engine
        .load_layout_json(r#"{"background": "sand-tile", "chunks": [[0, 0]]}"#)
        .unwrap_err();
    assert!(err.contains("sand-tile"));
    assert_eq!(engine.chunk_count(), 0);
}
