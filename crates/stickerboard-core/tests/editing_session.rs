use kurbo::Point;
use stickerboard_core::{
    Background, Editor, EditorError, Element, ElementKind, FilterPreset, MemoryStorage,
    PointerEvent, StickerId, Storage,
};

#[test]
fn add_duplicate_undo_scenario() {
    let mut editor = Editor::new();
    assert!(editor.document().is_empty());

    let first = editor.add_emoji("😀");
    assert_eq!(editor.history().len(), 1);
    assert_eq!(editor.document().len(), 1);
    let after_first = editor.document().clone();

    assert!(!editor.undo());
    assert_eq!(editor.document(), &after_first);

    let copy = editor.duplicate_element(first).unwrap();
    assert_eq!(editor.document().len(), 2);
    assert_eq!(editor.document().get(copy).unwrap().position, Point::new(220.0, 220.0));

    assert!(editor.undo());
    assert_eq!(editor.document().len(), 1);
    assert_eq!(editor.document(), &after_first);
}

#[test]
fn compose_save_and_reload() {
    let mut editor = Editor::new();
    editor.set_background(Background::default_gradient());
    let sticker = editor.add_sticker(StickerId::Crown);
    editor.add_text("Happy birthday!").unwrap();
    editor.set_filter(sticker, FilterPreset::Rainbow);

    editor.handle_pointer(PointerEvent::Down { position: Point::new(205.0, 205.0) });
    editor.handle_pointer(PointerEvent::Move { position: Point::new(105.0, 305.0) });
    editor.handle_pointer(PointerEvent::Up { position: Point::new(105.0, 305.0) });

    let storage = MemoryStorage::new();
    let request = editor.save_request("Birthday", None, "data:image/png;base64,AAAA", false);
    let stored = pollster::block_on(storage.save("guest", request)).unwrap();

    let mut reopened = Editor::new();
    reopened.load(&stored.design_data).unwrap();
    assert_eq!(reopened.document(), editor.document());
    assert_eq!(reopened.history().len(), 1);

    let kinds: Vec<_> = reopened.document().elements().iter().map(Element::kind).collect();
    assert_eq!(kinds, vec![ElementKind::Sticker, ElementKind::Text]);
}

#[test]
fn malformed_payload_keeps_current_document() {
    let mut editor = Editor::new();
    editor.add_emoji("🌈");
    let before = editor.document().clone();

    let err = editor
        .load_json(r#"{ "elements": [ { "content": "🌈", "x": 10, "y": 10 } ] }"#)
        .unwrap_err();
    assert!(matches!(err, EditorError::MalformedPayload(_)));
    assert_eq!(editor.document(), &before);
}
