use egui::{pos2, vec2, Color32, Vec2};
use garland::composition::{Background, BackgroundFill};
use garland::editor::Editor;
use garland::element::ImageSource;
use garland::input::{self, PointerEvent};
use garland::persist::DesignPayload;
use garland::render;

const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

fn ornament_src() -> ImageSource {
    ImageSource::from("assets/ornaments/bauble-red.png")
}

#[test]
fn an_ornament_lands_centered_on_its_drop_point() {
    let mut editor = Editor::new(CANVAS);
    let id = editor.add_ornament(ornament_src(), pos2(200.0, 150.0));

    let el = editor.composition().element(id).expect("placed");
    assert_eq!(el.pos(), pos2(150.0, 100.0));
    assert_eq!(el.size(), vec2(100.0, 100.0));

    let payload = DesignPayload::from_composition(editor.composition(), 0);
    let json = serde_json::to_value(&payload).expect("serializes");
    assert_eq!(json["ornaments"][0]["left"], "150px");
    assert_eq!(json["ornaments"][0]["top"], "100px");
}

#[test]
fn add_and_delete_each_commit_one_snapshot() {
    let mut editor = Editor::new(CANVAS);
    let initial = editor.history().len();

    let id = editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    assert_eq!(editor.history().len(), initial + 1);

    assert!(editor.remove_element(id));
    assert!(editor.composition().is_empty());
    assert_eq!(editor.history().len(), initial + 2);
}

#[test]
fn new_text_is_centered_and_uses_the_current_settings() {
    let mut editor = Editor::new(CANVAS);
    editor.text_settings.font_size = 32.0;
    editor.text_settings.color = Color32::from_rgb(0xc4, 0x1e, 0x3a);

    let id = editor.add_text("Joy");
    let text = editor.composition().element(id).unwrap().as_text().unwrap();
    assert_eq!(text.pos(), pos2(350.0, 280.0));
    assert_eq!(text.font_size(), 32.0);
    assert_eq!(text.color(), Color32::from_rgb(0xc4, 0x1e, 0x3a));
}

#[test]
fn undoing_a_background_change_restores_the_previous_one() {
    let mut editor = Editor::new(CANVAS);
    editor.set_background(Background::preset(
        "pattern-1",
        "linear-gradient(180deg, #e8f4f8 0%, #d6eaf8 100%)",
    ));
    editor.set_background(Background::preset(
        "christmas-red",
        "repeating-linear-gradient(135deg, #c41e3a 0%, #c41e3a 10%, #ffffff 10%, #ffffff 20%)",
    ));

    editor.undo();

    // Back to the first change, not the initial empty background.
    assert_eq!(editor.composition().background.tag, "pattern-1");

    editor.undo();
    assert_eq!(editor.composition().background.tag, "");
}

#[test]
fn a_sequence_of_edits_fully_unwinds() {
    let mut editor = Editor::new(CANVAS);
    let initial = editor.composition().clone();
    let baseline = editor.history().len();

    let id = editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    editor.add_text("Noel");
    editor.set_background(Background::solid("#1a1a2e"));
    input::handle_event(&mut editor, PointerEvent::Down { pos: pos2(200.0, 150.0), on_resize_handle: false });
    input::handle_event(&mut editor, PointerEvent::Moved { pos: pos2(400.0, 300.0) });
    input::handle_event(&mut editor, PointerEvent::Up);
    assert!(editor.remove_element(id));

    let committed = editor.history().len() - baseline;
    assert_eq!(committed, 5);
    for _ in 0..committed {
        editor.undo();
    }
    assert_eq!(editor.composition(), &initial);
}

#[test]
fn redo_after_undo_restores_the_exact_state() {
    let mut editor = Editor::new(CANVAS);
    editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    editor.add_text("Noel");
    let full = editor.composition().clone();

    editor.undo();
    assert_ne!(editor.composition(), &full);
    editor.redo();
    assert_eq!(editor.composition(), &full);
}

#[test]
fn clear_removes_decorations_and_resets_the_background_once() {
    let mut editor = Editor::new(CANVAS);
    editor.set_tree(ImageSource::from("assets/trees/classic-fir.png"));
    editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    editor.add_text("Noel");
    editor.set_background(Background::solid("#1a1a2e"));

    let before = editor.history().len();
    editor.clear();

    assert!(editor.composition().is_empty());
    assert_eq!(editor.composition().background, Background::default());
    assert!(editor.composition().tree.is_some(), "the tree survives a clear");
    assert_eq!(editor.history().len(), before + 1);

    // And the clear itself is one undoable step.
    editor.undo();
    assert_eq!(editor.composition().len(), 2);
    assert_eq!(editor.composition().background.tag, "solid-#1a1a2e");
}

#[test]
fn changing_the_tree_keeps_its_geometry() {
    let mut editor = Editor::new(CANVAS);
    editor.set_tree(ImageSource::from("assets/trees/classic-fir.png"));

    // Move it, then swap the image.
    {
        let tree_center = editor.composition().tree.as_ref().unwrap().rect().center();
        input::handle_event(&mut editor, PointerEvent::Down { pos: tree_center, on_resize_handle: false });
        input::handle_event(&mut editor, PointerEvent::Moved { pos: pos2(tree_center.x + 60.0, tree_center.y) });
        input::handle_event(&mut editor, PointerEvent::Up);
    }
    let moved_pos = editor.composition().tree.as_ref().unwrap().pos;

    editor.set_tree(ImageSource::from("assets/trees/snowy-pine.png"));
    let tree = editor.composition().tree.as_ref().unwrap();
    assert_eq!(tree.pos, moved_pos);
    assert_eq!(tree.src.as_str(), "assets/trees/snowy-pine.png");
}

#[test]
fn the_scene_orders_background_tree_then_elements_by_stacking() {
    let mut editor = Editor::new(CANVAS);
    editor.set_tree(ImageSource::from("assets/trees/classic-fir.png"));
    editor.add_text("Noel");
    editor.add_ornament(ornament_src(), pos2(200.0, 150.0));

    let scene = render::scene(editor.composition());
    assert_eq!(scene.fill, BackgroundFill::Solid(Color32::WHITE));
    assert!(matches!(scene.nodes[0], render::SceneNode::Tree { .. }));
    // Equal stacking: insertion order is preserved.
    assert!(matches!(scene.nodes[1], render::SceneNode::Text { .. }));
    assert!(matches!(scene.nodes[2], render::SceneNode::Ornament { .. }));
}
