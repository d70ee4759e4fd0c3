use egui::{pos2, vec2, Vec2};
use garland::editor::Editor;
use garland::element::{self, ImageSource};
use garland::input::{self, PointerEvent, Selection};

const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

fn editor() -> Editor {
    Editor::new(CANVAS)
}

fn ornament_src() -> ImageSource {
    ImageSource::from("assets/ornaments/bauble-red.png")
}

fn tree_src() -> ImageSource {
    ImageSource::from("assets/trees/classic-fir.png")
}

fn down(editor: &mut Editor, x: f32, y: f32) {
    input::handle_event(
        editor,
        PointerEvent::Down {
            pos: pos2(x, y),
            on_resize_handle: false,
        },
    );
}

fn down_on_handle(editor: &mut Editor, x: f32, y: f32) {
    input::handle_event(
        editor,
        PointerEvent::Down {
            pos: pos2(x, y),
            on_resize_handle: true,
        },
    );
}

fn moved(editor: &mut Editor, x: f32, y: f32) {
    input::handle_event(editor, PointerEvent::Moved { pos: pos2(x, y) });
}

fn up(editor: &mut Editor) {
    input::handle_event(editor, PointerEvent::Up);
}

#[test]
fn dragging_an_ornament_clamps_to_the_canvas() {
    let mut editor = editor();
    let id = editor.add_ornament(ornament_src(), pos2(200.0, 150.0));

    down(&mut editor, 200.0, 150.0);
    moved(&mut editor, 5000.0, 5000.0);
    up(&mut editor);

    let el = editor.composition().element(id).expect("still placed");
    // 100x100 box fully inside 800x600.
    assert_eq!(el.pos(), pos2(700.0, 500.0));

    down(&mut editor, 750.0, 550.0);
    moved(&mut editor, -5000.0, -5000.0);
    up(&mut editor);

    let el = editor.composition().element(id).expect("still placed");
    assert_eq!(el.pos(), pos2(0.0, 0.0));
}

#[test]
fn dragging_the_tree_is_never_clamped() {
    let mut editor = editor();
    editor.set_tree(tree_src());

    let start = editor.composition().tree.as_ref().unwrap().pos;
    down(&mut editor, start.x + 10.0, start.y + 10.0);
    moved(&mut editor, -2000.0, -2000.0);
    up(&mut editor);

    let tree = editor.composition().tree.as_ref().unwrap();
    assert!(tree.pos.x < 0.0);
    assert!(tree.pos.y < 0.0);
}

#[test]
fn a_completed_drag_commits_exactly_one_snapshot() {
    let mut editor = editor();
    editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    let before = editor.history().len();

    down(&mut editor, 200.0, 150.0);
    moved(&mut editor, 220.0, 170.0);
    moved(&mut editor, 260.0, 210.0);
    moved(&mut editor, 300.0, 260.0);
    up(&mut editor);

    assert_eq!(editor.history().len(), before + 1);
}

#[test]
fn a_click_without_movement_commits_nothing() {
    let mut editor = editor();
    editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    let before = editor.history().len();

    down(&mut editor, 200.0, 150.0);
    up(&mut editor);

    assert_eq!(editor.history().len(), before);
}

#[test]
fn elements_raise_while_dragged_and_settle_after() {
    let mut editor = editor();
    let id = editor.add_ornament(ornament_src(), pos2(200.0, 150.0));

    down(&mut editor, 200.0, 150.0);
    assert_eq!(editor.composition().element(id).unwrap().z(), element::DRAG_Z);
    moved(&mut editor, 210.0, 160.0);
    up(&mut editor);
    assert_eq!(editor.composition().element(id).unwrap().z(), element::BASE_Z);
}

#[test]
fn ornament_resize_floors_at_its_minimum() {
    let mut editor = editor();
    let id = editor.add_ornament(ornament_src(), pos2(200.0, 150.0));

    // Select, then grab the resize affordance.
    down(&mut editor, 200.0, 150.0);
    up(&mut editor);
    assert_eq!(editor.interaction.selection, Selection::Element(id));

    let before = editor.history().len();
    down_on_handle(&mut editor, 200.0, 200.0);
    moved(&mut editor, -5000.0, -5000.0);
    up(&mut editor);

    let el = editor.composition().element(id).unwrap();
    assert_eq!(el.size(), vec2(element::MIN_ORNAMENT_SIZE, element::MIN_ORNAMENT_SIZE));
    assert_eq!(editor.history().len(), before + 1);
}

#[test]
fn ornament_resize_tracks_each_axis_independently() {
    let mut editor = editor();
    let id = editor.add_ornament(ornament_src(), pos2(200.0, 150.0));

    down(&mut editor, 200.0, 150.0);
    up(&mut editor);

    down_on_handle(&mut editor, 200.0, 200.0);
    moved(&mut editor, 240.0, 210.0);
    up(&mut editor);

    let el = editor.composition().element(id).unwrap();
    assert_eq!(el.size(), vec2(140.0, 110.0));
}

#[test]
fn tree_resize_stays_square_and_floors_at_its_minimum() {
    let mut editor = editor();
    editor.set_tree(tree_src());

    // Select the tree, then shrink far past the limit.
    let center = editor.composition().tree.as_ref().unwrap().rect().center();
    down(&mut editor, center.x, center.y);
    up(&mut editor);
    assert_eq!(editor.interaction.selection, Selection::Tree);

    down_on_handle(&mut editor, center.x, center.y);
    moved(&mut editor, center.x - 5000.0, center.y - 4000.0);
    up(&mut editor);

    let tree = editor.composition().tree.as_ref().unwrap();
    assert_eq!(tree.size, Vec2::splat(element::MIN_TREE_SIZE));

    // Growing follows the larger axis delta.
    down_on_handle(&mut editor, center.x, center.y);
    moved(&mut editor, center.x + 40.0, center.y + 90.0);
    up(&mut editor);

    let tree = editor.composition().tree.as_ref().unwrap();
    assert_eq!(tree.size, Vec2::splat(element::MIN_TREE_SIZE + 90.0));
}

#[test]
fn selection_is_exclusive_and_cleared_on_empty_canvas() {
    let mut editor = editor();
    let first = editor.add_ornament(ornament_src(), pos2(100.0, 100.0));
    let second = editor.add_ornament(ornament_src(), pos2(400.0, 400.0));

    down(&mut editor, 100.0, 100.0);
    up(&mut editor);
    assert_eq!(editor.interaction.selection, Selection::Element(first));

    down(&mut editor, 400.0, 400.0);
    up(&mut editor);
    assert_eq!(editor.interaction.selection, Selection::Element(second));

    down(&mut editor, 700.0, 50.0);
    up(&mut editor);
    assert_eq!(editor.interaction.selection, Selection::None);
}

#[test]
fn later_elements_win_overlapping_hits() {
    let mut editor = editor();
    editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    let top = editor.add_ornament(ornament_src(), pos2(210.0, 160.0));

    down(&mut editor, 210.0, 160.0);
    up(&mut editor);
    assert_eq!(editor.interaction.selection, Selection::Element(top));
}

#[test]
fn double_click_removes_an_ornament_without_confirmation() {
    let mut editor = editor();
    editor.add_ornament(ornament_src(), pos2(200.0, 150.0));
    let before = editor.history().len();

    input::handle_event(&mut editor, PointerEvent::DoubleClick { pos: pos2(200.0, 150.0) });

    assert!(editor.composition().is_empty());
    assert_eq!(editor.history().len(), before + 1);
}

#[test]
fn text_removal_waits_for_confirmation() {
    let mut editor = editor();
    let id = editor.add_text("Merry!");
    let before = editor.history().len();

    input::handle_event(&mut editor, PointerEvent::RemoveRequested { id });
    assert_eq!(editor.composition().len(), 1, "nothing removed before confirming");
    assert_eq!(editor.interaction.pending_removal, Some(id));

    input::handle_event(&mut editor, PointerEvent::RemovalConfirmed);
    assert!(editor.composition().is_empty());
    assert_eq!(editor.history().len(), before + 1);
}

#[test]
fn cancelled_text_removal_keeps_the_element() {
    let mut editor = editor();
    let id = editor.add_text("Merry!");
    let before = editor.history().len();

    input::handle_event(&mut editor, PointerEvent::RemoveRequested { id });
    input::handle_event(&mut editor, PointerEvent::RemovalCancelled);

    assert_eq!(editor.composition().len(), 1);
    assert_eq!(editor.interaction.pending_removal, None);
    assert_eq!(editor.history().len(), before);
}

#[test]
fn finishing_a_text_edit_commits_the_new_content() {
    let mut editor = editor();
    let id = editor.add_text("Ho ho");
    let pos = editor.composition().element(id).unwrap().pos();

    input::handle_event(&mut editor, PointerEvent::DoubleClick { pos });
    assert_eq!(editor.interaction.editing_text(), Some(id));

    // No dragging while the element is being edited in place.
    let before = editor.composition().element(id).unwrap().pos();
    down(&mut editor, pos.x + 2.0, pos.y + 2.0);
    moved(&mut editor, pos.x + 300.0, pos.y + 300.0);
    assert_eq!(editor.composition().element(id).unwrap().pos(), before);
    up(&mut editor);

    let commits = editor.history().len();
    input::handle_event(
        &mut editor,
        PointerEvent::EndTextEdit {
            id,
            content: "Ho ho ho!".to_owned(),
        },
    );
    assert_eq!(editor.interaction.editing_text(), None);
    let text = editor.composition().element(id).unwrap().as_text().unwrap();
    assert_eq!(text.content(), "Ho ho ho!");
    assert_eq!(editor.history().len(), commits + 1);
}

#[test]
fn pointer_up_resets_a_gesture_even_when_none_was_in_progress() {
    let mut editor = editor();
    up(&mut editor);
    assert_eq!(editor.interaction.mode, garland::input::Mode::Idle);
    assert!(editor.composition().is_empty());
}
