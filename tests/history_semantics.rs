use egui::pos2;
use garland::element::{ImageSource, Ornament, PlacedElement};
use garland::history::History;
use garland::Composition;

fn composition_with(count: usize) -> Composition {
    let mut composition = Composition::new();
    for i in 0..count {
        composition.add(PlacedElement::Ornament(Ornament::new(
            ImageSource::from("assets/ornaments/bauble-red.png"),
            pos2(10.0 * i as f32, 0.0),
        )));
    }
    composition
}

#[test]
fn undo_returns_previous_snapshot() {
    let mut history = History::new();
    history.commit(composition_with(0));
    history.commit(composition_with(1));
    history.commit(composition_with(2));

    let restored = history.undo().expect("can undo");
    assert_eq!(restored.len(), 1);
    let restored = history.undo().expect("can undo");
    assert_eq!(restored.len(), 0);
}

#[test]
fn undo_is_a_no_op_at_the_first_entry() {
    let mut history = History::new();
    history.commit(composition_with(0));
    assert!(!history.can_undo());
    assert!(history.undo().is_none());

    history.commit(composition_with(1));
    assert!(history.undo().is_some());
    assert!(history.undo().is_none());
}

#[test]
fn redo_restores_the_pre_undo_state() {
    let mut history = History::new();
    history.commit(composition_with(0));
    history.commit(composition_with(1));
    history.commit(composition_with(2));

    history.undo().expect("can undo");
    let restored = history.redo().expect("can redo");
    assert_eq!(restored.len(), 2);
    assert!(history.redo().is_none());
}

#[test]
fn a_new_commit_discards_redo_entries() {
    let mut history = History::new();
    history.commit(composition_with(0));
    history.commit(composition_with(1));
    history.commit(composition_with(2));

    history.undo().expect("can undo");
    history.undo().expect("can undo");
    history.commit(composition_with(7));

    assert!(!history.can_redo());
    assert!(history.redo().is_none());
    // The branch we abandoned is gone; undo walks back to the start.
    assert_eq!(history.undo().expect("can undo").len(), 0);
    assert!(history.undo().is_none());
}

#[test]
fn history_never_exceeds_its_capacity() {
    let mut history = History::with_capacity(3);
    for i in 0..10 {
        history.commit(composition_with(i));
    }
    assert_eq!(history.len(), 3);
}

#[test]
fn overflow_evicts_the_oldest_entry() {
    let mut history = History::with_capacity(3);
    history.commit(composition_with(0));
    history.commit(composition_with(1));
    history.commit(composition_with(2));
    history.commit(composition_with(3));

    // The window slid: walking all the way back lands on state 1, state 0
    // is unreachable.
    let mut last = None;
    while let Some(snapshot) = history.undo() {
        last = Some(snapshot);
    }
    assert_eq!(last.expect("undid at least once").len(), 1);
}

#[test]
fn redo_still_works_at_the_sliding_window_edge() {
    let mut history = History::with_capacity(2);
    history.commit(composition_with(0));
    history.commit(composition_with(1));
    history.commit(composition_with(2));

    assert_eq!(history.undo().expect("can undo").len(), 1);
    assert_eq!(history.redo().expect("can redo").len(), 2);
}
