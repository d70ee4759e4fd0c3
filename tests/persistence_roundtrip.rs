use egui::{pos2, vec2, Vec2};
use garland::composition::BackgroundFill;
use garland::editor::Editor;
use garland::element::ImageSource;
use garland::gallery::{Gallery, GALLERY_RETENTION};
use garland::persist::{
    self, DesignPayload, DesignStore, LocalStore, MemoryStore, SaveScope, StoreError,
};
use garland::render;

const CANVAS: Vec2 = Vec2::new(800.0, 600.0);

fn temp_store(label: &str) -> LocalStore {
    let dir = std::env::temp_dir().join(format!("garland-test-{label}-{}", uuid::Uuid::new_v4()));
    LocalStore::open(dir).expect("temp store opens")
}

fn sample_payload() -> DesignPayload {
    let mut editor = Editor::new(CANVAS);
    editor.set_tree(ImageSource::from("assets/trees/classic-fir.png"));
    editor.add_ornament(ImageSource::from("assets/ornaments/star.png"), pos2(200.0, 150.0));
    editor.add_text("Noel");
    DesignPayload::from_composition(editor.composition(), 1_700_000_000_000)
}

#[test]
fn geometry_round_trips_through_pixel_strings() {
    let payload = sample_payload();
    let json = serde_json::to_string(&payload).expect("serializes");

    assert!(json.contains("\"left\":\"150px\""));
    assert!(json.contains("\"top\":\"100px\""));
    assert!(json.contains("\"width\":\"100px\""));
    assert!(json.contains("\"fontSize\":\"24px\""));

    let reloaded: DesignPayload = serde_json::from_str(&json).expect("parses");
    assert_eq!(reloaded, payload);

    let composition = reloaded.to_composition(CANVAS);
    let ornament = composition.elements()[0].as_ornament().expect("ornament first");
    assert_eq!(ornament.pos(), pos2(150.0, 100.0));
    assert_eq!(ornament.size(), vec2(100.0, 100.0));
}

#[test]
fn loading_tolerates_bare_numbers_and_stringly_stacking() {
    let json = r##"{
        "background": "white",
        "backgroundClass": "",
        "tree": null,
        "ornaments": [
            { "src": "a.png", "left": "150px", "top": 100, "width": "100px", "height": 100.5, "zIndex": "10" }
        ],
        "texts": [
            { "content": "Hi", "left": "10px", "top": "20px", "fontFamily": "Arial", "fontSize": 24, "color": "#ff0000" }
        ],
        "timestamp": 1700000000000
    }"##;

    let payload: DesignPayload = serde_json::from_str(json).expect("lenient parse");
    assert_eq!(payload.ornaments[0].top, 100.0);
    assert_eq!(payload.ornaments[0].height, 100.5);
    assert_eq!(payload.ornaments[0].z_index, 10);
    // Missing zIndex falls back to the element default.
    assert_eq!(payload.texts[0].z_index, 10);
}

#[test]
fn an_empty_design_renders_only_its_background() {
    let json = r#"{
        "background": "white",
        "backgroundClass": "",
        "tree": null,
        "ornaments": [],
        "texts": [],
        "timestamp": 0
    }"#;

    let payload: DesignPayload = serde_json::from_str(json).expect("parses");
    let composition = payload.to_composition(CANVAS);
    let scene = render::scene(&composition);

    assert_eq!(scene.fill, BackgroundFill::Solid(egui::Color32::WHITE));
    assert!(scene.nodes.is_empty());
}

#[test]
fn saving_against_an_unreachable_store_falls_back_locally() {
    let mut shared = MemoryStore::new();
    shared.set_available(false);
    let mut local = temp_store("fallback");
    let payload = sample_payload();

    let outcome = persist::save_design(&mut shared, &mut local, "Anonymous", &payload, &[]);

    assert_eq!(outcome.scope, SaveScope::LocalFallback);
    assert!(outcome.id.starts_with("design_"));
    assert_eq!(outcome.link, format!("view?id={}", outcome.id));

    // The design is really there, and loading falls through to it.
    let loaded = persist::load_design(&mut shared, &local, &outcome.id).expect("loads");
    assert_eq!(loaded.payload, payload);
    assert_eq!(loaded.nickname, "Anonymous");
}

#[test]
fn loading_a_shared_design_counts_the_view() {
    let mut shared = MemoryStore::new();
    let mut local = temp_store("views");
    let payload = sample_payload();

    let outcome = persist::save_design(&mut shared, &mut local, "Robin", &payload, &[1, 2, 3]);
    assert_eq!(outcome.scope, SaveScope::Shared);

    persist::load_design(&mut shared, &local, &outcome.id).expect("loads");
    persist::load_design(&mut shared, &local, &outcome.id).expect("loads");

    let stored = shared.fetch_by_id(&outcome.id).expect("fetches");
    assert_eq!(stored.views, 2);
    assert_eq!(stored.thumbnail_png, vec![1, 2, 3]);
}

#[test]
fn a_missing_design_is_reported_not_found() {
    let mut shared = MemoryStore::new();
    let local = temp_store("missing");

    let result = persist::load_design(&mut shared, &local, "no-such-design");
    assert!(matches!(result, Err(StoreError::NotFound(_))));
}

#[test]
fn likes_increment_in_place() {
    let mut store = MemoryStore::new();
    let payload = sample_payload();
    let id = store.insert("Robin", &payload, &[]).expect("inserts");

    assert_eq!(store.increment_likes(&id).expect("likes"), 1);
    assert_eq!(store.increment_likes(&id).expect("likes"), 2);
    assert_eq!(store.fetch_by_id(&id).expect("fetches").likes, 2);
}

#[test]
fn the_gallery_prunes_down_to_its_retention_limit() {
    let mut store = MemoryStore::new();
    let payload = sample_payload();
    store.insert("first", &payload, &[]).expect("inserts");
    store.insert("second", &payload, &[]).expect("inserts");
    store.insert("third", &payload, &[]).expect("inserts");

    let mut gallery = Gallery::new();
    gallery.refresh(&mut store).expect("refreshes");

    assert_eq!(gallery.entries().len(), GALLERY_RETENTION);
    assert_eq!(gallery.entries()[0].nickname, "third");
    assert_eq!(gallery.entries()[1].nickname, "second");

    // The store itself was pruned, not just the listing.
    let remaining = store.list_recent(usize::MAX).expect("lists");
    assert_eq!(remaining.len(), GALLERY_RETENTION);
}

#[test]
fn local_store_lists_most_recent_first() {
    let mut store = temp_store("recency");
    let payload = sample_payload();
    let a = store.insert("a", &payload, &[]).expect("inserts");
    let b = store.insert("b", &payload, &[]).expect("inserts");

    let recent = store.list_recent(10).expect("lists");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].id, b);
    assert_eq!(recent[1].id, a);

    store.delete_by_ids(&[a.clone(), b.clone()]).expect("deletes");
    assert!(store.list_recent(10).expect("lists").is_empty());
}
