use egui::{Pos2, Vec2};
use photo_lite::scene::{DecodedImage, Scene};

const CANVAS: Vec2 = Vec2::new(800.0, 800.0);

fn decoded(w: u32, h: u32) -> DecodedImage {
    DecodedImage {
        rgba: vec![255; (w * h * 4) as usize],
        size: Vec2::new(w as f32, h as f32),
    }
}

/// At most one image is selected after any sequence of `select` calls, and
/// the scene's selected id always matches the flagged image.
#[test]
fn selection_invariant_holds_across_sequences() {
    let mut scene = Scene::new();
    let a = scene.add_image(decoded(100, 100), CANVAS);
    let b = scene.add_image(decoded(50, 50), CANVAS);
    let c = scene.add_image(decoded(30, 30), CANVAS);

    for id in [Some(a), Some(c), Some(b), None, Some(a), Some(a), None] {
        scene.select(id);
        let flagged: Vec<_> = scene
            .images()
            .iter()
            .filter(|img| img.selected())
            .map(|img| img.id())
            .collect();
        assert!(flagged.len() <= 1);
        assert_eq!(scene.selected_id(), flagged.first().copied());
        assert_eq!(scene.selected_id(), id);
    }
}

#[test]
fn overlap_click_selects_first_in_list_order() {
    let mut scene = Scene::new();
    let a = scene.add_image(decoded(100, 100), CANVAS);
    let b = scene.add_image(decoded(50, 50), CANVAS);
    assert_eq!(scene.selected_id(), Some(b), "add_image selects the newcomer");

    // Both images sit at the origin, so (25, 25) is inside the overlap.
    let hit = scene.hit_test(Pos2::new(25.0, 25.0));
    assert_eq!(hit, Some(a));
}

#[test]
fn clear_destroys_all_images() {
    let mut scene = Scene::new();
    scene.add_image(decoded(10, 10), CANVAS);
    scene.add_image(decoded(20, 20), CANVAS);
    assert_eq!(scene.len(), 2);

    scene.clear();
    assert!(scene.is_empty());
    assert_eq!(scene.selected_id(), None);
}

#[test]
fn undersized_image_keeps_its_natural_size() {
    let mut scene = Scene::new();
    let id = scene.add_image(decoded(300, 200), CANVAS);
    let img = scene.image(id).unwrap();
    assert_eq!(img.size, Vec2::new(300.0, 200.0));
}

#[test]
fn handle_region_sits_on_the_bottom_right_corner() {
    let mut scene = Scene::new();
    let id = scene.add_image(decoded(100, 80), CANVAS);
    let img = scene.image(id).unwrap();
    let handle = img.handle_rect();
    assert_eq!(handle.center(), Pos2::new(100.0, 80.0));
    assert_eq!(handle.size(), Vec2::splat(photo_lite::scene::HANDLE_SIZE));
}
