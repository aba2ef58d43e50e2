use egui::{Color32, Pos2};
use photo_lite::raster::{ActiveStroke, SegmentParams, StrokeLayer};
use photo_lite::tool::{BrushSettings, CapShape, EraserSettings, StrokeStyle};

fn layer() -> StrokeLayer {
    StrokeLayer::new(100, 100)
}

fn draw_line(layer: &mut StrokeLayer, from: Pos2, to: Pos2, params: &SegmentParams) {
    let mut stroke = ActiveStroke::begin(layer, from);
    stroke.add_segment(layer, to, params);
}

#[test]
fn half_opacity_red_composites_over_white() {
    let mut layer = layer();
    let brush = BrushSettings {
        color: Color32::from_rgb(255, 0, 0),
        opacity: 0.5,
        ..Default::default()
    };
    let params = SegmentParams::for_brush(&brush, Pos2::new(10.0, 10.0));
    draw_line(&mut layer, Pos2::new(10.0, 10.0), Pos2::new(50.0, 10.0), &params);

    // Along the interior of the path the composite over white must be
    // uniformly 50% red: (255, ~127, ~127).
    for x in [15, 25, 35, 45] {
        let c = layer.composited_pixel(x, 10, Color32::WHITE);
        assert_eq!(c.r(), 255);
        assert!((c.g() as i32 - 127).abs() <= 2, "g at x={x} was {}", c.g());
        assert!((c.b() as i32 - 127).abs() <= 2, "b at x={x} was {}", c.b());
    }
}

#[test]
fn translucent_stroke_is_uniform_across_segment_joints() {
    let mut layer = layer();
    let brush = BrushSettings {
        color: Color32::from_rgb(255, 0, 0),
        opacity: 0.5,
        ..Default::default()
    };
    let params = SegmentParams::for_brush(&brush, Pos2::new(10.0, 50.0));

    let mut stroke = ActiveStroke::begin(&layer, Pos2::new(10.0, 50.0));
    stroke.add_segment(&mut layer, Pos2::new(40.0, 50.0), &params);
    stroke.add_segment(&mut layer, Pos2::new(70.0, 50.0), &params);

    // The joint at x=40 must not be darker than the middles of either
    // segment: coverage is max-merged, not stacked.
    let joint = layer.pixel(40, 50)[3];
    let mid_a = layer.pixel(25, 50)[3];
    let mid_b = layer.pixel(55, 50)[3];
    assert!((joint as i32 - mid_a as i32).abs() <= 2);
    assert!((joint as i32 - mid_b as i32).abs() <= 2);
}

#[test]
fn eraser_clears_at_full_strength_regardless_of_brush_opacity() {
    let mut layer = layer();
    // Fully opaque paint first.
    let brush = BrushSettings {
        color: Color32::from_rgb(0, 0, 255),
        ..Default::default()
    };
    let params = SegmentParams::for_brush(&brush, Pos2::new(20.0, 30.0));
    draw_line(&mut layer, Pos2::new(20.0, 30.0), Pos2::new(80.0, 30.0), &params);
    assert_eq!(layer.pixel(50, 30)[3], 255);

    // The eraser's parameters never look at the brush, so a nearly
    // transparent brush setting changes nothing about erasing.
    let eraser = SegmentParams::for_eraser(&EraserSettings { size: 20.0 });
    assert_eq!(eraser.opacity, 1.0);
    draw_line(&mut layer, Pos2::new(50.0, 10.0), Pos2::new(50.0, 50.0), &eraser);

    assert_eq!(layer.pixel(50, 30)[3], 0);
    // Outside the eraser's width the paint is still there.
    assert_eq!(layer.pixel(70, 30)[3], 255);
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let mut layer = layer();
    let brush = BrushSettings {
        style: StrokeStyle::Dashed,
        ..Default::default()
    };
    // Size 5 gives a [30, 10] pattern: on for x in [5, 35), off until 45,
    // with the round cap adding at most ~3px past the dash end.
    let params = SegmentParams::for_brush(&brush, Pos2::new(5.0, 60.0));
    draw_line(&mut layer, Pos2::new(5.0, 60.0), Pos2::new(95.0, 60.0), &params);

    assert_ne!(layer.pixel(20, 60)[3], 0, "inside the first dash");
    assert_eq!(layer.pixel(41, 60)[3], 0, "middle of the first gap");
    assert_ne!(layer.pixel(50, 60)[3], 0, "inside the second dash");
}

#[test]
fn calligraphy_shears_the_segment() {
    let mut layer = layer();
    let brush = BrushSettings {
        cap: CapShape::Calligraphy,
        ..Default::default()
    };
    let origin = Pos2::new(20.0, 20.0);
    let params = SegmentParams::for_brush(&brush, origin);
    assert!(params.shear.is_some());
    draw_line(&mut layer, origin, Pos2::new(40.0, 20.0), &params);

    // The sheared spine runs from (20,20) towards (40,30); halfway along it
    // is painted, while the unsheared midpoint is not.
    assert_ne!(layer.pixel(30, 25)[3], 0);
    assert_eq!(layer.pixel(30, 20)[3], 0);
}

#[test]
fn chalk_texture_scatters_translucent_grain() {
    let mut layer = layer();
    let brush = BrushSettings {
        texture: photo_lite::tool::BrushTexture::Chalk,
        ..Default::default()
    };
    let params = SegmentParams::for_brush(&brush, Pos2::new(10.0, 80.0));
    assert!(params.jitter.is_some());
    draw_line(&mut layer, Pos2::new(10.0, 80.0), Pos2::new(90.0, 80.0), &params);

    // Jitter passes are capped in strength, so nothing reaches full alpha,
    // but the spine region must have picked up paint somewhere.
    let mut any = 0u32;
    for x in 12..88 {
        for y in 76..85 {
            let a = layer.pixel(x, y)[3];
            assert!(a < 255);
            any += a as u32;
        }
    }
    assert!(any > 0, "chalk stroke left no paint at all");
}

#[test]
fn mid_stroke_parameter_changes_apply_to_the_next_segment() {
    let mut layer = layer();
    let mut brush = BrushSettings::default();
    let mut stroke = ActiveStroke::begin(&layer, Pos2::new(10.0, 90.0));

    let params = SegmentParams::for_brush(&brush, stroke.origin());
    stroke.add_segment(&mut layer, Pos2::new(40.0, 90.0), &params);

    brush.color = Color32::from_rgb(0, 255, 0);
    let params = SegmentParams::for_brush(&brush, stroke.origin());
    stroke.add_segment(&mut layer, Pos2::new(70.0, 90.0), &params);

    let first = layer.composited_pixel(25, 90, Color32::WHITE);
    let second = layer.composited_pixel(55, 90, Color32::WHITE);
    assert_eq!(first, Color32::from_rgb(0, 0, 0));
    assert_eq!(second, Color32::from_rgb(0, 255, 0));
}
