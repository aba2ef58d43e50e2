use egui::{Color32, Context, Painter, Pos2, Rect, Stroke};

use crate::state::EditorState;

const SELECTION_COLOR: Color32 = Color32::from_rgb(30, 120, 255);

/// Redraws the whole canvas whenever the scene changes.
///
/// Draw order: blank background, the stroke layer (strokes are baked into
/// its pixels, never replayed), then every image in list order, with a
/// selection outline and resize handle on the selected one.
pub fn render_canvas(ctx: &Context, painter: &Painter, canvas_rect: Rect, state: &mut EditorState) {
    painter.rect_filled(canvas_rect, 0.0, Color32::WHITE);

    let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
    let stroke_texture = state.layer.texture_id(ctx);
    painter.image(stroke_texture, canvas_rect, uv, Color32::WHITE);

    let offset = canvas_rect.min.to_vec2();
    let selected = state.scene.selected_id();
    for image in state.scene.images_mut() {
        let texture = image.texture_id(ctx);
        let screen_rect = image.rect().translate(offset);
        painter.image(texture, screen_rect, uv, Color32::WHITE);

        if Some(image.id()) == selected {
            painter.rect_stroke(screen_rect, 0.0, Stroke::new(1.5, SELECTION_COLOR));
            let handle = image.handle_rect().translate(offset);
            painter.rect_filled(handle, 2.0, SELECTION_COLOR);
            painter.rect_stroke(handle, 2.0, Stroke::new(1.0, Color32::WHITE));
        }
    }
}
