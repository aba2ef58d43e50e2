use crate::PhotoLiteApp;

/// Central panel hosting the fixed-size drawing surface.
pub fn canvas_panel(app: &mut PhotoLiteApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let desired = app.state().canvas_size();
        let (response, painter) = ui.allocate_painter(desired, egui::Sense::click_and_drag());
        let canvas_rect = response.rect;

        app.handle_input(ctx, canvas_rect);
        app.render_canvas(ctx, &painter, canvas_rect);
    });
}
