use egui::{Slider, Ui};

use crate::state::EditorState;
use crate::tool::{BrushTexture, CapShape, StrokeStyle, ToolKind};

/// Left-hand panel with tool selection and the active tool's parameters.
///
/// Controls mutate the tool store directly; the renderer reads it fresh on
/// every stroke segment, so changes apply immediately, even mid-stroke.
pub fn tools_panel(state: &mut EditorState, ctx: &egui::Context) {
    egui::SidePanel::left("tools_panel")
        .resizable(true)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.heading("Tools");

            for kind in [ToolKind::Brush, ToolKind::Eraser] {
                let is_active = state.tools.active() == kind;
                if ui.selectable_label(is_active, kind.name()).clicked() {
                    log::info!("tool selected from UI: {}", kind.name());
                    state.tools.set_active(kind);
                }
            }
            ui.separator();

            match state.tools.active() {
                ToolKind::Brush => brush_controls(ui, state),
                ToolKind::Eraser => eraser_controls(ui, state),
            }

            ui.separator();
            if ui.button("Clear canvas").clicked() {
                state.clear_canvas();
            }

            ui.separator();
            ui.label(format!(
                "Pointer: x {} y {}",
                state.pointer.x.round(),
                state.pointer.y.round()
            ));
            ui.label(format!("State: {}", state.interaction.state_name()));
        });
}

fn brush_controls(ui: &mut Ui, state: &mut EditorState) {
    let brush = &mut state.tools.brush;

    ui.horizontal(|ui| {
        ui.label("Size:");
        ui.add(Slider::new(&mut brush.size, 1.0..=50.0));
    });
    ui.horizontal(|ui| {
        ui.label("Color:");
        egui::color_picker::color_edit_button_srgba(
            ui,
            &mut brush.color,
            egui::color_picker::Alpha::Opaque,
        );
    });
    ui.horizontal(|ui| {
        ui.label("Opacity:");
        ui.add(Slider::new(&mut brush.opacity, 0.0..=1.0));
    });

    egui::ComboBox::from_label("Style")
        .selected_text(brush.style.label())
        .show_ui(ui, |ui| {
            for style in StrokeStyle::ALL {
                ui.selectable_value(&mut brush.style, style, style.label());
            }
        });
    egui::ComboBox::from_label("Shape")
        .selected_text(brush.cap.label())
        .show_ui(ui, |ui| {
            for cap in CapShape::ALL {
                ui.selectable_value(&mut brush.cap, cap, cap.label());
            }
        });
    egui::ComboBox::from_label("Texture")
        .selected_text(brush.texture.label())
        .show_ui(ui, |ui| {
            for texture in BrushTexture::ALL {
                ui.selectable_value(&mut brush.texture, texture, texture.label());
            }
        });
}

fn eraser_controls(ui: &mut Ui, state: &mut EditorState) {
    ui.horizontal(|ui| {
        ui.label("Size:");
        ui.add(Slider::new(&mut state.tools.eraser.size, 1.0..=100.0));
    });
}
