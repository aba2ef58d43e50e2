use crate::import::FileImporter;
use crate::input::InputCollector;
use crate::panels;
use crate::renderer;
use crate::state::EditorState;
use crate::tool::ToolStore;

/// The photo-lite editor application.
pub struct PhotoLiteApp {
    state: EditorState,
    input: InputCollector,
    importer: FileImporter,
}

impl PhotoLiteApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut state = EditorState::new();
        // Tool settings survive restarts; the scene and the drawing do not.
        if let Some(storage) = cc.storage {
            if let Some(tools) = eframe::get_value::<ToolStore>(storage, eframe::APP_KEY) {
                state.tools = tools;
            }
        }
        Self {
            state,
            input: InputCollector::new(),
            importer: FileImporter::new(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut EditorState {
        &mut self.state
    }

    /// Collect this frame's pointer events against the canvas rect and feed
    /// them through the interaction state machine.
    pub fn handle_input(&mut self, ctx: &egui::Context, canvas_rect: egui::Rect) {
        self.input.set_canvas_rect(canvas_rect);
        let events = self.input.collect(ctx);
        self.state.handle_events(events);
    }

    pub fn render_canvas(
        &mut self,
        ctx: &egui::Context,
        painter: &egui::Painter,
        canvas_rect: egui::Rect,
    ) {
        renderer::render_canvas(ctx, painter, canvas_rect, &mut self.state);
    }
}

impl eframe::App for PhotoLiteApp {
    /// Called by the framework to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.state.tools);
    }

    /// Called each time the UI needs repainting.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for (file_name, result) in self.importer.poll(ctx) {
            self.state.apply_import(&file_name, result);
        }
        self.importer.preview_hovered_files(ctx);

        panels::tools_panel(&mut self.state, ctx);
        panels::canvas_panel(self, ctx);

        if let Some(message) = self.state.notice.clone() {
            egui::Window::new("Import failed")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("Dismiss").clicked() {
                        self.state.notice = None;
                    }
                });
        }
    }
}
