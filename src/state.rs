use egui::{Pos2, Vec2};
use log::{error, info};

use crate::error::ImportError;
use crate::input::PointerEvent;
use crate::interaction::InteractionController;
use crate::raster::{StrokeLayer, DEFAULT_CANVAS_SIZE};
use crate::scene::{DecodedImage, Scene};
use crate::tool::ToolStore;

/// The editor's entire mutable state, owned in one place and passed by
/// reference to input handling and rendering. There are no ambient
/// singletons; everything is mutated from the UI thread only.
pub struct EditorState {
    pub tools: ToolStore,
    pub scene: Scene,
    pub layer: StrokeLayer,
    pub interaction: InteractionController,
    /// Last known pointer position in canvas coordinates, updated on every
    /// pointer move regardless of what the pointer is doing.
    pub pointer: Pos2,
    /// Pending user-facing import notice, if the last import failed.
    pub notice: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorState {
    pub fn new() -> Self {
        Self {
            tools: ToolStore::default(),
            scene: Scene::new(),
            layer: StrokeLayer::new(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE),
            interaction: InteractionController::new(),
            pointer: Pos2::ZERO,
            notice: None,
        }
    }

    pub fn canvas_size(&self) -> Vec2 {
        Vec2::new(self.layer.width() as f32, self.layer.height() as f32)
    }

    /// Feed one frame's worth of pointer events through the interaction
    /// state machine.
    pub fn handle_events(&mut self, events: impl IntoIterator<Item = PointerEvent>) {
        for event in events {
            if let PointerEvent::Down(pos) | PointerEvent::Moved(pos) = event {
                self.pointer = pos;
            }
            self.interaction
                .handle_event(event, &self.tools, &mut self.scene, &mut self.layer);
        }
    }

    /// Accept or reject one import result, surfacing failures as a notice.
    pub fn apply_import(&mut self, file_name: &str, result: Result<DecodedImage, ImportError>) {
        match result {
            Ok(decoded) => {
                self.scene.add_image(decoded, self.canvas_size());
                self.notice = None;
            }
            Err(err) => {
                error!("import of {} failed: {}", file_name, err);
                self.notice = Some(format!("Import of {file_name} failed: {err}"));
            }
        }
    }

    /// Clear the drawing surface and the scene.
    ///
    /// Also resets the brush's appearance settings (but not its size),
    /// matching the original editor's clear action.
    pub fn clear_canvas(&mut self) {
        info!("clearing canvas ({} images)", self.scene.len());
        self.layer.clear();
        self.scene.clear();
        self.tools.brush.reset_appearance();
    }
}
