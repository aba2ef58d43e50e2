use egui::{Pos2, Vec2};
use uuid::Uuid;

use crate::input::PointerEvent;
use crate::raster::{ActiveStroke, SegmentParams, StrokeLayer};
use crate::scene::{Scene, MIN_IMAGE_SIZE};
use crate::tool::ToolStore;

/// What the pointer is currently doing on the canvas.
///
/// Drawing and image manipulation are mutually exclusive: a pointer-down
/// either grabs an image (or its resize handle) or starts a stroke, never
/// both.
pub enum Interaction {
    Idle,
    Drawing(ActiveStroke),
    Moving {
        id: Uuid,
        /// Offset of the grab point from the image origin, so the image
        /// doesn't jump to center under the pointer.
        grab: Vec2,
    },
    Resizing {
        id: Uuid,
        start_size: Vec2,
        start_pointer: Pos2,
    },
}

impl Interaction {
    pub fn name(&self) -> &'static str {
        match self {
            Interaction::Idle => "Idle",
            Interaction::Drawing(_) => "Drawing",
            Interaction::Moving { .. } => "Moving",
            Interaction::Resizing { .. } => "Resizing",
        }
    }
}

/// Drives the `Idle → Drawing/Moving/Resizing → Idle` state machine from
/// pointer events.
pub struct InteractionController {
    state: Interaction,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}

impl InteractionController {
    pub fn new() -> Self {
        Self {
            state: Interaction::Idle,
        }
    }

    pub fn state_name(&self) -> &'static str {
        self.state.name()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, Interaction::Idle)
    }

    pub fn handle_event(
        &mut self,
        event: PointerEvent,
        tools: &ToolStore,
        scene: &mut Scene,
        layer: &mut StrokeLayer,
    ) {
        match event {
            PointerEvent::Down(pos) => self.pointer_down(pos, scene, layer),
            PointerEvent::Moved(pos) => self.pointer_move(pos, tools, scene, layer),
            // Releasing the pointer and leaving the canvas end the
            // interaction the same way.
            PointerEvent::Up(_) | PointerEvent::Left => {
                self.state = Interaction::Idle;
            }
        }
    }

    fn pointer_down(&mut self, pos: Pos2, scene: &mut Scene, layer: &StrokeLayer) {
        // The resize handle of the selected image wins over everything else.
        if let Some(selected) = scene.selected_image() {
            if selected.handle_rect().contains(pos) {
                self.state = Interaction::Resizing {
                    id: selected.id(),
                    start_size: selected.size,
                    start_pointer: pos,
                };
                return;
            }
        }

        if let Some(id) = scene.hit_test(pos) {
            scene.select(Some(id));
            let grab = match scene.image(id) {
                Some(img) => pos - img.pos,
                None => Vec2::ZERO,
            };
            self.state = Interaction::Moving { id, grab };
        } else {
            scene.select(None);
            self.state = Interaction::Drawing(ActiveStroke::begin(layer, pos));
        }
    }

    fn pointer_move(
        &mut self,
        pos: Pos2,
        tools: &ToolStore,
        scene: &mut Scene,
        layer: &mut StrokeLayer,
    ) {
        match &mut self.state {
            Interaction::Idle => {}
            Interaction::Drawing(stroke) => {
                // Settings are read fresh on every segment, so mid-stroke
                // parameter changes take effect immediately.
                let params = SegmentParams::for_tool(tools, stroke.origin());
                stroke.add_segment(layer, pos, &params);
            }
            Interaction::Moving { id, grab } => {
                // A cleared image mid-drag makes this a no-op.
                if let Some(img) = scene.image_mut(*id) {
                    img.pos = pos - *grab;
                }
            }
            Interaction::Resizing {
                id,
                start_size,
                start_pointer,
            } => {
                if let Some(img) = scene.image_mut(*id) {
                    let delta_x = pos.x - start_pointer.x;
                    let width = (start_size.x + delta_x).max(MIN_IMAGE_SIZE);
                    let aspect = start_size.x / start_size.y;
                    img.size = Vec2::new(width, width / aspect);
                }
            }
        }
    }
}
