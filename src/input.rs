use egui::{Context, PointerButton, Pos2, Rect};

/// Pointer events on the drawing surface, in canvas-local coordinates.
///
/// `Up` and `Left` are deliberately not distinguished by the interaction
/// layer: leaving the canvas ends the current interaction the same way
/// releasing the pointer does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Pos2),
    Moved(Pos2),
    Up(Pos2),
    Left,
}

/// Adapts raw egui pointer input into canvas-local [`PointerEvent`]s.
pub struct InputCollector {
    canvas_rect: Option<Rect>,
    last_screen_pos: Option<Pos2>,
    was_inside: bool,
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            canvas_rect: None,
            last_screen_pos: None,
            was_inside: false,
        }
    }

    /// Update the canvas rectangle (the canvas is laid out anew each frame).
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    /// Collect this frame's pointer events. With no canvas rect known yet
    /// every event is dropped: nothing to do, not an error.
    pub fn collect(&mut self, ctx: &Context) -> Vec<PointerEvent> {
        let mut events = Vec::new();
        let Some(rect) = self.canvas_rect else {
            self.last_screen_pos = None;
            self.was_inside = false;
            return events;
        };

        ctx.input(|input| {
            match input.pointer.hover_pos() {
                Some(pos) => {
                    let inside = rect.contains(pos);
                    let local = (pos - rect.min).to_pos2();

                    if inside && input.pointer.button_pressed(PointerButton::Primary) {
                        events.push(PointerEvent::Down(local));
                    }
                    if Some(pos) != self.last_screen_pos {
                        if inside {
                            events.push(PointerEvent::Moved(local));
                        } else if self.was_inside {
                            events.push(PointerEvent::Left);
                        }
                    }
                    if input.pointer.button_released(PointerButton::Primary) {
                        events.push(PointerEvent::Up(local));
                    }

                    self.last_screen_pos = Some(pos);
                    self.was_inside = inside;
                }
                None => {
                    if self.last_screen_pos.take().is_some() && self.was_inside {
                        events.push(PointerEvent::Left);
                    }
                    self.was_inside = false;
                }
            }
        });

        events
    }
}
