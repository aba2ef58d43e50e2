use egui::{Color32, Pos2};

use crate::tool::{BrushSettings, BrushTexture, CapShape, EraserSettings, ToolKind, ToolStore};

/// How a segment's coverage is combined with the pixels already on the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Normal painting: source over destination.
    SourceOver,
    /// Erasing: destination alpha is reduced by the segment's coverage.
    DestinationOut,
}

/// End-cap geometry used when rasterizing a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cap {
    Round,
    Square,
    Butt,
}

/// Jittered multi-pass drawing used by the chalk and pencil textures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Jitter {
    /// Number of offset sub-segments drawn per real segment.
    pub passes: u32,
    /// Maximum endpoint displacement in pixels.
    pub amplitude: f32,
    /// Coverage multiplier per pass, so the grain stays translucent.
    pub strength: f32,
}

/// Shear transform anchored at the stroke origin, used by the calligraphy
/// cap shape. Matches the canvas transform `(1, 0.5, -0.5, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shear {
    pub origin: Pos2,
}

impl Shear {
    pub fn apply(&self, p: Pos2) -> Pos2 {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        Pos2::new(
            self.origin.x + dx - 0.5 * dy,
            self.origin.y + 0.5 * dx + dy,
        )
    }
}

/// Everything the rasterizer needs to draw one stroke segment.
///
/// This is a pure value recomputed from the active tool's settings for every
/// segment, replacing the original's imperative canvas-context mutation.
/// Mid-stroke settings changes therefore take effect on the very next segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentParams {
    pub width: f32,
    pub color: Color32,
    pub opacity: f32,
    pub blend: Blend,
    pub cap: Cap,
    pub dash: Option<[f32; 2]>,
    pub shear: Option<Shear>,
    pub jitter: Option<Jitter>,
}

impl SegmentParams {
    /// Parameters for whichever tool is active, read fresh from the store.
    pub fn for_tool(tools: &ToolStore, stroke_origin: Pos2) -> Self {
        match tools.active() {
            ToolKind::Brush => Self::for_brush(&tools.brush, stroke_origin),
            ToolKind::Eraser => Self::for_eraser(&tools.eraser),
        }
    }

    pub fn for_brush(brush: &BrushSettings, stroke_origin: Pos2) -> Self {
        let cap = match brush.cap {
            CapShape::None | CapShape::Circle => Cap::Round,
            CapShape::Square => Cap::Square,
            CapShape::Calligraphy => Cap::Butt,
        };
        let shear = matches!(brush.cap, CapShape::Calligraphy).then_some(Shear {
            origin: stroke_origin,
        });
        let jitter = match brush.texture {
            BrushTexture::Chalk => Some(Jitter {
                passes: 5,
                amplitude: 3.0,
                strength: 0.35,
            }),
            BrushTexture::Pencil => Some(Jitter {
                passes: 3,
                amplitude: 1.0,
                strength: 0.5,
            }),
            // Watercolor, spray, and gradient are declared pass-throughs.
            _ => None,
        };
        Self {
            width: brush.size,
            color: brush.color,
            opacity: brush.opacity.clamp(0.0, 1.0),
            blend: Blend::SourceOver,
            cap,
            dash: brush.style.dash_pattern(brush.size),
            shear,
            jitter,
        }
    }

    /// Eraser segments always use destination-out at full opacity, regardless
    /// of whatever opacity the brush has stored.
    pub fn for_eraser(eraser: &EraserSettings) -> Self {
        Self {
            width: eraser.size,
            color: Color32::BLACK,
            opacity: 1.0,
            blend: Blend::DestinationOut,
            cap: Cap::Round,
            dash: None,
            shear: None,
            jitter: None,
        }
    }
}
