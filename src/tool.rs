use egui::Color32;
use serde::{Deserialize, Serialize};

/// Identifies which tool is currently active on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolKind {
    Brush,
    Eraser,
}

impl ToolKind {
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::Brush => "Brush",
            ToolKind::Eraser => "Eraser",
        }
    }
}

/// Line dash style for brush strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrokeStyle {
    Solid,
    Dashed,
    Dotted,
}

impl StrokeStyle {
    pub const ALL: [StrokeStyle; 3] = [StrokeStyle::Solid, StrokeStyle::Dashed, StrokeStyle::Dotted];

    pub fn label(&self) -> &'static str {
        match self {
            StrokeStyle::Solid => "Solid",
            StrokeStyle::Dashed => "Dashed",
            StrokeStyle::Dotted => "Dotted",
        }
    }

    /// Dash pattern as `[on, off]` lengths in pixels, derived from the brush
    /// size the same way the canvas variant derived them from `lineWidth`.
    pub fn dash_pattern(&self, size: f32) -> Option<[f32; 2]> {
        match self {
            StrokeStyle::Solid => None,
            StrokeStyle::Dashed => Some([size * 6.0, size * 2.0]),
            StrokeStyle::Dotted => Some([(size - 2.0).max(0.5), size * 2.0]),
        }
    }
}

/// Line cap / join shape for brush strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapShape {
    None,
    Circle,
    Square,
    /// Butt caps plus a shear transform applied for the duration of a stroke.
    Calligraphy,
}

impl CapShape {
    pub const ALL: [CapShape; 4] = [
        CapShape::None,
        CapShape::Circle,
        CapShape::Square,
        CapShape::Calligraphy,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CapShape::None => "None",
            CapShape::Circle => "Circle",
            CapShape::Square => "Square",
            CapShape::Calligraphy => "Calligraphy",
        }
    }
}

/// Procedural texture applied to brush segments.
///
/// Only chalk and pencil have a real effect; the remaining variants are
/// selectable but render as plain segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BrushTexture {
    None,
    Chalk,
    Pencil,
    Watercolor,
    Spray,
    Gradient,
}

impl BrushTexture {
    pub const ALL: [BrushTexture; 6] = [
        BrushTexture::None,
        BrushTexture::Chalk,
        BrushTexture::Pencil,
        BrushTexture::Watercolor,
        BrushTexture::Spray,
        BrushTexture::Gradient,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BrushTexture::None => "None",
            BrushTexture::Chalk => "Chalk",
            BrushTexture::Pencil => "Pencil",
            BrushTexture::Watercolor => "Watercolor",
            BrushTexture::Spray => "Spray",
            BrushTexture::Gradient => "Gradient",
        }
    }
}

/// Settings for the brush tool.
///
/// Callers are responsible for keeping `size` positive and `opacity` in
/// `[0, 1]`; the UI sliders enforce those ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub size: f32,
    pub color: Color32,
    pub opacity: f32,
    pub style: StrokeStyle,
    pub cap: CapShape,
    pub texture: BrushTexture,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            size: 5.0,
            color: Color32::BLACK,
            opacity: 1.0,
            style: StrokeStyle::Solid,
            cap: CapShape::None,
            texture: BrushTexture::None,
        }
    }
}

impl BrushSettings {
    /// Restore the appearance fields to their defaults.
    ///
    /// Size is deliberately kept: clearing the canvas in the original editor
    /// reset color/opacity/style/shape/texture but left the size slider alone.
    pub fn reset_appearance(&mut self) {
        let defaults = BrushSettings::default();
        self.color = defaults.color;
        self.opacity = defaults.opacity;
        self.style = defaults.style;
        self.cap = defaults.cap;
        self.texture = defaults.texture;
    }
}

/// Settings for the eraser tool.
///
/// The eraser has no color, opacity, style, or texture. Those fields simply
/// do not exist here, so a cross-tool parameter write is a compile error
/// rather than a runtime check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EraserSettings {
    pub size: f32,
}

impl Default for EraserSettings {
    fn default() -> Self {
        Self { size: 20.0 }
    }
}

/// Holds both tools' settings and which one is active.
///
/// Switching the active tool never alters either tool's parameters, and the
/// renderer reads settings fresh on every stroke segment, so UI mutations are
/// visible immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolStore {
    active: ToolKind,
    pub brush: BrushSettings,
    pub eraser: EraserSettings,
}

impl Default for ToolStore {
    fn default() -> Self {
        Self {
            active: ToolKind::Brush,
            brush: BrushSettings::default(),
            eraser: EraserSettings::default(),
        }
    }
}

impl ToolStore {
    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn set_active(&mut self, kind: ToolKind) {
        self.active = kind;
    }

    /// Size of whichever tool is active.
    pub fn active_size(&self) -> f32 {
        match self.active {
            ToolKind::Brush => self.brush.size,
            ToolKind::Eraser => self.eraser.size,
        }
    }
}
