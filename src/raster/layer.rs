use egui::{Color32, Pos2, TextureOptions};
use rand::Rng;

use super::params::{Blend, SegmentParams};
use super::segment::{dash_runs, merge, rasterize_segment, PixelRect};

/// Default drawing surface size, in pixels.
pub const DEFAULT_CANVAS_SIZE: usize = 800;

/// The background raster that freehand strokes are baked into.
///
/// Strokes and placed images live on two logically separate layers: segments
/// are composited into this pixel buffer the moment they are drawn, while
/// images are redrawn on top of it every frame. Moving or adding an image can
/// therefore never erase previously drawn strokes.
pub struct StrokeLayer {
    width: usize,
    height: usize,
    /// Straight (unmultiplied) RGBA, row-major.
    pixels: Vec<u8>,
    dirty: bool,
    texture: Option<egui::TextureHandle>,
}

impl std::fmt::Debug for StrokeLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrokeLayer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl StrokeLayer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
            dirty: true,
            texture: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Reset every pixel to fully transparent.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
        self.dirty = true;
    }

    /// Raw RGBA of one pixel.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = (y * self.width + x) * 4;
        [
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ]
    }

    /// The layer pixel composited over an opaque background color, i.e. what
    /// the user sees on the canvas before any images are drawn on top.
    pub fn composited_pixel(&self, x: usize, y: usize, background: Color32) -> Color32 {
        let [r, g, b, a] = self.pixel(x, y);
        let alpha = a as f32 / 255.0;
        let blend = |c: u8, bg: u8| (c as f32 * alpha + bg as f32 * (1.0 - alpha)).round() as u8;
        Color32::from_rgb(
            blend(r, background.r()),
            blend(g, background.g()),
            blend(b, background.b()),
        )
    }

    /// Upload the buffer to a GPU texture if it changed since the last frame.
    pub fn texture_id(&mut self, ctx: &egui::Context) -> egui::TextureId {
        if self.texture.is_none() {
            let image = self.as_color_image();
            self.texture = Some(ctx.load_texture("stroke_layer", image, TextureOptions::NEAREST));
            self.dirty = false;
        } else if self.dirty {
            let image = self.as_color_image();
            if let Some(texture) = &mut self.texture {
                texture.set(image, TextureOptions::NEAREST);
            }
            self.dirty = false;
        }
        self.texture.as_ref().map(|t| t.id()).unwrap_or_default()
    }

    fn as_color_image(&self) -> egui::ColorImage {
        egui::ColorImage::from_rgba_unmultiplied([self.width, self.height], &self.pixels)
    }

    /// Recomposite `rect` from the stroke-start `snapshot` using the stroke's
    /// accumulated coverage `mask` and the current segment parameters.
    pub(crate) fn recomposite(
        &mut self,
        rect: PixelRect,
        snapshot: &[u8],
        mask: &[f32],
        params: &SegmentParams,
    ) {
        for y in rect.y0..rect.y1 {
            for x in rect.x0..rect.x1 {
                let i = y * self.width + x;
                let pi = i * 4;
                let dst = [
                    snapshot[pi],
                    snapshot[pi + 1],
                    snapshot[pi + 2],
                    snapshot[pi + 3],
                ];
                let coverage = mask[i];
                let out = match params.blend {
                    Blend::SourceOver => {
                        if coverage > 0.0 {
                            source_over(dst, params.color, params.opacity * coverage)
                        } else {
                            dst
                        }
                    }
                    Blend::DestinationOut => {
                        let mut out = dst;
                        out[3] = (dst[3] as f32 * (1.0 - coverage)).round() as u8;
                        out
                    }
                };
                self.pixels[pi..pi + 4].copy_from_slice(&out);
            }
        }
        self.dirty = true;
    }
}

/// Straight-alpha source-over of a solid color at `source_alpha` coverage.
fn source_over(dst: [u8; 4], color: Color32, source_alpha: f32) -> [u8; 4] {
    let sa = source_alpha.clamp(0.0, 1.0);
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let blend = |sc: u8, dc: u8| {
        ((sc as f32 * sa + dc as f32 * da * (1.0 - sa)) / out_a).round() as u8
    };
    [
        blend(color.r(), dst[0]),
        blend(color.g(), dst[1]),
        blend(color.b(), dst[2]),
        (out_a * 255.0).round() as u8,
    ]
}

/// Per-stroke state, alive between pointer-down and pointer-up/leave.
///
/// Keeps a snapshot of the layer from the moment the stroke started plus a
/// coverage mask that grows segment by segment. Each new segment recomposites
/// only the pixels it touched, so a translucent stroke stays uniform along
/// its whole path instead of darkening where segments overlap.
pub struct ActiveStroke {
    origin: Pos2,
    last: Pos2,
    travelled: f32,
    snapshot: Vec<u8>,
    mask: Vec<f32>,
}

impl ActiveStroke {
    pub fn begin(layer: &StrokeLayer, at: Pos2) -> Self {
        Self {
            origin: at,
            last: at,
            travelled: 0.0,
            snapshot: layer.pixels.clone(),
            mask: vec![0.0; layer.width * layer.height],
        }
    }

    /// Where the stroke started; the anchor for the calligraphy shear.
    pub fn origin(&self) -> Pos2 {
        self.origin
    }

    pub fn last(&self) -> Pos2 {
        self.last
    }

    /// Rasterize one segment from the last recorded point to `to`.
    pub fn add_segment(&mut self, layer: &mut StrokeLayer, to: Pos2, params: &SegmentParams) {
        let from = self.last;
        self.last = to;
        let segment_length = (to - from).length();

        let (a, b) = match &params.shear {
            Some(shear) => (shear.apply(from), shear.apply(to)),
            None => (from, to),
        };
        let half = params.width * 0.5;
        let size = [layer.width, layer.height];
        let mut touched: Option<PixelRect> = None;

        if let Some(jitter) = &params.jitter {
            let mut rng = rand::rng();
            for _ in 0..jitter.passes {
                let offset_a = jitter_offset(&mut rng, jitter.amplitude);
                let offset_b = jitter_offset(&mut rng, jitter.amplitude);
                if let Some(rect) = rasterize_segment(
                    &mut self.mask,
                    size,
                    a + offset_a,
                    b + offset_b,
                    half,
                    params.cap,
                    jitter.strength,
                ) {
                    touched = merge(touched, rect);
                }
            }
        } else if let Some(pattern) = params.dash {
            for (da, db) in dash_runs(a, b, self.travelled, pattern) {
                if let Some(rect) =
                    rasterize_segment(&mut self.mask, size, da, db, half, params.cap, 1.0)
                {
                    touched = merge(touched, rect);
                }
            }
        } else if let Some(rect) =
            rasterize_segment(&mut self.mask, size, a, b, half, params.cap, 1.0)
        {
            touched = merge(touched, rect);
        }

        self.travelled += segment_length;
        if let Some(rect) = touched {
            layer.recomposite(rect, &self.snapshot, &self.mask, params);
        }
    }
}

fn jitter_offset(rng: &mut impl Rng, amplitude: f32) -> egui::Vec2 {
    egui::Vec2::new(
        (rng.random::<f32>() - 0.5) * amplitude,
        (rng.random::<f32>() - 0.5) * amplitude,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_resets_to_transparent() {
        let mut layer = StrokeLayer::new(16, 16);
        let params = SegmentParams::for_brush(&crate::tool::BrushSettings::default(), Pos2::ZERO);
        let mut stroke = ActiveStroke::begin(&layer, Pos2::new(2.0, 8.0));
        stroke.add_segment(&mut layer, Pos2::new(14.0, 8.0), &params);
        assert_ne!(layer.pixel(8, 8)[3], 0);

        layer.clear();
        assert_eq!(layer.pixel(8, 8), [0, 0, 0, 0]);
    }

    #[test]
    fn composited_pixel_over_white_is_white_when_empty() {
        let layer = StrokeLayer::new(4, 4);
        assert_eq!(
            layer.composited_pixel(1, 1, Color32::WHITE),
            Color32::WHITE
        );
    }
}
