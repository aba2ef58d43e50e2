use egui::Pos2;

use super::params::Cap;

/// Half-open pixel rectangle touched by a rasterization call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl PixelRect {
    pub fn union(self, other: PixelRect) -> PixelRect {
        PixelRect {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 >= self.x1 || self.y0 >= self.y1
    }
}

pub(crate) fn merge(acc: Option<PixelRect>, rect: PixelRect) -> Option<PixelRect> {
    match acc {
        Some(prev) => Some(prev.union(rect)),
        None => Some(rect),
    }
}

/// Accumulate antialiased coverage for one stroked segment into `mask`.
///
/// Coverage is merged with `max`, so re-rasterizing over the joint between
/// two consecutive segments does not stack up and darken translucent strokes.
/// Returns the pixel rect that was visited, or `None` when the segment lies
/// entirely outside the mask.
pub(crate) fn rasterize_segment(
    mask: &mut [f32],
    size: [usize; 2],
    a: Pos2,
    b: Pos2,
    half_width: f32,
    cap: Cap,
    strength: f32,
) -> Option<PixelRect> {
    let [w, h] = size;
    let half = half_width.max(0.0);
    let delta = b - a;
    let len = delta.length();

    // A zero-length butt segment has no area, same as the canvas primitive.
    if len <= f32::EPSILON && cap == Cap::Butt {
        return None;
    }

    let pad = half + 1.5;
    let x0 = ((a.x.min(b.x) - pad).floor().max(0.0)) as usize;
    let y0 = ((a.y.min(b.y) - pad).floor().max(0.0)) as usize;
    let x1 = (((a.x.max(b.x) + pad).ceil()) as usize).min(w);
    let y1 = (((a.y.max(b.y) + pad).ceil()) as usize).min(h);
    let rect = PixelRect { x0, y0, x1, y1 };
    if rect.is_empty() {
        return None;
    }

    let unit = if len > f32::EPSILON {
        delta / len
    } else {
        egui::Vec2::X
    };

    for y in y0..y1 {
        for x in x0..x1 {
            let p = Pos2::new(x as f32 + 0.5, y as f32 + 0.5);
            let rel = p - a;
            let t = rel.dot(unit);
            let n = rel.x * unit.y - rel.y * unit.x;

            let dist = match cap {
                Cap::Round => {
                    let tc = t.clamp(0.0, len);
                    let closest = a + unit * tc;
                    (p - closest).length() - half
                }
                Cap::Square => oriented_box_distance(t, n, len, half, half),
                Cap::Butt => oriented_box_distance(t, n, len, 0.0, half),
            };

            let coverage = (0.5 - dist).clamp(0.0, 1.0) * strength;
            if coverage > 0.0 {
                let i = y * w + x;
                mask[i] = mask[i].max(coverage);
            }
        }
    }

    Some(rect)
}

/// Signed distance from local coordinates `(t, n)` to a box spanning
/// `[-extension, len + extension]` along the axis and `±half` across it.
fn oriented_box_distance(t: f32, n: f32, len: f32, extension: f32, half: f32) -> f32 {
    let qx = (t - len * 0.5).abs() - (len * 0.5 + extension);
    let qy = n.abs() - half;
    let ox = qx.max(0.0);
    let oy = qy.max(0.0);
    (ox * ox + oy * oy).sqrt() + qx.max(qy).min(0.0)
}

/// Split a segment into its "on" runs of a dash pattern.
///
/// `phase` is the stroke's arc length already travelled, so the pattern
/// continues seamlessly across consecutive segments.
pub(crate) fn dash_runs(a: Pos2, b: Pos2, phase: f32, pattern: [f32; 2]) -> Vec<(Pos2, Pos2)> {
    let [on, off] = pattern;
    let on = on.max(0.0);
    let off = off.max(0.0);
    let period = on + off;
    if period <= f32::EPSILON || off <= f32::EPSILON {
        return vec![(a, b)];
    }

    let delta = b - a;
    let len = delta.length();
    if len <= f32::EPSILON {
        return if phase.rem_euclid(period) < on {
            vec![(a, b)]
        } else {
            Vec::new()
        };
    }
    let unit = delta / len;

    let mut runs = Vec::new();
    let mut s = 0.0;
    let mut p = phase.rem_euclid(period);
    while s < len {
        if p < on {
            let run = (on - p).min(len - s);
            runs.push((a + unit * s, a + unit * (s + run)));
            s += run;
            p += run;
        } else {
            let skip = (period - p).min(len - s);
            s += skip;
            p += skip;
        }
        if p >= period {
            p -= period;
        }
    }
    runs
}
