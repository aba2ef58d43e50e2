//! Software rasterization of freehand strokes.
//!
//! Strokes are not modeled as replayable entities: each segment is baked
//! into the [`StrokeLayer`] pixel buffer the moment the pointer moves, and
//! only the layer itself survives the stroke.

mod layer;
mod params;
mod segment;

pub use layer::{ActiveStroke, StrokeLayer, DEFAULT_CANVAS_SIZE};
pub use params::{Blend, Cap, Jitter, SegmentParams, Shear};
