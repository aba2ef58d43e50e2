#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod error;
pub mod import;
pub mod input;
pub mod interaction;
pub mod panels;
pub mod raster;
pub mod renderer;
pub mod scene;
pub mod state;
pub mod tool;

pub use app::PhotoLiteApp;
pub use error::ImportError;
pub use input::{InputCollector, PointerEvent};
pub use interaction::InteractionController;
pub use raster::{ActiveStroke, SegmentParams, StrokeLayer};
pub use scene::{DecodedImage, Scene, SceneImage};
pub use state::EditorState;
pub use tool::{BrushSettings, EraserSettings, ToolKind, ToolStore};
