pub mod canvas;
pub mod fill;
pub mod input;
pub mod model;
pub mod render;
pub mod sample;
pub mod save;
pub mod settings;
pub mod settings_store;
pub mod surface;

pub use canvas::AnnotationCanvas;
pub use input::{PickOutcome, PointerEvent, PointerKind, ToolState};
pub use model::{Color, DirtyRect, Pen, ToolMode};
pub use sample::{ColorSampler, GlobalPressHook, ScreenSampler};
pub use surface::PixelSurface;
