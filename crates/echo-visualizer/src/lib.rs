pub mod display_list;
pub mod grid;
pub mod raster;
pub mod renderer;
pub mod settings;
pub mod surface;

pub use display_list::{DisplayList, DrawOp};
pub use raster::RasterSurface;
pub use renderer::{cursor_x, trace_points, TraceRenderer};
pub use settings::RenderSettings;
pub use surface::{Rgba, Surface};
