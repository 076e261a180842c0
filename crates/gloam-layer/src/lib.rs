//! Darkness buffer, destination surfaces, and the compositor.
#![forbid(unsafe_code)]

pub mod buffer;
pub mod composite;
pub mod geometry;
pub mod surface;

pub use buffer::DarknessBuffer;
pub use composite::{Compositor, DarknessLayer, ScaleFilter};
pub use geometry::ViewportGeometry;
pub use surface::{RgbaSurface, Surface};
