//! Tile viewport driving, paint hooks, and the region lights coordinator.
#![forbid(unsafe_code)]

pub mod command;
pub mod context;
pub mod lights;
pub mod observer;
pub mod source;
pub mod viewport;

pub use command::RegionLightsCommand;
pub use context::{DarknessState, RegionLightsContext};
pub use lights::RegionLights;
pub use observer::{TileOrigin, TilemapObserver};
pub use source::{RegionGrid, RegionSource};
pub use viewport::{Repaint, Viewport};
