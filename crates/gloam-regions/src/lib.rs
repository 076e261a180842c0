//! Region ID sets, the region-to-level table, and region lights config.
#![forbid(unsafe_code)]

pub mod config;
pub mod ranges;
pub mod table;

pub use config::{ConfigError, RefreshPolicy, RegionLightsConfig};
pub use ranges::RegionSet;
pub use table::{LEVEL_COUNT, LightLevel, OPACITY_BY_LEVEL, RegionLevelTable, UnmatchedPolicy};
