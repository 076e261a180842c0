mod app;
mod demo_map;

use std::path::{Path, PathBuf};

use clap::Parser;
use gloam_regions::RegionLightsConfig;

#[derive(Parser, Debug)]
#[command(name = "gloam", version, about = "Region darkness overlay over a scrolling tile map")]
struct Args {
    /// Region lights TOML (level lists, tint, policies)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Map width in tiles
    #[arg(long, default_value_t = 128)]
    map_width: usize,

    /// Map height in tiles
    #[arg(long, default_value_t = 96)]
    map_height: usize,

    /// Noise seed for the generated map
    #[arg(long, default_value_t = 1337)]
    seed: i32,

    /// Tile edge in pixels
    #[arg(long, default_value_t = 48)]
    tile_size: u32,

    /// Off-screen margin buffered on every side, in pixels
    #[arg(long, default_value_t = 20)]
    margin: u32,

    /// Wrap the map horizontally
    #[arg(long)]
    loop_x: bool,

    /// Wrap the map vertically
    #[arg(long)]
    loop_y: bool,

    #[arg(long, default_value_t = 1024)]
    window_width: u32,

    #[arg(long, default_value_t = 768)]
    window_height: u32,
}

fn load_config(path: Option<&Path>) -> RegionLightsConfig {
    let Some(path) = path else {
        return RegionLightsConfig::default();
    };
    match RegionLightsConfig::from_path(path) {
        Ok(config) => {
            log::info!("loaded region lights from {}", path.display());
            config
        }
        Err(e) => {
            log::error!("{}; using default region lights", e);
            RegionLightsConfig::default()
        }
    }
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_deref());
    let map = demo_map::DemoMap::generate(
        args.map_width,
        args.map_height,
        args.seed,
        args.loop_x,
        args.loop_y,
    );
    let opts = app::Options {
        window_width: args.window_width.max(1),
        window_height: args.window_height.max(1),
        tile_size: args.tile_size.max(1),
        margin: args.margin,
    };
    app::run(map, &config, &opts);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        assert_eq!(load_config(None), RegionLightsConfig::default());
        let bogus = Path::new("/nonexistent/gloam/lights.toml");
        assert_eq!(load_config(Some(bogus)), RegionLightsConfig::default());
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "gloam",
            "--tile-size",
            "32",
            "--loop-x",
            "--config",
            "lights.toml",
        ])
        .unwrap();
        assert_eq!(args.tile_size, 32);
        assert!(args.loop_x);
        assert!(!args.loop_y);
        assert_eq!(args.config.as_deref(), Some(Path::new("lights.toml")));
    }
}
