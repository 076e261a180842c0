use gloam_layer::{Compositor, DarknessLayer, ScaleFilter, ViewportGeometry};
use gloam_regions::{LightLevel, RefreshPolicy, RegionLevelTable, RegionLightsConfig, UnmatchedPolicy};

use crate::command::RegionLightsCommand;
use crate::context::RegionLightsContext;
use crate::observer::{TileOrigin, TilemapObserver};
use crate::source::RegionSource;

/// Keeps the darkness layer in step with the host's tile painting.
///
/// Each painted tile resolves its region ID through the table and writes the
/// level's opacity into the matching buffer cell. While the context is
/// suppressed every painted cell is written fully lit.
pub struct RegionLights {
    table: RegionLevelTable,
    layer: DarknessLayer,
    context: RegionLightsContext,
    unmatched: UnmatchedPolicy,
    refresh: RefreshPolicy,
    start: Option<TileOrigin>,
    stale: bool,
}

impl RegionLights {
    pub fn new(table: RegionLevelTable) -> Self {
        Self {
            table,
            layer: DarknessLayer::new(Compositor::default()),
            context: RegionLightsContext::new(),
            unmatched: UnmatchedPolicy::default(),
            refresh: RefreshPolicy::default(),
            start: None,
            stale: false,
        }
    }

    pub fn from_config(config: &RegionLightsConfig) -> Self {
        let mut lights = Self::new(RegionLevelTable::from_config(config));
        lights.layer.set_tint(config.darkness_color);
        lights.unmatched = config.unmatched;
        lights.refresh = config.refresh_on_toggle;
        lights
    }

    pub fn with_refresh(mut self, refresh: RefreshPolicy) -> Self {
        self.refresh = refresh;
        self
    }

    pub fn with_unmatched(mut self, unmatched: UnmatchedPolicy) -> Self {
        self.unmatched = unmatched;
        self
    }

    pub fn table(&self) -> &RegionLevelTable {
        &self.table
    }

    pub fn context(&self) -> &RegionLightsContext {
        &self.context
    }

    pub fn layer(&self) -> &DarknessLayer {
        &self.layer
    }

    pub fn is_visible(&self) -> bool {
        self.context.is_visible()
    }

    pub fn execute(&mut self, command: RegionLightsCommand) {
        match command {
            RegionLightsCommand::ChangeRegionLights { enabled } => self.set_visible(enabled),
        }
    }

    /// Suppress or restore region darkness. The buffer is kept either way.
    pub fn set_visible(&mut self, visible: bool) {
        if self.context.set_visible(visible) && self.refresh == RefreshPolicy::Immediate {
            self.stale = true;
        }
    }

    /// Table level at an absolute tile, [`LightLevel::NONE`] while suppressed.
    ///
    /// Suppressed tiles are always painted fully lit (opacity 0), whatever the
    /// unmatched policy, so do not derive a suppressed tile's opacity from
    /// `NONE.opacity(..)`, which is 255 under `UnmatchedPolicy::Dark`.
    pub fn darkness_level(&self, map: &dyn RegionSource, x: i32, y: i32) -> LightLevel {
        if !self.context.is_visible() {
            return LightLevel::NONE;
        }
        self.table.level_of(map.region_id(x, y))
    }

    fn opacity_at(&self, map: &dyn RegionSource, x: i32, y: i32) -> u8 {
        if !self.context.is_visible() {
            return 0;
        }
        self.table.level_of(map.region_id(x, y)).opacity(self.unmatched)
    }

    pub fn set_filter(&mut self, filter: ScaleFilter) {
        self.layer.set_filter(filter);
    }

    fn refresh_all(&mut self, map: &dyn RegionSource, start: TileOrigin) {
        let (cols, rows) = self.layer.buffer().size();
        log::debug!("region lights: refreshing {cols}x{rows} cells after toggle");
        for row in 0..rows {
            for col in 0..cols {
                let (x, y) = start.offset(col, row);
                let opacity = self.opacity_at(map, x, y);
                self.layer.paint_cell(col, row, opacity);
            }
        }
    }
}

impl Default for RegionLights {
    fn default() -> Self {
        Self::from_config(&RegionLightsConfig::default())
    }
}

impl TilemapObserver for RegionLights {
    fn viewport_resized(&mut self, geometry: &ViewportGeometry) {
        self.layer.fit(geometry);
        self.start = None;
    }

    fn begin_full_repaint(&mut self, start: TileOrigin) {
        log::debug!("region lights: full repaint at ({}, {})", start.x, start.y);
        self.layer.clear();
        self.start = Some(start);
        self.stale = false;
    }

    fn tile_painted(&mut self, map: &dyn RegionSource, start: TileOrigin, col: usize, row: usize) {
        debug_assert!(
            self.layer.buffer().in_bounds(col, row),
            "tile ({col}, {row}) outside darkness buffer"
        );
        let (x, y) = start.offset(col, row);
        let opacity = self.opacity_at(map, x, y);
        self.layer.paint_cell(col, row, opacity);
    }

    fn viewport_scrolled(&mut self, start: TileOrigin, dx: i32, dy: i32) {
        self.layer.scroll(dx, dy);
        self.start = Some(start);
    }

    fn frame_finished(&mut self, map: &dyn RegionSource) {
        if self.stale {
            if let Some(start) = self.start {
                self.refresh_all(map, start);
            }
            self.stale = false;
        }
        self.layer.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RegionGrid;
    use crate::viewport::Viewport;
    use gloam_layer::Surface;

    // 4x2 cells of 8px, no margin
    fn viewport() -> Viewport {
        Viewport::new(ViewportGeometry::new(24, 8, 8, 8, 0))
    }

    fn map() -> impl Fn(i32, i32) -> u32 {
        |x, y| (x + 4 * y) as u32
    }

    fn table() -> RegionLevelTable {
        // 1 -> level 1, 2 -> level 7, 5 -> level 4
        RegionLevelTable::from_texts(["1", "", "", "5", "", "", "2"])
    }

    #[test]
    fn paints_level_opacity() {
        let mut lights = RegionLights::new(table());
        let mut vp = viewport();
        vp.update(&map(), &mut lights);
        let buf = lights.layer().buffer();
        assert_eq!(buf.size(), (4, 2));
        assert_eq!(buf.get(0, 0), Some(0));
        assert_eq!(buf.get(1, 0), Some(219));
        assert_eq!(buf.get(2, 0), Some(0));
        assert_eq!(buf.get(1, 1), Some(109));
        assert_eq!(lights.layer().surface().size(), (32, 16));
        assert_eq!(lights.layer().surface().alpha(9, 0), 219);
    }

    #[test]
    fn dark_unmatched_fills_unconfigured_tiles() {
        let mut lights = RegionLights::new(table()).with_unmatched(UnmatchedPolicy::Dark);
        viewport().update(&map(), &mut lights);
        assert_eq!(lights.layer().buffer().get(0, 0), Some(255));
        assert_eq!(lights.layer().buffer().get(2, 0), Some(0));
    }

    #[test]
    fn immediate_toggle_refreshes_static_screen() {
        let mut lights = RegionLights::new(table()).with_unmatched(UnmatchedPolicy::Dark);
        let mut vp = viewport();
        vp.update(&map(), &mut lights);
        lights.execute(RegionLightsCommand::change(false));
        assert_eq!(vp.update(&map(), &mut lights), crate::Repaint::None);
        assert!(lights.layer().buffer().samples().iter().all(|&s| s == 0));
        lights.execute(RegionLightsCommand::change(true));
        vp.update(&map(), &mut lights);
        assert_eq!(lights.layer().buffer().get(1, 0), Some(219));
        assert_eq!(lights.layer().buffer().get(0, 0), Some(255));
    }

    #[test]
    fn lazy_toggle_waits_for_repaint() {
        let mut lights = RegionLights::new(table()).with_refresh(RefreshPolicy::Lazy);
        let mut vp = viewport();
        vp.update(&map(), &mut lights);
        lights.execute(RegionLightsCommand::change(false));
        vp.update(&map(), &mut lights);
        assert_eq!(lights.layer().buffer().get(1, 0), Some(219));
        vp.request_repaint();
        vp.update(&map(), &mut lights);
        assert_eq!(lights.layer().buffer().get(1, 0), Some(0));
    }

    #[test]
    fn huge_origin_on_looping_map_paints() {
        let grid = RegionGrid::from_fn(4, 2, |x, y| (x + 4 * y) as u32).with_looping(true, true);
        let mut lights = RegionLights::new(table());
        let mut vp = viewport();
        vp.set_origin(1.0e11, 0.0);
        assert_eq!(vp.update(&grid, &mut lights), crate::Repaint::Full { cells: 8 });
        vp.set_origin(-1.0e11, -1.0e11);
        vp.update(&grid, &mut lights);
        assert_eq!(lights.layer().buffer().size(), (4, 2));
    }

    #[test]
    fn suppressed_paints_lit_even_when_unmatched_is_dark() {
        let mut lights = RegionLights::new(table()).with_unmatched(UnmatchedPolicy::Dark);
        lights.set_visible(false);
        assert!(lights.darkness_level(&map(), 0, 0).is_none());
        assert_eq!(LightLevel::NONE.opacity(UnmatchedPolicy::Dark), 255);
        viewport().update(&map(), &mut lights);
        assert!(lights.layer().buffer().samples().iter().all(|&s| s == 0));
    }

    #[test]
    fn suppressed_level_is_none() {
        let mut lights = RegionLights::new(table());
        assert_eq!(lights.darkness_level(&map(), 1, 0).get(), 1);
        lights.execute(RegionLightsCommand::change(false));
        assert!(lights.darkness_level(&map(), 1, 0).is_none());
        assert!(!lights.is_visible());
    }

    #[test]
    fn config_sets_tint_and_policies() {
        let config = RegionLightsConfig {
            darkness_color: [10, 0, 40],
            unmatched: UnmatchedPolicy::Dark,
            ..RegionLightsConfig::from_level_texts(["3", "", "", "", "", "", ""])
        };
        let mut lights = RegionLights::from_config(&config);
        assert_eq!(lights.layer().compositor().tint, [10, 0, 40]);
        viewport().update(&map(), &mut lights);
        assert_eq!(lights.layer().surface().pixel(24, 0), [10, 0, 40, 219]);
        assert_eq!(lights.layer().surface().pixel(0, 0), [10, 0, 40, 255]);
    }
}
