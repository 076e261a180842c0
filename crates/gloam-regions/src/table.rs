use serde::Deserialize;

use crate::config::RegionLightsConfig;
use crate::ranges::RegionSet;

/// Number of configurable light levels.
pub const LEVEL_COUNT: usize = 7;

/// Overlay opacity per level, `round(255 * (7 - level) / 7)`.
pub const OPACITY_BY_LEVEL: [u8; LEVEL_COUNT + 1] = [255, 219, 182, 146, 109, 73, 36, 0];

// Map region IDs are usually 0..=255; those resolve through a flat table.
const DENSE_IDS: usize = 256;

/// What a tile with no configured level (level 0) looks like.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    /// Fully lit: no overlay.
    #[default]
    Lit,
    /// Fully dark: the formula's level 0 value.
    Dark,
}

/// Light level 0..=7. Higher is brighter; 0 means no level applies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LightLevel(u8);

impl LightLevel {
    pub const NONE: Self = Self(0);

    pub fn new(level: u8) -> Option<Self> {
        (usize::from(level) <= LEVEL_COUNT).then_some(Self(level))
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Overlay opacity drawn for a tile at this level.
    #[inline]
    pub fn opacity(self, unmatched: UnmatchedPolicy) -> u8 {
        if self.0 == 0 && unmatched == UnmatchedPolicy::Lit {
            return 0;
        }
        OPACITY_BY_LEVEL[usize::from(self.0)]
    }
}

/// Immutable lookup from region ID to light level.
#[derive(Clone, Debug)]
pub struct RegionLevelTable {
    levels: [RegionSet; LEVEL_COUNT],
    dense: Vec<LightLevel>,
}

impl RegionLevelTable {
    pub fn new(levels: [RegionSet; LEVEL_COUNT]) -> Self {
        let dense = (0..DENSE_IDS as u32)
            .map(|id| scan_levels(&levels, id))
            .collect();
        let table = Self { levels, dense };
        for (a, b) in table.overlapping_levels() {
            log::warn!(
                "region lights: levels {} and {} share region IDs; level {} wins",
                a.get(),
                b.get(),
                a.get()
            );
        }
        table
    }

    /// Build from the seven range-list strings, level 1 first.
    pub fn from_texts(texts: [&str; LEVEL_COUNT]) -> Self {
        Self::new(texts.map(RegionSet::parse))
    }

    pub fn from_config(config: &RegionLightsConfig) -> Self {
        Self::from_texts(config.level_texts())
    }

    /// `1 + index` of the first level whose set holds `region_id`, scanning
    /// level 1 upwards; [`LightLevel::NONE`] when no level matches.
    #[inline]
    pub fn level_of(&self, region_id: u32) -> LightLevel {
        match self.dense.get(region_id as usize) {
            Some(&level) => level,
            None => scan_levels(&self.levels, region_id),
        }
    }

    /// Region set for a level in 1..=7.
    pub fn regions(&self, level: LightLevel) -> Option<&RegionSet> {
        let index = usize::from(level.get()).checked_sub(1)?;
        self.levels.get(index)
    }

    /// Pairs of levels (lower first) whose region sets overlap.
    pub fn overlapping_levels(&self) -> Vec<(LightLevel, LightLevel)> {
        let mut out = Vec::new();
        for i in 0..LEVEL_COUNT {
            for j in i + 1..LEVEL_COUNT {
                if self.levels[i].intersects(&self.levels[j]) {
                    out.push((LightLevel(i as u8 + 1), LightLevel(j as u8 + 1)));
                }
            }
        }
        out
    }
}

impl Default for RegionLevelTable {
    fn default() -> Self {
        Self::from_config(&RegionLightsConfig::default())
    }
}

fn scan_levels(levels: &[RegionSet; LEVEL_COUNT], region_id: u32) -> LightLevel {
    levels
        .iter()
        .position(|set| set.contains(region_id))
        .map_or(LightLevel::NONE, |i| LightLevel(i as u8 + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_follows_level_formula() {
        for level in 1..=7u8 {
            let expect = (255.0 * f32::from(7 - level) / 7.0).round() as u8;
            let l = LightLevel::new(level).unwrap();
            assert_eq!(l.opacity(UnmatchedPolicy::Lit), expect);
            assert_eq!(l.opacity(UnmatchedPolicy::Dark), expect);
        }
        assert_eq!(LightLevel::NONE.opacity(UnmatchedPolicy::Lit), 0);
        assert_eq!(LightLevel::NONE.opacity(UnmatchedPolicy::Dark), 255);
        assert_eq!(LightLevel::new(8), None);
    }

    #[test]
    fn default_table_cycles_every_eight_ids() {
        let table = RegionLevelTable::default();
        assert_eq!(table.level_of(0), LightLevel::NONE);
        assert_eq!(table.level_of(1).get(), 1);
        assert_eq!(table.level_of(7).get(), 7);
        assert_eq!(table.level_of(8), LightLevel::NONE);
        assert_eq!(table.level_of(63).get(), 7);
        assert_eq!(table.level_of(64), LightLevel::NONE);
        assert!(table.overlapping_levels().is_empty());
    }

    #[test]
    fn lowest_level_wins_on_overlap() {
        let table = RegionLevelTable::from_texts(["", "", "5-9", "", "7", "", "1-100"]);
        assert_eq!(table.level_of(7).get(), 3);
        assert_eq!(table.level_of(4).get(), 7);
        assert_eq!(
            table.overlapping_levels(),
            vec![
                (LightLevel(3), LightLevel(5)),
                (LightLevel(3), LightLevel(7)),
                (LightLevel(5), LightLevel(7)),
            ]
        );
    }

    #[test]
    fn ids_past_the_dense_table_still_resolve() {
        let table = RegionLevelTable::from_texts(["", "", "", "", "", "1000-2000", "4000000000"]);
        assert_eq!(table.level_of(1500).get(), 6);
        assert_eq!(table.level_of(4_000_000_000).get(), 7);
        assert_eq!(table.level_of(2001), LightLevel::NONE);
    }

    #[test]
    fn regions_by_level() {
        let table = RegionLevelTable::from_texts(["1-3", "", "", "", "", "", ""]);
        assert_eq!(table.regions(LightLevel::NONE), None);
        let set = table.regions(LightLevel::new(1).unwrap()).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
