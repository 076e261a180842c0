use fastnoise_lite::{FastNoiseLite, NoiseType};
use gloam_tilemap::{RegionGrid, RegionSource};

/// Number of region IDs painted by the generator (0..=63).
pub const REGION_COUNT: u32 = 64;

/// Ground types used to colour tiles underneath the darkness layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terrain {
    Water,
    Sand,
    Grass,
    Forest,
    Rock,
}

/// Procedural demo map: a region layer plus a terrain layer of the same size.
pub struct DemoMap {
    pub regions: RegionGrid,
    terrain: Vec<Terrain>,
    width: usize,
    height: usize,
    loop_x: bool,
    loop_y: bool,
}

impl DemoMap {
    pub fn generate(width: usize, height: usize, seed: i32, loop_x: bool, loop_y: bool) -> Self {
        // Low frequency so regions form blobs several tiles across
        let mut region_noise = FastNoiseLite::with_seed(seed);
        region_noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        region_noise.set_frequency(Some(0.035));

        let mut ground_noise = FastNoiseLite::with_seed(seed.wrapping_add(1337));
        ground_noise.set_noise_type(Some(NoiseType::OpenSimplex2));
        ground_noise.set_frequency(Some(0.06));

        let regions = RegionGrid::from_fn(width, height, |x, y| {
            region_of(region_noise.get_noise_2d(x as f32, y as f32))
        })
        .with_looping(loop_x, loop_y);

        let mut terrain = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                terrain.push(terrain_of(ground_noise.get_noise_2d(x as f32, y as f32)));
            }
        }
        log::info!("demo map {}x{} seed {}", width, height, seed);
        Self {
            regions,
            terrain,
            width,
            height,
            loop_x,
            loop_y,
        }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn loops(&self) -> (bool, bool) {
        (self.loop_x, self.loop_y)
    }

    /// Terrain at an absolute tile, `None` off the map.
    pub fn terrain(&self, x: i32, y: i32) -> Option<Terrain> {
        let x = wrap(x, self.width, self.loop_x)?;
        let y = wrap(y, self.height, self.loop_y)?;
        self.terrain.get(y * self.width + x).copied()
    }
}

impl RegionSource for DemoMap {
    fn region_id(&self, x: i32, y: i32) -> u32 {
        self.regions.region_id(x, y)
    }
}

fn wrap(c: i32, len: usize, looping: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if looping {
        return Some(c.rem_euclid(len as i32) as usize);
    }
    usize::try_from(c).ok().filter(|&c| c < len)
}

// Noise is roughly -1..1.
fn region_of(n: f32) -> u32 {
    let t = ((n + 1.0) * 0.5).clamp(0.0, 1.0);
    ((t * REGION_COUNT as f32) as u32).min(REGION_COUNT - 1)
}

fn terrain_of(n: f32) -> Terrain {
    match n {
        n if n < -0.35 => Terrain::Water,
        n if n < -0.2 => Terrain::Sand,
        n if n < 0.25 => Terrain::Grass,
        n if n < 0.55 => Terrain::Forest,
        _ => Terrain::Rock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regions_stay_in_range() {
        let map = DemoMap::generate(40, 30, 7, false, false);
        for y in 0..30 {
            for x in 0..40 {
                assert!(map.region_id(x, y) < REGION_COUNT);
            }
        }
        assert_eq!(region_of(-2.0), 0);
        assert_eq!(region_of(1.0), REGION_COUNT - 1);
    }

    #[test]
    fn same_seed_same_map() {
        let a = DemoMap::generate(16, 16, 42, false, false);
        let b = DemoMap::generate(16, 16, 42, false, false);
        for y in 0..16 {
            for x in 0..16 {
                assert_eq!(a.region_id(x, y), b.region_id(x, y));
                assert_eq!(a.terrain(x, y), b.terrain(x, y));
            }
        }
    }

    #[test]
    fn looping_wraps_terrain() {
        let map = DemoMap::generate(8, 8, 3, true, false);
        assert_eq!(map.terrain(-1, 2), map.terrain(7, 2));
        assert_eq!(map.terrain(0, -1), None);
        assert_eq!(map.region_id(9, 0), map.region_id(1, 0));
    }
}
