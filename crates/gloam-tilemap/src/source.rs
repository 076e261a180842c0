/// Host map access: the region ID painted at an absolute tile coordinate.
pub trait RegionSource {
    fn region_id(&self, x: i32, y: i32) -> u32;
}

impl<F> RegionSource for F
where
    F: Fn(i32, i32) -> u32,
{
    fn region_id(&self, x: i32, y: i32) -> u32 {
        self(x, y)
    }
}

/// In-memory region layer. Tiles outside the map read as region 0 unless the
/// axis loops, in which case coordinates wrap around.
#[derive(Clone, Debug)]
pub struct RegionGrid {
    width: usize,
    height: usize,
    regions: Vec<u32>,
    loop_x: bool,
    loop_y: bool,
}

impl RegionGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            regions: vec![0; width * height],
            loop_x: false,
            loop_y: false,
        }
    }

    pub fn from_fn(width: usize, height: usize, f: impl Fn(usize, usize) -> u32) -> Self {
        let mut regions = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                regions.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            regions,
            loop_x: false,
            loop_y: false,
        }
    }

    pub fn with_looping(mut self, loop_x: bool, loop_y: bool) -> Self {
        self.loop_x = loop_x;
        self.loop_y = loop_y;
        self
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.regions[y * self.width + x])
    }

    pub fn set(&mut self, x: usize, y: usize, region_id: u32) {
        if x < self.width && y < self.height {
            self.regions[y * self.width + x] = region_id;
        }
    }

    #[inline]
    fn resolve(coord: i32, len: usize, wrap: bool) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if wrap {
            return Some(coord.rem_euclid(len as i32) as usize);
        }
        usize::try_from(coord).ok().filter(|&c| c < len)
    }
}

impl RegionSource for RegionGrid {
    fn region_id(&self, x: i32, y: i32) -> u32 {
        match (
            Self::resolve(x, self.width, self.loop_x),
            Self::resolve(y, self.height, self.loop_y),
        ) {
            (Some(x), Some(y)) => self.regions[y * self.width + x],
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_reads_zero() {
        let grid = RegionGrid::from_fn(3, 2, |x, y| (1 + x + y * 3) as u32);
        assert_eq!(grid.region_id(0, 0), 1);
        assert_eq!(grid.region_id(2, 1), 6);
        assert_eq!(grid.region_id(-1, 0), 0);
        assert_eq!(grid.region_id(3, 0), 0);
        assert_eq!(grid.region_id(0, 2), 0);
    }

    #[test]
    fn looping_axes_wrap() {
        let grid = RegionGrid::from_fn(3, 2, |x, y| (1 + x + y * 3) as u32).with_looping(true, false);
        assert_eq!(grid.region_id(-1, 0), 3);
        assert_eq!(grid.region_id(4, 1), 5);
        assert_eq!(grid.region_id(4, 2), 0);
    }

    #[test]
    fn closures_are_sources() {
        let src = |x: i32, y: i32| (x + y) as u32;
        assert_eq!(src.region_id(2, 3), 5);
    }

    #[test]
    fn set_ignores_outside() {
        let mut grid = RegionGrid::new(2, 2);
        grid.set(1, 1, 9);
        grid.set(2, 0, 9);
        assert_eq!(grid.get(1, 1), Some(9));
        assert_eq!(grid.get(2, 0), None);
    }
}
