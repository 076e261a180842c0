/// Pixel size of the visible viewport, its tiles, and the scroll margin kept
/// on every side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewportGeometry {
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub margin: u32,
}

impl ViewportGeometry {
    pub fn new(width: u32, height: u32, tile_width: u32, tile_height: u32, margin: u32) -> Self {
        Self {
            width,
            height,
            tile_width: tile_width.max(1),
            tile_height: tile_height.max(1),
            margin,
        }
    }

    /// Buffer size in cells: the viewport plus margin on both sides, rounded
    /// up to whole tiles, plus one cell for a partially scrolled tile.
    pub fn buffer_dims(&self) -> (usize, usize) {
        let w = self.width + self.margin * 2;
        let h = self.height + self.margin * 2;
        let cols = w.div_ceil(self.tile_width) + 1;
        let rows = h.div_ceil(self.tile_height) + 1;
        (cols as usize, rows as usize)
    }

    /// Pixel size covered by the whole buffer.
    pub fn footprint_px(&self) -> (u32, u32) {
        let (cols, rows) = self.buffer_dims();
        (cols as u32 * self.tile_width, rows as u32 * self.tile_height)
    }

    pub fn with_size(self, width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dims_cover_viewport_and_margin() {
        // 816x624 with 48px tiles and a 20px margin
        let g = ViewportGeometry::new(816, 624, 48, 48, 20);
        assert_eq!(g.buffer_dims(), (19, 15));
        assert_eq!(g.footprint_px(), (19 * 48, 15 * 48));
    }

    #[test]
    fn exact_multiple_still_gets_spare_cell() {
        let g = ViewportGeometry::new(64, 32, 16, 16, 0);
        assert_eq!(g.buffer_dims(), (5, 3));
    }

    #[test]
    fn zero_tile_size_is_clamped() {
        let g = ViewportGeometry::new(10, 10, 0, 0, 0);
        assert_eq!(g.tile_width, 1);
        assert_eq!(g.buffer_dims(), (11, 11));
    }
}
