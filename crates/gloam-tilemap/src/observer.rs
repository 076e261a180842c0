use gloam_layer::ViewportGeometry;

use crate::source::RegionSource;

/// Absolute tile coordinate of buffer cell `(0, 0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TileOrigin {
    pub x: i32,
    pub y: i32,
}

impl TileOrigin {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Absolute tile for a buffer-relative cell, saturating at the `i32` edges.
    #[inline]
    pub fn offset(self, col: usize, row: usize) -> (i32, i32) {
        let col = i32::try_from(col).unwrap_or(i32::MAX);
        let row = i32::try_from(row).unwrap_or(i32::MAX);
        (self.x.saturating_add(col), self.y.saturating_add(row))
    }
}

/// Extension points a tile renderer calls while it paints.
///
/// Per frame the host issues any number of paint events followed by exactly
/// one `frame_finished`.
pub trait TilemapObserver {
    /// Viewport size changed; buffered state for the old size is invalid.
    fn viewport_resized(&mut self, geometry: &ViewportGeometry);

    /// A repaint of every buffered cell starts at `start`.
    fn begin_full_repaint(&mut self, start: TileOrigin);

    /// The host painted buffer cell `(col, row)`, i.e. tile `start + (col, row)`.
    fn tile_painted(&mut self, map: &dyn RegionSource, start: TileOrigin, col: usize, row: usize);

    /// The start tile moved by `(dx, dy)` and the host keeps cells that stay
    /// visible; only exposed cells are painted afterwards.
    fn viewport_scrolled(&mut self, start: TileOrigin, dx: i32, dy: i32);

    /// All paint events for this frame are done.
    fn frame_finished(&mut self, map: &dyn RegionSource);
}
