use std::ops::Range;

use gloam_layer::ViewportGeometry;

use crate::observer::{TileOrigin, TilemapObserver};
use crate::source::RegionSource;

/// What `Viewport::update` painted this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repaint {
    None,
    Full { cells: usize },
    Incremental { cells: usize },
}

impl Repaint {
    pub fn cells(self) -> usize {
        match self {
            Repaint::None => 0,
            Repaint::Full { cells } | Repaint::Incremental { cells } => cells,
        }
    }
}

/// Scrolling, virtualized tile viewport that drives [`TilemapObserver`]s.
///
/// The origin is the scroll position in map pixels. Buffered cells start
/// `margin` pixels before the origin, rounded down to a whole tile.
pub struct Viewport {
    geometry: ViewportGeometry,
    origin: (f32, f32),
    painted: Option<TileOrigin>,
    resized: bool,
    needs_repaint: bool,
}

impl Viewport {
    pub fn new(geometry: ViewportGeometry) -> Self {
        Self {
            geometry,
            origin: (0.0, 0.0),
            painted: None,
            resized: true,
            needs_repaint: true,
        }
    }

    pub fn geometry(&self) -> &ViewportGeometry {
        &self.geometry
    }

    pub fn buffer_dims(&self) -> (usize, usize) {
        self.geometry.buffer_dims()
    }

    /// Change the visible pixel size; observers are told on the next update.
    pub fn resize(&mut self, width: u32, height: u32) {
        let next = self.geometry.with_size(width, height);
        if next != self.geometry {
            self.geometry = next;
            self.resized = true;
        }
    }

    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = (x, y);
    }

    pub fn scroll_by(&mut self, dx: f32, dy: f32) {
        self.origin.0 += dx;
        self.origin.1 += dy;
    }

    /// Force a full repaint on the next update (e.g. after a map transfer).
    pub fn request_repaint(&mut self) {
        self.needs_repaint = true;
    }

    pub fn start_tile(&self) -> TileOrigin {
        let g = &self.geometry;
        let margin = g.margin as f32;
        TileOrigin {
            x: ((self.origin.0 - margin) / g.tile_width as f32).floor() as i32,
            y: ((self.origin.1 - margin) / g.tile_height as f32).floor() as i32,
        }
    }

    /// Screen position of buffer cell `(0, 0)`, in pixels.
    pub fn layer_origin(&self) -> (f32, f32) {
        let start = self.start_tile();
        let g = &self.geometry;
        (
            (f64::from(start.x) * f64::from(g.tile_width) - f64::from(self.origin.0)) as f32,
            (f64::from(start.y) * f64::from(g.tile_height) - f64::from(self.origin.1)) as f32,
        )
    }

    /// Run one frame of paint events against `observer`, ending with
    /// `frame_finished`.
    pub fn update<O>(&mut self, map: &dyn RegionSource, observer: &mut O) -> Repaint
    where
        O: TilemapObserver + ?Sized,
    {
        if self.resized {
            observer.viewport_resized(&self.geometry);
            self.resized = false;
            self.needs_repaint = true;
        }
        let (cols, rows) = self.geometry.buffer_dims();
        let start = self.start_tile();
        let repaint = match self.painted {
            Some(prev) if !self.needs_repaint => {
                let dx = i64::from(start.x) - i64::from(prev.x);
                let dy = i64::from(start.y) - i64::from(prev.y);
                if dx == 0 && dy == 0 {
                    Repaint::None
                } else if dx.unsigned_abs() >= cols as u64 || dy.unsigned_abs() >= rows as u64 {
                    paint_all(map, observer, start, cols, rows)
                } else {
                    // Both deltas are shorter than the buffer, so they fit in i32.
                    let (dx, dy) = (dx as i32, dy as i32);
                    observer.viewport_scrolled(start, dx, dy);
                    let xs = exposed(dx, cols);
                    let ys = exposed(dy, rows);
                    let mut cells = 0;
                    for col in xs.clone() {
                        for row in 0..rows {
                            observer.tile_painted(map, start, col, row);
                            cells += 1;
                        }
                    }
                    for row in ys {
                        for col in (0..cols).filter(|c| !xs.contains(c)) {
                            observer.tile_painted(map, start, col, row);
                            cells += 1;
                        }
                    }
                    Repaint::Incremental { cells }
                }
            }
            _ => paint_all(map, observer, start, cols, rows),
        };
        if repaint != Repaint::None {
            log::trace!("viewport start ({}, {}) {:?}", start.x, start.y, repaint);
        }
        self.painted = Some(start);
        self.needs_repaint = false;
        observer.frame_finished(map);
        repaint
    }
}

fn paint_all<O>(
    map: &dyn RegionSource,
    observer: &mut O,
    start: TileOrigin,
    cols: usize,
    rows: usize,
) -> Repaint
where
    O: TilemapObserver + ?Sized,
{
    observer.begin_full_repaint(start);
    for row in 0..rows {
        for col in 0..cols {
            observer.tile_painted(map, start, col, row);
        }
    }
    Repaint::Full { cells: cols * rows }
}

// Buffer cells that scroll in when the start tile moves by `d` along an axis.
fn exposed(d: i32, len: usize) -> Range<usize> {
    let n = (d.unsigned_abs() as usize).min(len);
    if d > 0 { len - n..len } else { 0..n }
}
