use crate::buffer::DarknessBuffer;
use crate::geometry::ViewportGeometry;
use crate::surface::{RgbaSurface, Surface};

/// How buffer cells are stretched onto destination pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScaleFilter {
    /// Hard tile edges.
    #[default]
    Nearest,
    /// Soft edges, interpolated between cell centres.
    Bilinear,
}

impl ScaleFilter {
    pub fn toggled(self) -> Self {
        match self {
            ScaleFilter::Nearest => ScaleFilter::Bilinear,
            ScaleFilter::Bilinear => ScaleFilter::Nearest,
        }
    }
}

/// Scales a [`DarknessBuffer`] onto a [`Surface`], tinted with one colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Compositor {
    pub tint: [u8; 3],
    pub filter: ScaleFilter,
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new([0, 0, 0])
    }
}

struct Tap {
    lo: usize,
    hi: usize,
    t: f32,
}

impl Compositor {
    pub fn new(tint: [u8; 3]) -> Self {
        Self {
            tint,
            filter: ScaleFilter::default(),
        }
    }

    pub fn with_filter(mut self, filter: ScaleFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Replace the whole destination with the buffer stretched to its size.
    /// RGB is the tint, alpha is the cell's opacity.
    pub fn composite<S: Surface + ?Sized>(&self, buffer: &DarknessBuffer, dest: &mut S) {
        let (dw, dh) = dest.size();
        let (cols, rows) = buffer.size();
        if dw == 0 || dh == 0 {
            return;
        }
        if cols == 0 || rows == 0 {
            dest.clear();
            return;
        }
        match self.filter {
            ScaleFilter::Nearest => self.composite_nearest(buffer, dest, dw, dh),
            ScaleFilter::Bilinear => self.composite_bilinear(buffer, dest, dw, dh),
        }
    }

    fn composite_nearest<S: Surface + ?Sized>(
        &self,
        buffer: &DarknessBuffer,
        dest: &mut S,
        dw: usize,
        dh: usize,
    ) {
        let (cols, rows) = buffer.size();
        let samples = buffer.samples();
        let xs: Vec<usize> = (0..dw).map(|x| x * cols / dw).collect();
        let [r, g, b] = self.tint;
        for y in 0..dh {
            let row = &samples[(y * rows / dh) * cols..][..cols];
            for (x, &sx) in xs.iter().enumerate() {
                dest.put_pixel(x, y, [r, g, b, row[sx]]);
            }
        }
    }

    fn composite_bilinear<S: Surface + ?Sized>(
        &self,
        buffer: &DarknessBuffer,
        dest: &mut S,
        dw: usize,
        dh: usize,
    ) {
        let (cols, rows) = buffer.size();
        let samples = buffer.samples();
        let xs = linear_taps(cols, dw);
        let ys = linear_taps(rows, dh);
        let [r, g, b] = self.tint;
        for (y, ty) in ys.iter().enumerate() {
            let top = &samples[ty.lo * cols..][..cols];
            let bottom = &samples[ty.hi * cols..][..cols];
            for (x, tx) in xs.iter().enumerate() {
                let upper = lerp(f32::from(top[tx.lo]), f32::from(top[tx.hi]), tx.t);
                let lower = lerp(f32::from(bottom[tx.lo]), f32::from(bottom[tx.hi]), tx.t);
                let a = lerp(upper, lower, ty.t).round().clamp(0.0, 255.0) as u8;
                dest.put_pixel(x, y, [r, g, b, a]);
            }
        }
    }
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

// Sample positions at destination pixel centres mapped back to cell centres.
fn linear_taps(src: usize, dst: usize) -> Vec<Tap> {
    let max = (src - 1) as f32;
    (0..dst)
        .map(|d| {
            let f = ((d as f32 + 0.5) * src as f32 / dst as f32 - 0.5).clamp(0.0, max);
            let lo = f.floor() as usize;
            Tap {
                lo,
                hi: (lo + 1).min(src - 1),
                t: f - lo as f32,
            }
        })
        .collect()
}

/// The buffer, its compositor, and the surface it is composited into.
///
/// `present` re-composites only when the buffer or the compositor settings
/// changed since the last call.
#[derive(Clone, Debug)]
pub struct DarknessLayer {
    buffer: DarknessBuffer,
    compositor: Compositor,
    surface: RgbaSurface,
    composited: Option<u64>,
    surface_revision: u64,
}

impl DarknessLayer {
    pub fn new(compositor: Compositor) -> Self {
        Self {
            buffer: DarknessBuffer::new(0, 0),
            compositor,
            surface: RgbaSurface::default(),
            composited: None,
            surface_revision: 0,
        }
    }

    /// Size the buffer and surface for a viewport. The buffer is recreated.
    pub fn fit(&mut self, geometry: &ViewportGeometry) {
        let (cols, rows) = geometry.buffer_dims();
        let (w, h) = geometry.footprint_px();
        self.buffer.resize(cols, rows);
        self.surface.resize(w as usize, h as usize);
        self.composited = None;
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn paint_cell(&mut self, col: usize, row: usize, opacity: u8) -> bool {
        self.buffer.paint_cell(col, row, opacity)
    }

    pub fn scroll(&mut self, dx: i32, dy: i32) {
        self.buffer.scroll(dx, dy);
    }

    pub fn buffer(&self) -> &DarknessBuffer {
        &self.buffer
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn set_filter(&mut self, filter: ScaleFilter) {
        if self.compositor.filter != filter {
            self.compositor.filter = filter;
            self.composited = None;
        }
    }

    pub fn set_tint(&mut self, tint: [u8; 3]) {
        if self.compositor.tint != tint {
            self.compositor.tint = tint;
            self.composited = None;
        }
    }

    pub fn surface(&self) -> &RgbaSurface {
        &self.surface
    }

    /// Bumped every time `present` rewrites the surface.
    pub fn surface_revision(&self) -> u64 {
        self.surface_revision
    }

    /// Bring the owned surface up to date. Returns whether it was rewritten.
    pub fn present(&mut self) -> bool {
        let rev = self.buffer.revision();
        if self.composited == Some(rev) {
            return false;
        }
        self.compositor.composite(&self.buffer, &mut self.surface);
        self.composited = Some(rev);
        self.surface_revision = self.surface_revision.wrapping_add(1);
        true
    }
}
