/// A drawable destination the compositor blits into.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (usize, usize);
    fn clear(&mut self);
    fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]);
}

/// Owned 8-bit RGBA image, row-major, no padding.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RgbaSurface {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbaSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.data = vec![0; width * height * 4];
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let idx = (y * self.width + x) * 4;
        let mut px = [0; 4];
        px.copy_from_slice(&self.data[idx..idx + 4]);
        px
    }

    #[inline]
    pub fn alpha(&self, x: usize, y: usize) -> u8 {
        self.data[(y * self.width + x) * 4 + 3]
    }

    /// Alpha channel of every pixel, row-major.
    pub fn alphas(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(4).map(|px| px[3])
    }
}

impl Surface for RgbaSurface {
    fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.data.fill(0);
    }

    #[inline]
    fn put_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let idx = (y * self.width + x) * 4;
        self.data[idx..idx + 4].copy_from_slice(&rgba);
    }
}
