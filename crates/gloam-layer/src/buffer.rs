/// One opacity sample per buffered tile cell, row-major.
///
/// Cell `(0, 0)` is the viewport's start tile; the owner translates absolute
/// tile coordinates before writing.
#[derive(Clone, Debug)]
pub struct DarknessBuffer {
    cols: usize,
    rows: usize,
    samples: Vec<u8>,
    revision: u64,
}

impl DarknessBuffer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            samples: vec![0; cols * rows],
            revision: 0,
        }
    }

    #[inline]
    fn idx(&self, col: usize, row: usize) -> usize {
        row * self.cols + col
    }

    #[inline]
    fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }

    #[inline]
    pub fn size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    #[inline]
    pub fn in_bounds(&self, col: usize, row: usize) -> bool {
        col < self.cols && row < self.rows
    }

    /// Monotonic change stamp; moves whenever a sample changes.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn get(&self, col: usize, row: usize) -> Option<u8> {
        if !self.in_bounds(col, row) {
            return None;
        }
        Some(self.samples[self.idx(col, row)])
    }

    /// Reallocate for a new size; previous contents are discarded.
    pub fn resize(&mut self, cols: usize, rows: usize) {
        log::debug!(
            "darkness buffer resize {}x{} -> {}x{}",
            self.cols,
            self.rows,
            cols,
            rows
        );
        self.cols = cols;
        self.rows = rows;
        self.samples = vec![0; cols * rows];
        self.bump();
    }

    /// Reset every sample to fully lit.
    pub fn clear(&mut self) {
        if self.samples.iter().any(|&s| s != 0) {
            self.samples.fill(0);
            self.bump();
        }
    }

    /// Write one cell. Coordinates outside the buffer are ignored and
    /// reported by returning `false`.
    pub fn paint_cell(&mut self, col: usize, row: usize, opacity: u8) -> bool {
        if !self.in_bounds(col, row) {
            log::trace!(
                "paint_cell ({}, {}) outside {}x{} buffer",
                col,
                row,
                self.cols,
                self.rows
            );
            return false;
        }
        let i = self.idx(col, row);
        if self.samples[i] != opacity {
            self.samples[i] = opacity;
            self.bump();
        }
        true
    }

    /// Move contents for a start tile that advanced by `(dx, dy)` cells:
    /// the sample that was at `(x, y)` lands at `(x - dx, y - dy)`. Cells
    /// that scroll in are left fully lit for the caller to repaint.
    pub fn scroll(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        let (cols, rows) = (self.cols as i64, self.rows as i64);
        let (dx, dy) = (i64::from(dx), i64::from(dy));
        if dx.abs() >= cols || dy.abs() >= rows {
            self.samples.fill(0);
            self.bump();
            return;
        }
        let mut next = vec![0u8; self.samples.len()];
        // Destination columns whose source column stays inside the buffer.
        let x0 = (-dx).max(0);
        let x1 = (cols - dx).min(cols);
        let span = (x1 - x0) as usize;
        for y in 0..rows {
            let sy = y + dy;
            if sy < 0 || sy >= rows {
                continue;
            }
            let dst = (y * cols + x0) as usize;
            let src = (sy * cols + x0 + dx) as usize;
            next[dst..dst + span].copy_from_slice(&self.samples[src..src + span]);
        }
        self.samples = next;
        self.bump();
    }
}
