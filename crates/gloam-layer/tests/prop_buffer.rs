use gloam_layer::{Compositor, DarknessBuffer, RgbaSurface, ScaleFilter, Surface};
use proptest::prelude::*;

fn dim() -> impl Strategy<Value = usize> {
    1usize..=12
}

fn filter() -> impl Strategy<Value = ScaleFilter> {
    prop_oneof![Just(ScaleFilter::Nearest), Just(ScaleFilter::Bilinear)]
}

// Deterministic per-absolute-cell value, so shifted content can be checked.
fn value_at(x: i32, y: i32) -> u8 {
    (x.wrapping_mul(31) ^ y.wrapping_mul(17)).rem_euclid(251) as u8
}

proptest! {
    // clear + composite yields a fully transparent surface for any filter and size
    #[test]
    fn clear_then_composite_is_fully_lit(cols in dim(), rows in dim(), w in 1usize..64, h in 1usize..64, f in filter(), fill in any::<u8>()) {
        let mut buf = DarknessBuffer::new(cols, rows);
        for y in 0..rows { for x in 0..cols { buf.paint_cell(x, y, fill); } }
        let mut dest = RgbaSurface::new(w, h);
        dest.put_pixel(0, 0, [9, 9, 9, 9]);
        buf.clear();
        Compositor::new([40, 20, 60]).with_filter(f).composite(&buf, &mut dest);
        prop_assert!(dest.alphas().all(|a| a == 0));
    }

    // After a resize, painting the new far corner lands in bounds and touches only that cell
    #[test]
    fn resize_then_paint_boundary(c0 in dim(), r0 in dim(), cols in dim(), rows in dim(), v in 1u8..=255) {
        let mut buf = DarknessBuffer::new(c0, r0);
        buf.resize(cols, rows);
        prop_assert!(buf.paint_cell(cols - 1, rows - 1, v));
        prop_assert!(!buf.paint_cell(cols, rows - 1, v));
        prop_assert!(!buf.paint_cell(cols - 1, rows, v));
        for y in 0..rows { for x in 0..cols {
            let expect = if (x, y) == (cols - 1, rows - 1) { v } else { 0 };
            prop_assert_eq!(buf.get(x, y), Some(expect));
        }}
        prop_assert_eq!(buf.samples().len(), cols * rows);
    }

    // Scrolling keeps every cell that is still covered and clears the rest
    #[test]
    fn scroll_keeps_overlap(cols in dim(), rows in dim(), dx in -13i32..=13, dy in -13i32..=13) {
        let mut buf = DarknessBuffer::new(cols, rows);
        for y in 0..rows { for x in 0..cols {
            buf.paint_cell(x, y, value_at(x as i32, y as i32));
        }}
        buf.scroll(dx, dy);
        for y in 0..rows as i32 { for x in 0..cols as i32 {
            let (sx, sy) = (x + dx, y + dy);
            let covered = sx >= 0 && sy >= 0 && sx < cols as i32 && sy < rows as i32;
            let expect = if covered { value_at(sx, sy) } else { 0 };
            prop_assert_eq!(buf.get(x as usize, y as usize), Some(expect));
        }}
    }

    // Nearest compositing copies a cell's opacity to every pixel it covers
    #[test]
    fn nearest_composite_matches_cells(cols in dim(), rows in dim(), scale in 1usize..=4) {
        let mut buf = DarknessBuffer::new(cols, rows);
        for y in 0..rows { for x in 0..cols {
            buf.paint_cell(x, y, value_at(x as i32, y as i32));
        }}
        let mut dest = RgbaSurface::new(cols * scale, rows * scale);
        Compositor::default().composite(&buf, &mut dest);
        let (w, h) = dest.size();
        for y in 0..h { for x in 0..w {
            prop_assert_eq!(dest.alpha(x, y), buf.get(x / scale, y / scale).unwrap());
        }}
    }
}
