//! Raster container regression test

use objfind_core::{Box, Pix, PixMut, PixelDepth};
use objfind_test::RegParams;

#[test]
fn pix_reg() {
    let mut rp = RegParams::new("pix");

    // Packed access at every depth
    for depth in [
        PixelDepth::Bit1,
        PixelDepth::Bit2,
        PixelDepth::Bit4,
        PixelDepth::Bit8,
        PixelDepth::Bit16,
        PixelDepth::Bit32,
    ] {
        let (w, h) = (37u32, 5u32);
        let mut pm = PixMut::new(w, h, depth).unwrap();
        let max = depth.max_value();
        for y in 0..h {
            for x in 0..w {
                pm.set_pixel(x, y, (x * 31 + y * 7) & max).unwrap();
            }
        }
        let pix: Pix = pm.into();
        let mismatches = (0..h)
            .flat_map(|y| (0..w).map(move |x| (x, y)))
            .filter(|&(x, y)| pix.get_pixel(x, y) != Some((x * 31 + y * 7) & max))
            .count();
        rp.compare_values(0.0, mismatches as f64, 0.0);
        rp.compare_values(1.0, pix.get_pixel(w, 0).is_none() as u8 as f64, 0.0);
    }

    // Gray rows round-trip through bytes
    let bytes: Vec<u8> = (0..60).map(|i| (i * 4) as u8).collect();
    let pix = Pix::from_gray_bytes(12, 5, &bytes).unwrap();
    let mut row = Vec::new();
    let mut all = Vec::new();
    for y in 0..5 {
        pix.read_gray_row(y, &mut row).unwrap();
        all.extend_from_slice(&row);
    }
    rp.compare_strings(&format!("{bytes:?}"), &format!("{all:?}"));

    // Clones share pixels; drawing goes through a fresh PixMut
    let shared = pix.clone();
    rp.compare_values(1.0, shared.equals(&pix) as u8 as f64, 0.0);
    let mut copy = PixMut::new(pix.width(), pix.height(), pix.depth()).unwrap();
    copy.set_pixel(0, 0, 99).unwrap();
    let copy: Pix = copy.into();
    rp.compare_values(0.0, pix.get_pixel(0, 0).unwrap() as f64, 0.0);
    rp.compare_values(99.0, copy.get_pixel(0, 0).unwrap() as f64, 0.0);

    // Box edges
    let b = Box::new_unchecked(6, 2, 10, 10);
    rp.compare_values(16.0, b.right() as f64, 0.0);
    rp.compare_values(12.0, b.bottom() as f64, 0.0);
    rp.compare_values(100.0, b.area() as f64, 0.0);

    assert!(rp.cleanup());
}
