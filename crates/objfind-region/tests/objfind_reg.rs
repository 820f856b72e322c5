//! Object extraction regression test
//!
//! Checks the extraction invariants on seeded random rasters and compares
//! the object partition with a straightforward 4-connected flood fill.
//!
//! Run with:
//! ```
//! cargo test -p objfind-region --test objfind_reg
//! ```

use objfind_core::{Box, ImageFormat, Pix, PixMut, PixelDepth};
use objfind_region::{Object, fill_gaps, find_objects, find_sorted_objects, render_objects};
use objfind_test::{RegParams, raster_from_rows};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Random raster with `levels` values; blocky so that objects span rows.
fn random_raster(rng: &mut StdRng, w: u32, h: u32, levels: u8) -> Pix {
    let mut bytes = vec![0u8; (w * h) as usize];
    for y in 0..h as usize {
        for x in 0..w as usize {
            bytes[y * w as usize + x] = if y > 0 && rng.gen_bool(0.5) {
                bytes[(y - 1) * w as usize + x]
            } else if x > 0 && rng.gen_bool(0.4) {
                bytes[y * w as usize + x - 1]
            } else {
                rng.gen_range(0..levels)
            };
        }
    }
    Pix::from_gray_bytes(w, h, &bytes).unwrap()
}

/// Component label per pixel by breadth-first 4-connected fill.
fn flood_labels(pix: &Pix) -> (Vec<usize>, usize) {
    let (w, h) = (pix.width() as usize, pix.height() as usize);
    let value = |x: usize, y: usize| pix.get_pixel(x as u32, y as u32).unwrap();
    let mut labels = vec![usize::MAX; w * h];
    let mut n = 0;
    for start in 0..w * h {
        if labels[start] != usize::MAX {
            continue;
        }
        let color = value(start % w, start / w);
        labels[start] = n;
        let mut queue = VecDeque::from([start]);
        while let Some(p) = queue.pop_front() {
            let (x, y) = (p % w, p / w);
            let mut neighbors = Vec::with_capacity(4);
            if x > 0 {
                neighbors.push(p - 1);
            }
            if x + 1 < w {
                neighbors.push(p + 1);
            }
            if y > 0 {
                neighbors.push(p - w);
            }
            if y + 1 < h {
                neighbors.push(p + w);
            }
            for q in neighbors {
                if labels[q] == usize::MAX && value(q % w, q / w) == color {
                    labels[q] = n;
                    queue.push_back(q);
                }
            }
        }
        n += 1;
    }
    (labels, n)
}

fn run_bound(obj: &Object) -> Box {
    let x0 = obj.runs.iter().map(|r| r.start).min().unwrap();
    let x1 = obj.runs.iter().map(|r| r.end).max().unwrap();
    let y0 = obj.runs.iter().map(|r| r.row).min().unwrap();
    let y1 = obj.runs.iter().map(|r| r.row).max().unwrap();
    Box::new_unchecked(x0, y0, x1 - x0, y1 - y0 + 1)
}

/// Number of invariant violations of `objs` against `pix`.
fn check_objects(pix: &Pix, objs: &[Object]) -> usize {
    let (w, h) = (pix.width() as usize, pix.height() as usize);
    let (labels, n_components) = flood_labels(pix);
    let mut violations = 0;
    let mut owner = vec![usize::MAX; w * h];

    if objs.len() != n_components {
        violations += 1;
    }
    for (i, obj) in objs.iter().enumerate() {
        let mut area = 0u64;
        let mut label = None;
        for run in &obj.runs {
            area += run.len();
            for x in run.start..run.end {
                let p = run.row as usize * w + x as usize;
                if owner[p] != usize::MAX {
                    violations += 1;
                }
                owner[p] = i;
                if pix.get_pixel(x as u32, run.row as u32) != Some(obj.color as u32) {
                    violations += 1;
                }
                if *label.get_or_insert(labels[p]) != labels[p] {
                    violations += 1;
                }
            }
        }
        if area != obj.area || obj.area as i64 > obj.bound.area() {
            violations += 1;
        }
        if run_bound(obj) != obj.bound {
            violations += 1;
        }
    }
    violations + owner.iter().filter(|&&o| o == usize::MAX).count()
}

#[test]
fn objfind_reg() {
    let mut rp = RegParams::new("objfind");

    // Hand-drawn scenes
    let pix = raster_from_rows(&["11...11", "1111111"]).unwrap();
    let objs = find_sorted_objects(&pix).unwrap();
    rp.compare_values(11.0, objs[0].area as f64, 0.0);
    rp.compare_values(2.0, objs.len() as f64, 0.0);

    let pix = raster_from_rows(&[
        "aaaa....", //
        "a..a.bb.", //
        "aaaa.bb.", //
        "........", //
    ])
    .unwrap();
    let objs = find_sorted_objects(&pix).unwrap();
    let summary: Vec<String> = objs
        .iter()
        .map(|o| {
            format!(
                "{}:{}@({},{} {}x{})",
                o.color, o.area, o.bound.x, o.bound.y, o.bound.w, o.bound.h
            )
        })
        .collect();
    rp.compare_strings(
        "0:16@(0,0 8x4) | 10:10@(0,0 4x3) | 11:4@(5,1 2x2) | 0:2@(1,1 2x1)",
        &summary.join(" | "),
    );
    rp.compare_values(0.0, check_objects(&pix, &objs) as f64, 0.0);

    // Seeded random rasters
    let mut rng = StdRng::seed_from_u64(0x0bf1_d5e7);
    for round in 0..40 {
        let w = rng.gen_range(1..48);
        let h = rng.gen_range(1..32);
        let levels = if round % 2 == 0 { 2 } else { 4 };
        let pix = random_raster(&mut rng, w, h, levels);

        let objs = find_sorted_objects(&pix).unwrap();
        rp.compare_values(0.0, check_objects(&pix, &objs) as f64, 0.0);

        let total: u64 = objs.iter().map(|o| o.area).sum();
        rp.compare_values((w * h) as f64, total as f64, 0.0);

        let ordered = objs.windows(2).all(|p| p[0].area >= p[1].area);
        rp.compare_values(1.0, ordered as u8 as f64, 0.0);

        let stable = objs.iter().all(|o| fill_gaps(&fill_gaps(o)) == fill_gaps(o));
        rp.compare_values(1.0, stable as u8 as f64, 0.0);

        let mut out = PixMut::new(w, h, PixelDepth::Bit8).unwrap();
        render_objects(&mut out, &objs, |_, o| o.color as u32).unwrap();
        let out: Pix = out.into();
        rp.compare_pix(&pix, &out);

        // Sorting is independent of discovery order.
        let mut unsorted = find_objects(&pix).unwrap();
        unsorted.reverse();
        objfind_region::sort_objects(&mut unsorted);
        rp.compare_values(1.0, (unsorted == objs) as u8 as f64, 0.0);

        if rp.display() && round == 0 {
            rp.write_pix_and_check(&out, ImageFormat::Png).unwrap();
        }
    }

    assert!(rp.cleanup());
}
