use criterion::{Criterion, black_box, criterion_group, criterion_main};
use objfind_core::Pix;
use objfind_region::{find_objects, find_sorted_objects};

/// Tall raster of 8 gray levels: diagonal stripes crossed by vertical bars.
fn striped_raster(width: u32, height: u32) -> Pix {
    let mut bytes = Vec::with_capacity((width * height) as usize);
    for y in 0..height {
        for x in 0..width {
            let level = if x % 64 < 4 { 7 } else { ((x + y) / 16) % 7 };
            bytes.push((level * 32) as u8);
        }
    }
    Pix::from_gray_bytes(width, height, &bytes).unwrap()
}

fn bench_find_objects(c: &mut Criterion) {
    let pix = striped_raster(640, 4096);

    c.bench_function("find_objects_640x4096", |b| {
        b.iter(|| {
            let objs = find_objects(black_box(&pix)).unwrap();
            black_box(objs.len());
        });
    });

    c.bench_function("find_sorted_objects_640x4096", |b| {
        b.iter(|| {
            let objs = find_sorted_objects(black_box(&pix)).unwrap();
            black_box(objs.len());
        });
    });
}

criterion_group!(benches, bench_find_objects);
criterion_main!(benches);
