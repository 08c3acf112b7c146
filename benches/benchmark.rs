use criterion::{black_box, criterion_group, criterion_main, Criterion};
use plant_health::processing::field::{PixelBuffer, Range};
use plant_health::processing::{calculate_ndvi, min_max, normalize, Histogram, Pipeline, PipelineOptions};

/// Synthetic 1024x1024 infrablue frame with a mix of foliage and background
fn synthetic_image() -> (Vec<u8>, usize, usize) {
    let size = (1024, 1024);
    let mut data = vec![0u8; size.0 * size.1 * 4];
    for (i, px) in data.chunks_exact_mut(4).enumerate() {
        let ir = 120 + (i % 100) as u8;
        let blue = 40 + (i % 150) as u8;
        px.copy_from_slice(&[ir, 90, blue, 255]);
    }
    (data, size.0, size.1)
}

/// Benchmark the NDVI calculation in isolation
fn benchmark_ndvi_calculation(c: &mut Criterion) {
    let (data, width, height) = synthetic_image();
    let image = PixelBuffer::new(&data, width, height).unwrap();

    c.bench_function("ndvi_core_calculation", |b| {
        b.iter(|| calculate_ndvi(black_box(&image)).unwrap())
    });
}

/// Benchmark histogram construction plus the Otsu sweep
fn benchmark_otsu(c: &mut Criterion) {
    let (data, width, height) = synthetic_image();
    let image = PixelBuffer::new(&data, width, height).unwrap();
    let raw = calculate_ndvi(&image).unwrap();
    let scaled = normalize(&raw, min_max(&raw, Range::default())).unwrap();

    c.bench_function("otsu_threshold", |b| {
        b.iter(|| Histogram::from_scaled(black_box(&scaled)).otsu_threshold())
    });
}

/// Benchmark the whole pipeline
fn benchmark_pipeline(c: &mut Criterion) {
    let (data, width, height) = synthetic_image();
    let image = PixelBuffer::new(&data, width, height).unwrap();
    let pipeline = Pipeline::new(None, PipelineOptions::default()).unwrap();

    c.bench_function("full_pipeline", |b| {
        b.iter(|| pipeline.run(black_box(&image)).unwrap())
    });
}

criterion_group!(benches, benchmark_ndvi_calculation, benchmark_otsu, benchmark_pipeline);
criterion_main!(benches);
