use avx256::{Config, Kernels};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// One 1080p frame of packed 3-byte pixels, and its luminance plane.
const WIDTH: usize = 1920;
const HEIGHT: usize = 1080;
const PLANE: usize = WIDTH * HEIGHT;
const FRAME: usize = PLANE * 3;

fn kernel_pair() -> [(&'static str, Kernels); 2] {
    let _ = env_logger::try_init();
    let vector = Kernels::new(&Config {
        force_scalar: false,
        min_vector_len: 0,
    });
    [("scalar", Kernels::scalar()), ("vector", vector)]
}

fn bench_add_saturating(c: &mut Criterion) {
    let src = vec![3u8; PLANE];
    let mut dst = vec![250u8; PLANE];
    for (name, kernels) in kernel_pair() {
        c.bench_function(&format!("add_saturating_u8/{}", name), |b| {
            b.iter(|| kernels.add_saturating_u8(black_box(&mut dst), black_box(&src)))
        });
    }
}

fn bench_threshold(c: &mut Criterion) {
    let mut data: Vec<u8> = (0..PLANE).map(|i| (i * 7) as u8).collect();
    for (name, kernels) in kernel_pair() {
        c.bench_function(&format!("threshold_u8/{}", name), |b| {
            b.iter(|| kernels.threshold_u8(black_box(&mut data), black_box(127)))
        });
    }
}

fn bench_abs_diff(c: &mut Criterion) {
    let previous: Vec<u8> = (0..PLANE).map(|i| (i * 3) as u8).collect();
    let current: Vec<u8> = (0..PLANE).map(|i| (i * 5) as u8).collect();
    let mut out = vec![0u8; PLANE];
    for (name, kernels) in kernel_pair() {
        c.bench_function(&format!("abs_diff_u8/{}", name), |b| {
            b.iter(|| kernels.abs_diff_u8(black_box(&previous), black_box(&current), &mut out))
        });
    }
}

fn bench_blend(c: &mut Criterion) {
    let src = vec![1.0f32; PLANE];
    let mut dst = vec![0.25f32; PLANE];
    for (name, kernels) in kernel_pair() {
        c.bench_function(&format!("blend_f32/{}", name), |b| {
            b.iter(|| kernels.blend_f32(black_box(&mut dst), black_box(&src), 0.5))
        });
    }
}

fn bench_sum(c: &mut Criterion) {
    let data: Vec<f32> = (0..PLANE).map(|i| (i % 100) as f32).collect();
    for (name, kernels) in kernel_pair() {
        c.bench_function(&format!("sum_f32/{}", name), |b| {
            b.iter(|| kernels.sum_f32(black_box(&data)))
        });
    }
}

fn bench_bgr_to_rgb(c: &mut Criterion) {
    let mut frame: Vec<u8> = (0..FRAME).map(|i| i as u8).collect();
    for (name, kernels) in kernel_pair() {
        c.bench_function(&format!("bgr_to_rgb/{}", name), |b| {
            b.iter(|| kernels.bgr_to_rgb(black_box(&mut frame)))
        });
    }
}

criterion_group!(
    benches,
    bench_add_saturating,
    bench_threshold,
    bench_abs_diff,
    bench_blend,
    bench_sum,
    bench_bgr_to_rgb
);
criterion_main!(benches);
