use std::hint::black_box;
use std::time::Instant;

use cadence_kernel::{Clock, FixedTimestep, MonotonicClock};

fn jittered_samples(count: usize) -> Vec<f64> {
    // Deterministic frame-time jitter around 60 fps.
    (0..count)
        .map(|i| 1.0 / 60.0 + ((i * 7919) % 13) as f64 * 0.0004 - 0.0024)
        .collect()
}

fn bench_drain(sample_count: usize, iterations: usize) {
    let samples = jittered_samples(sample_count);

    let start = Instant::now();
    let mut steps = 0;
    for _ in 0..iterations {
        let mut ts = FixedTimestep::from_rate(60.0, 0.0).expect("valid rate");
        for &dt in &samples {
            ts.accumulate(black_box(dt));
            steps += ts.drain();
        }
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  drain ({sample_count} samples, {iterations} iters): {per_iter:?}/iter, {steps} steps total"
    );
}

fn bench_clock(reads: usize) {
    let clock = MonotonicClock::new();

    let start = Instant::now();
    let mut last = 0.0;
    for _ in 0..reads {
        last = black_box(clock.now());
    }
    let elapsed = start.elapsed();
    println!(
        "  clock.now ({reads} reads): {:?}/read, last={last:.6}",
        elapsed / reads as u32
    );
}

fn main() {
    println!("=== Fixed Timestep Benchmarks ===\n");

    println!("[FixedTimestep::drain]");
    bench_drain(1_000, 100);
    bench_drain(100_000, 10);

    println!("\n[MonotonicClock::now]");
    bench_clock(1_000_000);
}
