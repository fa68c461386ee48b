//! Benchmark for MFCC extraction
//!
//! Measures:
//! 1. Extractor construction (filter bank + DCT table) for common presets
//! 2. Per-frame extraction cost at common spectrum sizes
//! 3. Batch extraction over a few seconds of frames

use audio_mfcc::{MfccConfig, MfccExtractor};
use std::time::Instant;

/// Synthetic magnitude spectrum with a few harmonic peaks
fn generate_test_spectrum(size: usize, frame: usize) -> Vec<f64> {
    (0..size)
        .map(|bin| {
            let peak = 20.0 + (frame % 7) as f64 * 5.0;
            let harmonic = (bin as f64 / peak).fract();
            0.01 + (-(harmonic * 10.0).powi(2)).exp()
        })
        .collect()
}

/// Mean, standard deviation, median, min and max of `times` (milliseconds)
fn report(times: &mut [f64]) {
    times.sort_by(|a, b| a.total_cmp(b));
    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let std_dev =
        (times.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / times.len() as f64).sqrt();

    println!(
        "Results: {:.4}ms ± {:.4}ms (median: {:.4}ms, range: {:.4}-{:.4}ms)",
        mean,
        std_dev,
        times[times.len() / 2],
        times[0],
        times[times.len() - 1]
    );
}

fn benchmark_construction(config: MfccConfig, label: &str) {
    println!("Benchmarking construction: {label}");

    let num_runs = 20;
    let mut times = Vec::with_capacity(num_runs);
    for _ in 0..num_runs {
        let start = Instant::now();
        let extractor = MfccExtractor::new(config);
        let elapsed = start.elapsed();

        assert!(extractor.is_ok(), "Extractor construction failed");
        times.push(elapsed.as_secs_f64() * 1000.0);
    }

    report(&mut times);
    println!();
}

fn benchmark_frames(input_size: usize, label: &str) {
    let config = MfccConfig::new().with_input_size(input_size);
    let extractor = MfccExtractor::new(config).expect("valid benchmark configuration");
    let spectrum = generate_test_spectrum(input_size, 0);

    println!("Benchmarking {label}: {input_size} bins per frame");

    // Warm up
    for _ in 0..10 {
        let _ = extractor.compute(&spectrum);
    }

    let num_runs = 1000;
    let mut times = Vec::with_capacity(num_runs);
    for _ in 0..num_runs {
        let start = Instant::now();
        let result = extractor.compute(&spectrum);
        let elapsed = start.elapsed();

        assert!(result.is_ok(), "MFCC computation failed");
        times.push(elapsed.as_secs_f64() * 1000.0);
    }

    report(&mut times);
    println!();
}

fn benchmark_batch(duration: f64, label: &str) {
    let sample_rate = 44100.0;
    let hop_size = 512.0;
    let num_frames = (duration * sample_rate / hop_size) as usize;

    let extractor = MfccExtractor::new(MfccConfig::default()).expect("valid default configuration");
    let spectra: Vec<Vec<f64>> = (0..num_frames)
        .map(|frame| generate_test_spectrum(1025, frame))
        .collect();

    println!("Benchmarking {label}: {duration:.1}s of audio, {num_frames} frames");

    let num_runs = 10;
    let mut times = Vec::with_capacity(num_runs);
    for _ in 0..num_runs {
        let start = Instant::now();
        let result = extractor.compute_batch(&spectra);
        let elapsed = start.elapsed();

        assert!(result.is_ok(), "Batch computation failed");
        times.push(elapsed.as_secs_f64() * 1000.0);
    }

    report(&mut times);
    println!();
}

fn main() {
    println!("🎵 Audio MFCC Extraction Benchmark");
    println!("==================================");

    println!("Features enabled:");
    if cfg!(feature = "parallel-processing") {
        println!("  ✅ Parallel batch processing");
    } else {
        println!("  ❌ Parallel batch processing (not compiled in)");
    }
    println!();

    benchmark_construction(MfccConfig::default(), "default (40 bands, 13 coefficients)");
    benchmark_construction(MfccConfig::htk(), "HTK (26 bands, 20 coefficients)");

    let frame_cases = vec![
        (257, "512-sample frames"),
        (513, "1024-sample frames"),
        (1025, "2048-sample frames"),
        (2049, "4096-sample frames"),
    ];
    for (input_size, label) in frame_cases {
        benchmark_frames(input_size, label);
    }

    for (duration, label) in [(1.0, "Short clip"), (30.0, "Long clip")] {
        benchmark_batch(duration, label);
    }

    println!("🏁 Benchmark Complete!");

    if !cfg!(feature = "parallel-processing") {
        println!();
        println!("💡 To benchmark parallel batches, run with:");
        println!("   cargo bench --features parallel-processing --bench mfcc_benchmark");
    }
}
