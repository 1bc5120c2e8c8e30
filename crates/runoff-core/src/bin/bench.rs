/// Pure Rust core benchmarks for the runoff models.
///
/// Uses std::time::Instant for timing, a deterministic LCG PRNG for data generation,
/// and std::hint::black_box to prevent dead-code elimination.
use std::hint::black_box;
use std::time::{Duration, Instant};

use runoff_core::forcing::Forcing;
use runoff_core::gr4j::{self, Gr4j};
use runoff_core::metrics::nse_loss;
use runoff_core::sampling::evaluate_ensemble;
use runoff_core::single_store::{self, SingleStore};
use runoff_core::traits::RunoffModel;

const REPEATS: usize = 7;
const ENSEMBLE_SIZE: usize = 64;

/// Simple LCG PRNG for deterministic data generation.
fn make_forcing(n: usize, seed: u64) -> Forcing {
    let mut state = seed;
    let mut next_f64 = || -> f64 {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) as f64 / (1u64 << 31) as f64
    };

    let rain: Vec<f64> = (0..n).map(|_| next_f64() * 10.0).collect();
    let pet: Vec<f64> = (0..n).map(|_| 0.5 + next_f64() * 4.5).collect();
    Forcing::new(rain, pet).expect("generated series have equal length")
}

/// Run a closure `REPEATS` times, return the median duration.
fn median_time<F: FnMut()>(mut f: F) -> Duration {
    let mut times: Vec<Duration> = (0..REPEATS)
        .map(|_| {
            let start = Instant::now();
            f();
            start.elapsed()
        })
        .collect();
    times.sort();
    times[REPEATS / 2]
}

fn bench_model<M: RunoffModel>(
    name: &'static str,
    params: &M::Params,
    sizes: &[usize],
) -> Vec<(&'static str, usize, Duration)> {
    let mut results = Vec::new();

    for &n in sizes {
        let forcing = make_forcing(n, 42);

        // Warmup
        black_box(M::run(params, &forcing, None).ok());

        let dur = median_time(|| {
            black_box(M::run(params, &forcing, None).ok());
        });
        results.push((name, n, dur));
    }
    results
}

fn bench_ensemble(sizes: &[usize]) -> Vec<(&'static str, usize, Duration)> {
    let sets: Vec<gr4j::Parameters> = (0..ENSEMBLE_SIZE)
        .map(|i| gr4j::Parameters::new(100.0 + 20.0 * i as f64, -1.0, 60.0, 1.5))
        .collect();
    let mut results = Vec::new();

    for &n in sizes {
        let forcing = make_forcing(n, 42);
        let observed = Gr4j::run(&gr4j::Parameters::default(), &forcing, None)
            .expect("forcing is valid");

        // Warmup
        black_box(evaluate_ensemble::<Gr4j>(&forcing, &observed, &sets, &nse_loss).ok());

        let dur = median_time(|| {
            black_box(evaluate_ensemble::<Gr4j>(&forcing, &observed, &sets, &nse_loss).ok());
        });
        results.push(("gr4j ensemble x64", n, dur));
    }
    results
}

fn main() {
    println!("Pure Rust Core Benchmarks");
    println!("============================================================");
    println!("{:<18} {:>6}   {:>12}", "Model", "N", "Median (ms)");
    println!("--------------------------------------------");

    let mut all_results: Vec<(&str, usize, Duration)> = Vec::new();

    all_results.extend(bench_model::<Gr4j>(
        "gr4j",
        &gr4j::Parameters::default(),
        &[3650, 36500],
    ));
    all_results.extend(bench_model::<SingleStore>(
        "single_store",
        &single_store::Parameters::default(),
        &[3650, 36500],
    ));
    all_results.extend(bench_ensemble(&[3650]));

    for (model, n, dur) in &all_results {
        let ms = dur.as_secs_f64() * 1000.0;
        println!("{:<18} {:>6}      {:>8.2}", model, n, ms);
    }

    println!("============================================================");
}
