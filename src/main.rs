use runoff_core::calibration::{calibrate, CalibrationFunctions, OptimizerOptions, SearchMethod};
use runoff_core::forcing::Forcing;
use runoff_core::gr4j::{self, Gr4j};
use runoff_core::metrics::{kge_components, nse, nse_loss};
use runoff_core::traits::RunoffModel;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,runoff_core=info"));

    fmt().with_env_filter(filter).with_target(false).init();
}

/// Two years of daily forcing: random storms over a seasonal PET cycle.
fn synthetic_forcing(days: usize) -> Forcing {
    let mut seed: u64 = 7;
    let mut next_f64 = || -> f64 {
        seed = seed
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (seed >> 33) as f64 / (1u64 << 31) as f64
    };

    let rain: Vec<f64> = (0..days)
        .map(|_| {
            let u = next_f64();
            if u > 0.75 {
                60.0 * (u - 0.75)
            } else {
                0.0
            }
        })
        .collect();
    let pet: Vec<f64> = (0..days)
        .map(|d| 2.5 + 2.0 * (2.0 * std::f64::consts::PI * d as f64 / 365.0).sin())
        .collect();
    Forcing::new(rain, pet).expect("rain and pet have the same length")
}

fn main() {
    init_logging();

    let forcing = synthetic_forcing(730);
    let truth = gr4j::Parameters::new(420.0, -1.2, 65.0, 2.1);
    let observed = Gr4j::run(&truth, &forcing, None).expect("forcing is valid");

    let total_rain: f64 = forcing.rain().iter().sum();
    let total_q: f64 = observed.iter().sum();
    info!(days = forcing.len(), total_rain, total_q, "reference simulation");

    let functions =
        CalibrationFunctions::<Gr4j>::new(nse_loss).with_transform(gr4j::default_transform());

    for method in [SearchMethod::ParticleSwarm, SearchMethod::NelderMead] {
        let options = OptimizerOptions::new()
            .with_method(method)
            .with_max_iterations(Some(200))
            .with_max_time(Some(30.0));

        let result = calibrate(forcing.rain(), forcing.pet(), &observed, &functions, &options)
            .expect("calibration inputs are consistent");

        let simulated = Gr4j::run(&result.params, &forcing, None).expect("forcing is valid");
        let kge = kge_components(&observed, &simulated);

        println!("\n{method:?}");
        println!("  x1 = {:>8.2} (true {:>8.2})", result.params.x1, truth.x1);
        println!("  x2 = {:>8.3} (true {:>8.3})", result.params.x2, truth.x2);
        println!("  x3 = {:>8.2} (true {:>8.2})", result.params.x3, truth.x3);
        println!("  x4 = {:>8.3} (true {:>8.3})", result.params.x4, truth.x4);
        println!(
            "  NSE = {:.5}, KGE = {:.5} (r = {:.4}, alpha = {:.4}, beta = {:.4})",
            nse(&observed, &simulated),
            kge.kge,
            kge.correlation,
            kge.relative_variability,
            kge.mean_bias
        );
        println!(
            "  {} iterations, {} evaluations, {}",
            result.iterations, result.evaluations, result.termination
        );
    }
}
