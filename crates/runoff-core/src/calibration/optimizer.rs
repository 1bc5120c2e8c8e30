//! Optimizer boundary and its `argmin` implementation.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use argmin::core::observers::{Observe, ObserverMode};
use argmin::core::{
    CostFunction, Error as ArgminError, Executor, OptimizationResult, Solver, State, KV,
};
use argmin::solver::neldermead::NelderMead;
use argmin::solver::particleswarm::ParticleSwarm;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Search strategy used by [`ArgminOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMethod {
    /// Global stochastic search over the whole box.
    #[default]
    ParticleSwarm,
    /// Local simplex search started at the centre of the box.
    NelderMead,
}

/// How much optimizer progress is logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraceMode {
    Silent,
    #[default]
    Compact,
    Verbose,
}

/// Optimizer configuration.
///
/// Field names match the keys accepted when deserializing, e.g.
/// `{"method": "nelder_mead", "max_iterations": 500}`; missing keys take
/// their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerOptions {
    pub method: SearchMethod,
    /// Iteration budget; `None` leaves only `max_time` to stop the search.
    ///
    /// `false`, `0` and `null` all deserialize to `None`.
    #[serde(deserialize_with = "iteration_budget")]
    pub max_iterations: Option<u64>,
    /// Wall-clock budget in seconds.
    pub max_time: Option<f64>,
    /// Seconds between two progress log lines.
    pub trace_interval: f64,
    pub trace_mode: TraceMode,
    /// Number of particles for [`SearchMethod::ParticleSwarm`].
    pub population_size: usize,
}

/// Accepts a count or a boolean flag; falsy values disable the budget.
fn iteration_budget<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Budget {
        Flag(bool),
        Count(u64),
    }

    Ok(match Option::<Budget>::deserialize(deserializer)? {
        None | Some(Budget::Flag(false)) | Some(Budget::Count(0)) => None,
        Some(Budget::Flag(true)) => Some(DEFAULT_MAX_ITERATIONS),
        Some(Budget::Count(n)) => Some(n),
    })
}

impl Default for OptimizerOptions {
    fn default() -> Self {
        Self {
            method: SearchMethod::default(),
            max_iterations: Some(DEFAULT_MAX_ITERATIONS),
            max_time: None,
            trace_interval: DEFAULT_TRACE_INTERVAL,
            trace_mode: TraceMode::default(),
            population_size: DEFAULT_POPULATION_SIZE,
        }
    }
}

pub const DEFAULT_MAX_ITERATIONS: u64 = 1000;
pub const DEFAULT_TRACE_INTERVAL: f64 = 0.5;
pub const DEFAULT_POPULATION_SIZE: usize = 40;

/// Convergence tolerance on the spread of simplex costs.
const SIMPLEX_SD_TOLERANCE: f64 = 1e-8;

/// Initial simplex edge as a fraction of each box width.
const SIMPLEX_STEP_FRACTION: f64 = 0.1;

impl OptimizerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_method(mut self, method: SearchMethod) -> Self {
        self.method = method;
        self
    }

    /// `None` or `Some(0)` leaves the search without an iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.max_iterations = max_iterations.filter(|&n| n > 0);
        self
    }

    pub fn with_max_time(mut self, seconds: Option<f64>) -> Self {
        self.max_time = seconds;
        self
    }

    pub fn with_trace_interval(mut self, seconds: f64) -> Self {
        self.trace_interval = seconds;
        self
    }

    pub fn with_trace_mode(mut self, trace_mode: TraceMode) -> Self {
        self.trace_mode = trace_mode;
        self
    }

    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }
}

/// Best point found by an [`Optimizer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutcome {
    pub best: Vec<f64>,
    pub best_objective: f64,
    pub iterations: u64,
    pub termination: String,
}

/// Minimizes a scalar function over a box.
///
/// `objective` may be called from several threads at once.
pub trait Optimizer {
    fn minimize(
        &self,
        bounds: &[(f64, f64)],
        objective: &(dyn Fn(&[f64]) -> f64 + Sync),
    ) -> Result<OptimizationOutcome>;
}

/// [`Optimizer`] backed by the `argmin` solvers.
#[derive(Debug, Clone, Default)]
pub struct ArgminOptimizer {
    options: OptimizerOptions,
}

impl ArgminOptimizer {
    pub fn new(options: OptimizerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &OptimizerOptions {
        &self.options
    }

    fn particle_swarm(
        &self,
        problem: BoxProblem<'_>,
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationOutcome> {
        let lower: Vec<f64> = bounds.iter().map(|(min, _)| *min).collect();
        let upper: Vec<f64> = bounds.iter().map(|(_, max)| *max).collect();
        let solver = ParticleSwarm::new((lower, upper), self.options.population_size);

        let max_iterations = self.options.max_iterations;
        let executor = Executor::new(problem, solver).configure(|state| match max_iterations {
            Some(n) => state.max_iters(n),
            None => state,
        });
        let result = self.run(executor)?;
        let state = result.state();

        let (best, best_objective) = match &state.best_individual {
            Some(particle) => (particle.position.clone(), particle.cost),
            None => return Err(Error::Optimizer("particle swarm produced no candidate".into())),
        };

        Ok(OptimizationOutcome {
            best,
            best_objective,
            iterations: state.iter,
            termination: format!("{:?}", state.termination_status),
        })
    }

    fn nelder_mead(
        &self,
        problem: BoxProblem<'_>,
        bounds: &[(f64, f64)],
    ) -> Result<OptimizationOutcome> {
        let solver = NelderMead::new(initial_simplex(bounds))
            .with_sd_tolerance(SIMPLEX_SD_TOLERANCE)
            .map_err(|e| Error::Optimizer(e.to_string()))?;

        let max_iterations = self.options.max_iterations;
        let executor = Executor::new(problem, solver).configure(|state| match max_iterations {
            Some(n) => state.max_iters(n),
            None => state,
        });
        let result = self.run(executor)?;
        let state = result.state();

        let best = match &state.best_param {
            Some(best) => best.clone(),
            None => return Err(Error::Optimizer("simplex search produced no candidate".into())),
        };

        Ok(OptimizationOutcome {
            best,
            best_objective: state.best_cost,
            iterations: state.iter,
            termination: format!("{:?}", state.termination_status),
        })
    }

    /// Apply the time budget and progress logging, then run to completion.
    fn run<O, S, I>(&self, executor: Executor<O, S, I>) -> Result<OptimizationResult<O, S, I>>
    where
        S: Solver<O, I>,
        I: State<Float = f64>,
    {
        let mut executor = executor;
        if let Some(seconds) = self.options.max_time {
            executor = executor.timeout(Duration::from_secs_f64(seconds.max(0.0)));
        }
        if self.options.trace_mode != TraceMode::Silent {
            let observer = ProgressLog::new(
                Duration::from_secs_f64(self.options.trace_interval.max(0.0)),
                self.options.trace_mode == TraceMode::Verbose,
            );
            executor = executor.add_observer(observer, ObserverMode::Always);
        }
        executor.run().map_err(|e| Error::Optimizer(e.to_string()))
    }
}

impl From<OptimizerOptions> for ArgminOptimizer {
    fn from(options: OptimizerOptions) -> Self {
        Self::new(options)
    }
}

impl Optimizer for ArgminOptimizer {
    fn minimize(
        &self,
        bounds: &[(f64, f64)],
        objective: &(dyn Fn(&[f64]) -> f64 + Sync),
    ) -> Result<OptimizationOutcome> {
        check_bounds(bounds)?;
        if self.options.trace_mode == TraceMode::Verbose {
            info!(options = ?self.options, ?bounds, "optimizer starting");
        }

        let evaluations = AtomicUsize::new(0);
        let problem = BoxProblem {
            objective,
            evaluations: &evaluations,
        };

        let outcome = match self.options.method {
            SearchMethod::ParticleSwarm => self.particle_swarm(problem, bounds)?,
            SearchMethod::NelderMead => self.nelder_mead(problem, bounds)?,
        };

        debug!(
            method = ?self.options.method,
            iterations = outcome.iterations,
            evaluations = evaluations.load(Ordering::Relaxed),
            termination = %outcome.termination,
            "optimizer finished"
        );
        Ok(outcome)
    }
}

/// Reject boxes the solvers cannot sample or seed from.
fn check_bounds(bounds: &[(f64, f64)]) -> Result<()> {
    if bounds.is_empty() {
        return Err(Error::Optimizer("empty search space".into()));
    }
    for (i, &(min, max)) in bounds.iter().enumerate() {
        if !(min.is_finite() && max.is_finite() && min <= max) {
            return Err(Error::Optimizer(format!(
                "invalid bounds ({min}, {max}) for dimension {i}"
            )));
        }
    }
    Ok(())
}

/// Centre of the box plus one vertex stepped along each axis.
fn initial_simplex(bounds: &[(f64, f64)]) -> Vec<Vec<f64>> {
    let centre: Vec<f64> = bounds.iter().map(|(min, max)| 0.5 * (min + max)).collect();
    let mut vertices = vec![centre.clone()];
    for (i, (min, max)) in bounds.iter().enumerate() {
        let width = max - min;
        let step = if width > 0.0 {
            SIMPLEX_STEP_FRACTION * width
        } else {
            SIMPLEX_STEP_FRACTION * centre[i].abs().max(1.0)
        };
        let mut vertex = centre.clone();
        vertex[i] += step;
        vertices.push(vertex);
    }
    vertices
}

/// Borrowed objective exposed to argmin as a cost function.
struct BoxProblem<'a> {
    objective: &'a (dyn Fn(&[f64]) -> f64 + Sync),
    evaluations: &'a AtomicUsize,
}

impl CostFunction for BoxProblem<'_> {
    type Param = Vec<f64>;
    type Output = f64;

    fn cost(&self, param: &Self::Param) -> std::result::Result<Self::Output, ArgminError> {
        self.evaluations.fetch_add(1, Ordering::Relaxed);
        let cost = (self.objective)(param);
        // Simplex ordering cannot cope with NaN.
        Ok(if cost.is_finite() { cost } else { f64::INFINITY })
    }
}

/// Logs solver progress through `tracing`, at most once per interval.
struct ProgressLog {
    interval: Duration,
    verbose: bool,
    last: Option<Instant>,
}

impl ProgressLog {
    fn new(interval: Duration, verbose: bool) -> Self {
        Self {
            interval,
            verbose,
            last: None,
        }
    }
}

impl<I> Observe<I> for ProgressLog
where
    I: State<Float = f64>,
{
    fn observe_iter(&mut self, state: &I, _kv: &KV) -> std::result::Result<(), ArgminError> {
        let now = Instant::now();
        if let Some(last) = self.last {
            if now.duration_since(last) < self.interval {
                return Ok(());
            }
        }
        self.last = Some(now);

        let iteration = state.get_iter();
        let best = state.get_best_cost();
        if self.verbose {
            let evaluations = state.get_func_counts().get("cost_count").copied().unwrap_or(0);
            let elapsed = state.get_time().map(|d| d.as_secs_f64()).unwrap_or(0.0);
            info!(
                iteration,
                cost = state.get_cost(),
                best,
                evaluations,
                elapsed_s = elapsed,
                "optimizer progress"
            );
        } else {
            info!(iteration, best, "optimizer progress");
        }
        Ok(())
    }
}
