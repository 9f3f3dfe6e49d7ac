//! Benchmark configuration and the timed round-trip runner.

use std::time::Instant;

use log::{debug, error, info, warn};

use crate::backend::{BackendKind, FftBackend};
use crate::error::BenchError;
use crate::num::{roundtrip_error, zeroed, Complex64};
use crate::signal;

/// Number of samples transformed. The benchmark does not vary it.
pub const FFT_SIZE: usize = 6;
pub const DEFAULT_ITERATIONS: usize = 5;
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

pub const ENV_ITERATIONS: &str = "FFTBENCH_ITERATIONS";
pub const ENV_SEED: &str = "FFTBENCH_SEED";

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Timed forward calls per backend.
    pub iterations: usize,
    pub seed: u64,
    /// Largest acceptable round-trip error for a functional backend.
    pub tolerance: f64,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: signal::DEFAULT_SEED,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

fn parse_var<T: core::str::FromStr>(name: &str, value: &str) -> Result<T, BenchError> {
    value
        .trim()
        .parse()
        .map_err(|_| BenchError::InvalidConfig(format!("{name}={value:?} is not a valid number")))
}

impl BenchConfig {
    /// Defaults overridden by `FFTBENCH_ITERATIONS` and `FFTBENCH_SEED`.
    pub fn from_env() -> Result<Self, BenchError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`BenchConfig::from_env`] but reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, BenchError> {
        let mut cfg = Self::default();
        if let Some(v) = lookup(ENV_ITERATIONS) {
            cfg.iterations = parse_var(ENV_ITERATIONS, &v)?;
        }
        if let Some(v) = lookup(ENV_SEED) {
            cfg.seed = parse_var(ENV_SEED, &v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), BenchError> {
        if self.iterations == 0 {
            return Err(BenchError::InvalidConfig(
                "iterations must be at least 1".into(),
            ));
        }
        if !(self.tolerance.is_finite() && self.tolerance >= 0.0) {
            return Err(BenchError::InvalidConfig(format!(
                "tolerance {} must be a finite non-negative number",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Elapsed seconds per iteration for every backend column.
///
/// Columns of backends that did not run stay at `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimingTable {
    columns: Vec<Vec<f64>>,
}

impl TimingTable {
    pub fn new(iterations: usize) -> Self {
        Self {
            columns: vec![vec![0.0; iterations]; BackendKind::ALL.len()],
        }
    }

    pub fn iterations(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn column(&self, kind: BackendKind) -> &[f64] {
        &self.columns[kind.column()]
    }

    pub fn column_mut(&mut self, kind: BackendKind) -> &mut [f64] {
        &mut self.columns[kind.column()]
    }

    /// Row `i` across all columns, in [`BackendKind::ALL`] order.
    pub fn row(&self, i: usize) -> Vec<f64> {
        self.columns.iter().map(|c| c[i]).collect()
    }

    pub fn all_zero(&self) -> bool {
        self.columns.iter().flatten().all(|&t| t == 0.0)
    }
}

/// Outcome of one backend's round trip.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRun {
    /// `None` for the host-only pass used when no backend is compiled in.
    pub kind: Option<BackendKind>,
    pub functional: bool,
    /// Output buffer after the forward transforms.
    pub forward: Vec<Complex64>,
    /// Output buffer after the inverse transform.
    pub inverse: Vec<Complex64>,
    /// `max |x - inverse / n|`
    pub error: f64,
}

impl BackendRun {
    pub fn label(&self) -> &'static str {
        self.kind.map_or("none", BackendKind::label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub config: BenchConfig,
    pub size: usize,
    pub input: Vec<Complex64>,
    pub runs: Vec<BackendRun>,
    pub timings: TimingTable,
}

impl Report {
    /// Functional runs whose error exceeds the configured tolerance.
    pub fn failures(&self) -> Vec<&BackendRun> {
        self.runs
            .iter()
            .filter(|r| r.functional && (r.error.is_nan() || r.error > self.config.tolerance))
            .collect()
    }
}

/// Time `samples.len()` forward transforms, synchronizing around each call.
pub fn time_forward(backend: &mut dyn FftBackend, samples: &mut [f64]) -> Result<(), BenchError> {
    for (i, slot) in samples.iter_mut().enumerate() {
        let start = Instant::now();
        backend.synchronize()?;
        backend.execute_forward()?;
        backend.synchronize()?;
        *slot = start.elapsed().as_secs_f64();
        debug!("{}: iteration {i} took {:.3e} s", backend.kind(), *slot);
    }
    Ok(())
}

fn round_trip(
    backend: &mut dyn FftBackend,
    input: &[Complex64],
    timings: &mut TimingTable,
) -> Result<BackendRun, BenchError> {
    let kind = backend.kind();
    let functional = backend.is_functional();
    backend.allocate(input.len())?;
    backend.copy_in(input)?;

    if functional {
        time_forward(backend, timings.column_mut(kind))?;
    } else {
        warn!("{kind} has no transform implementation; its timings stay at 0");
    }

    let mut output = zeroed(input.len());
    backend.copy_out(&mut output)?;
    let forward = output.clone();

    if functional {
        backend.execute_inverse()?;
        backend.synchronize()?;
    }
    backend.copy_out(&mut output)?;

    let error = roundtrip_error(input, &output, input.len() as f64)?;
    Ok(BackendRun {
        kind: Some(kind),
        functional,
        forward,
        inverse: output,
        error,
    })
}

/// Allocate, copy in, time the forward transform, run the inverse, copy back
/// and measure the round-trip error. Backend resources are released even
/// when a step fails.
pub fn run_backend(
    backend: &mut dyn FftBackend,
    input: &[Complex64],
    timings: &mut TimingTable,
) -> Result<BackendRun, BenchError> {
    let result = round_trip(backend, input, timings);
    backend.release();
    let run = result.inspect_err(|e| error!("{}: {e}", backend.kind()))?;
    info!(
        "{}: error {:.3e}, min {:.3e} s over {} iterations",
        run.label(),
        run.error,
        timings
            .column(backend.kind())
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min),
        timings.iterations()
    );
    Ok(run)
}

/// The pass used when no backend is compiled in: nothing is transformed and
/// the output buffer stays zero.
pub fn host_only(input: &[Complex64]) -> Result<BackendRun, BenchError> {
    let output = zeroed(input.len());
    let error = roundtrip_error(input, &output, input.len() as f64)?;
    Ok(BackendRun {
        kind: None,
        functional: false,
        forward: output.clone(),
        inverse: output,
        error,
    })
}

/// Generate the input signal and run every backend in order.
pub fn run(
    config: &BenchConfig,
    backends: &mut [Box<dyn FftBackend>],
) -> Result<Report, BenchError> {
    config.validate()?;
    let input = signal::generate(FFT_SIZE, config.seed);
    debug!(
        "input: {FFT_SIZE} samples, seed {}, digest {}",
        config.seed,
        signal::digest(&input)
    );
    let mut timings = TimingTable::new(config.iterations);

    let runs = if backends.is_empty() {
        warn!("no FFT backend compiled in; enable one of the backend features");
        vec![host_only(&input)?]
    } else {
        backends
            .iter_mut()
            .map(|b| run_backend(b.as_mut(), &input, &mut timings))
            .collect::<Result<Vec<_>, _>>()?
    };

    Ok(Report {
        config: config.clone(),
        size: FFT_SIZE,
        input,
        runs,
        timings,
    })
}
