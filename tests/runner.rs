// Test intent: drives the runner through an in-test backend so the round-trip,
// timing and length invariants are checked whatever features are enabled.

use std::f64::consts::PI;

use fftbench::backend::stub::StubBackend;
use fftbench::bench::{run, run_backend, time_forward, BenchConfig, TimingTable, FFT_SIZE};
use fftbench::num::{inf_norm, zeroed};
use fftbench::{signal, BackendKind, BenchError, Complex64, FftBackend};

/// Direct O(n^2) DFT standing in for a real library.
struct DirectDft {
    input: Vec<Complex64>,
    output: Vec<Complex64>,
    syncs: usize,
    released: bool,
}

impl DirectDft {
    fn new() -> Self {
        Self {
            input: Vec::new(),
            output: Vec::new(),
            syncs: 0,
            released: false,
        }
    }
}

fn dft(data: &[Complex64], sign: f64) -> Vec<Complex64> {
    let n = data.len();
    (0..n)
        .map(|k| {
            data.iter()
                .enumerate()
                .map(|(j, x)| {
                    let angle = sign * 2.0 * PI * (j * k) as f64 / n as f64;
                    x * Complex64::from_polar(1.0, angle)
                })
                .sum()
        })
        .collect()
}

impl FftBackend for DirectDft {
    fn kind(&self) -> BackendKind {
        BackendKind::RustFft
    }

    fn allocate(&mut self, len: usize) -> Result<(), BenchError> {
        self.input = zeroed(len);
        self.output = zeroed(len);
        Ok(())
    }

    fn copy_in(&mut self, host: &[Complex64]) -> Result<(), BenchError> {
        if host.len() != self.input.len() {
            return Err(BenchError::MismatchedLengths {
                expected: self.input.len(),
                actual: host.len(),
            });
        }
        self.input.copy_from_slice(host);
        Ok(())
    }

    fn synchronize(&mut self) -> Result<(), BenchError> {
        self.syncs += 1;
        Ok(())
    }

    fn execute_forward(&mut self) -> Result<(), BenchError> {
        self.output = dft(&self.input, -1.0);
        Ok(())
    }

    fn execute_inverse(&mut self) -> Result<(), BenchError> {
        self.output = dft(&self.output, 1.0);
        Ok(())
    }

    fn copy_out(&mut self, host: &mut [Complex64]) -> Result<(), BenchError> {
        host.copy_from_slice(&self.output);
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Fails on the first forward call.
struct Broken;

impl FftBackend for Broken {
    fn kind(&self) -> BackendKind {
        BackendKind::CuFft
    }
    fn allocate(&mut self, _len: usize) -> Result<(), BenchError> {
        Ok(())
    }
    fn copy_in(&mut self, _host: &[Complex64]) -> Result<(), BenchError> {
        Ok(())
    }
    fn execute_forward(&mut self) -> Result<(), BenchError> {
        Err(BenchError::Cufft {
            call: "cufftExecZ2Z",
            status: "CUFFT_EXEC_FAILED".into(),
        })
    }
    fn execute_inverse(&mut self) -> Result<(), BenchError> {
        Ok(())
    }
    fn copy_out(&mut self, _host: &mut [Complex64]) -> Result<(), BenchError> {
        Ok(())
    }
    fn release(&mut self) {}
}

#[test]
fn roundtrip_error_is_below_tolerance() {
    let input = signal::generate(FFT_SIZE, 1234);
    let mut table = TimingTable::new(5);
    let mut backend = DirectDft::new();
    let run = run_backend(&mut backend, &input, &mut table).unwrap();
    assert!(run.functional);
    assert!(run.error < 1e-9, "error {}", run.error);
    assert_eq!(run.forward.len(), input.len());
    assert_eq!(run.inverse.len(), input.len());
    assert!(backend.released);
}

#[test]
fn forward_output_holds_dc_sum() {
    let input = signal::generate(FFT_SIZE, 1234);
    let mut table = TimingTable::new(1);
    let run = run_backend(&mut DirectDft::new(), &input, &mut table).unwrap();
    let sum: Complex64 = input.iter().sum();
    assert!((run.forward[0] - sum).norm() < 1e-12);
}

#[test]
fn timings_fill_only_the_backend_column() {
    let input = signal::generate(FFT_SIZE, 1234);
    let mut table = TimingTable::new(4);
    run_backend(&mut DirectDft::new(), &input, &mut table).unwrap();
    assert!(table.column(BackendKind::RustFft).iter().all(|&t| t >= 0.0));
    for kind in BackendKind::ALL {
        if kind != BackendKind::RustFft {
            assert!(table.column(kind).iter().all(|&t| t == 0.0));
        }
    }
}

#[test]
fn every_forward_call_is_fenced() {
    let mut backend = DirectDft::new();
    backend.allocate(FFT_SIZE).unwrap();
    let mut samples = vec![0.0; 3];
    time_forward(&mut backend, &mut samples).unwrap();
    assert_eq!(backend.syncs, 6);
    assert!(samples.iter().all(|&t| t >= 0.0));
}

#[test]
fn placeholder_backend_keeps_zero_column() {
    let input = signal::generate(FFT_SIZE, 1234);
    let mut table = TimingTable::new(5);
    let mut stub = StubBackend::new(BackendKind::VkFft);
    let run = run_backend(&mut stub, &input, &mut table).unwrap();
    assert!(!run.functional);
    assert!(table.all_zero());
    assert_eq!(run.error, inf_norm(&input));
}

#[test]
fn failing_backend_propagates_error() {
    let input = signal::generate(FFT_SIZE, 1234);
    let mut table = TimingTable::new(2);
    let err = run_backend(&mut Broken, &input, &mut table).unwrap_err();
    assert!(matches!(err, BenchError::Cufft { .. }));
}

#[test]
fn failing_backend_aborts_the_run() {
    let mut backends: Vec<Box<dyn FftBackend>> =
        vec![Box::new(DirectDft::new()), Box::new(Broken)];
    let err = run(&BenchConfig::default(), &mut backends).unwrap_err();
    assert!(matches!(err, BenchError::Cufft { call: "cufftExecZ2Z", .. }));
}

#[test]
fn empty_registry_runs_host_only_pass() {
    let cfg = BenchConfig::default();
    let report = run(&cfg, &mut []).unwrap();
    assert_eq!(report.runs.len(), 1);
    assert_eq!(report.runs[0].kind, None);
    assert!(report.timings.all_zero());
    assert_eq!(report.timings.iterations(), 5);
    assert!(report.failures().is_empty());
}

#[test]
fn report_collects_each_backend() {
    let cfg = BenchConfig {
        iterations: 3,
        ..BenchConfig::default()
    };
    let mut backends: Vec<Box<dyn FftBackend>> = vec![
        Box::new(StubBackend::new(BackendKind::RocFft)),
        Box::new(DirectDft::new()),
    ];
    let report = run(&cfg, &mut backends).unwrap();
    assert_eq!(report.runs.len(), 2);
    assert_eq!(report.size, FFT_SIZE);
    assert_eq!(report.input, signal::generate(FFT_SIZE, 1234));
    assert!(report.failures().is_empty());
    assert!(report.timings.column(BackendKind::RocFft).iter().all(|&t| t == 0.0));
}

#[test]
fn zero_iterations_are_rejected() {
    let cfg = BenchConfig {
        iterations: 0,
        ..BenchConfig::default()
    };
    assert!(matches!(
        run(&cfg, &mut []),
        Err(BenchError::InvalidConfig(_))
    ));
}
