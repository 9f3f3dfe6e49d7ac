//! # fftbench - FFT backend micro-benchmark
//!
//! Times the forward discrete Fourier transform of a small, fixed-size
//! complex double-precision signal across several FFT libraries and reports
//! per-iteration wall-clock time plus the round-trip error of a forward and
//! inverse transform.
//!
//! No FFT is implemented here. Every transform is delegated to the library
//! behind a [`backend::FftBackend`].
//!
//! ## Cargo Features
//!
//! Backends are selected at build time; features are additive and every
//! enabled backend gets its own column in the timing table.
//!
//! - `cufft`: NVIDIA cuFFT through the CUDA runtime (needs the CUDA toolkit)
//! - `fftw`: FFTW3 via the `fftw` crate
//! - `rustfft`: pure-Rust CPU reference
//! - `rocfft`, `vkfft`: placeholders that report zero timings
//!
//! With no backend feature the benchmark still runs: nothing is transformed,
//! every timing is `0` and the reported error is the largest input magnitude.
//!
//! ## Example
//!
//! ```bash
//! cargo run --release --features rustfft
//! RUST_LOG=debug cargo run --release --features "rustfft fftw" -- --json out.json
//! ```
//!
//! ## License
//!
//! Licensed under either of
//! - Apache License, Version 2.0 (https://www.apache.org/licenses/LICENSE-2.0)
//! - MIT license (https://opensource.org/licenses/MIT)
//!
//! at your option.

/// FFT library backends and the compile-time registry.
pub mod backend;

/// Benchmark configuration and the timed round-trip runner.
pub mod bench;

pub mod error;

/// Complex sample type and error metrics.
pub mod num;

pub mod report;

/// Seeded input signal generation.
pub mod signal;

pub use backend::{BackendKind, FftBackend};
pub use bench::{run, BenchConfig, Report, FFT_SIZE};
pub use error::BenchError;
pub use num::Complex64;
