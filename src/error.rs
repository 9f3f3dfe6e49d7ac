//! Error type shared by every backend and the benchmark runner.

use core::fmt;

/// Failures reported by backends, the runner and configuration parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BenchError {
    /// A transform of length zero was requested.
    EmptyInput,
    /// A host slice does not match the length of the device buffer.
    MismatchedLengths { expected: usize, actual: usize },
    /// A buffer operation was attempted before `allocate`.
    NotAllocated,
    /// A configuration value could not be used.
    InvalidConfig(String),
    /// A CUDA runtime call returned a non-zero `cudaError_t`.
    Cuda { call: &'static str, code: i32 },
    /// A cuFFT call returned a status other than `CUFFT_SUCCESS`.
    Cufft { call: &'static str, status: String },
    /// FFTW failed to plan or execute.
    Fftw(String),
    /// A backend name that is unknown or not compiled in.
    UnknownBackend(String),
}

impl fmt::Display for BenchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BenchError::EmptyInput => write!(f, "transform length must be non-zero"),
            BenchError::MismatchedLengths { expected, actual } => write!(
                f,
                "buffer length mismatch: expected {expected} elements, got {actual}"
            ),
            BenchError::NotAllocated => write!(f, "backend buffers are not allocated"),
            BenchError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            BenchError::Cuda { call, code } => write!(f, "{call} failed with cudaError {code}"),
            BenchError::Cufft { call, status } => write!(f, "{call} failed: {status}"),
            BenchError::Fftw(msg) => write!(f, "fftw: {msg}"),
            BenchError::UnknownBackend(name) => {
                write!(f, "backend `{name}` is unknown or not compiled in")
            }
        }
    }
}

impl std::error::Error for BenchError {}
