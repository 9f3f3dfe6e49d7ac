//! FFT backends and the compile-time registry.
//!
//! Each backend owns its device (or host) buffers and its transform plan. The
//! runner drives them through the same sequence: [`FftBackend::allocate`],
//! [`FftBackend::copy_in`], repeated [`FftBackend::execute_forward`] between
//! [`FftBackend::synchronize`] barriers, [`FftBackend::copy_out`],
//! [`FftBackend::execute_inverse`], [`FftBackend::copy_out`] and finally
//! [`FftBackend::release`].
//!
//! Which backends exist is decided by Cargo features (`cufft`, `rocfft`,
//! `vkfft`, `fftw`, `rustfft`); [`compiled`] returns one instance of each.

use core::fmt;
use core::str::FromStr;

use crate::error::BenchError;
use crate::num::Complex64;

#[cfg(feature = "cufft")]
pub mod cufft;
#[cfg(feature = "cufft")]
pub mod cufft_sys;
#[cfg(feature = "fftw")]
pub mod fftw_cpu;
#[cfg(feature = "rustfft")]
pub mod rustfft_cpu;
pub mod stub;

/// Backend identity; also the column order of the timing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BackendKind {
    CuFft,
    RocFft,
    VkFft,
    Fftw,
    RustFft,
}

impl BackendKind {
    /// Every column of the timing table, compiled in or not.
    pub const ALL: [BackendKind; 5] = [
        BackendKind::CuFft,
        BackendKind::RocFft,
        BackendKind::VkFft,
        BackendKind::Fftw,
        BackendKind::RustFft,
    ];

    /// Column header label.
    pub fn label(self) -> &'static str {
        match self {
            BackendKind::CuFft => "cuFFT",
            BackendKind::RocFft => "rocFFT",
            BackendKind::VkFft => "vkFFT",
            BackendKind::Fftw => "FFTW",
            BackendKind::RustFft => "RustFFT",
        }
    }

    /// Cargo feature that enables this backend.
    pub fn feature(self) -> &'static str {
        match self {
            BackendKind::CuFft => "cufft",
            BackendKind::RocFft => "rocfft",
            BackendKind::VkFft => "vkfft",
            BackendKind::Fftw => "fftw",
            BackendKind::RustFft => "rustfft",
        }
    }

    /// Whether this build includes the backend.
    pub fn is_compiled(self) -> bool {
        match self {
            BackendKind::CuFft => cfg!(feature = "cufft"),
            BackendKind::RocFft => cfg!(feature = "rocfft"),
            BackendKind::VkFft => cfg!(feature = "vkfft"),
            BackendKind::Fftw => cfg!(feature = "fftw"),
            BackendKind::RustFft => cfg!(feature = "rustfft"),
        }
    }

    /// Position in the timing table.
    pub fn column(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BackendKind {
    type Err = BenchError;

    /// Accepts the feature name or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BackendKind::ALL
            .into_iter()
            .find(|k| {
                k.feature().eq_ignore_ascii_case(wanted) || k.label().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| BenchError::UnknownBackend(s.to_string()))
    }
}

/// Operations every benchmarked FFT library has to provide.
///
/// Buffers are owned by the implementation; the host side only ever sees
/// `copy_in`/`copy_out`. Transforms are unnormalized in both directions.
pub trait FftBackend {
    fn kind(&self) -> BackendKind;

    /// `false` for placeholders that accept every call but transform nothing.
    fn is_functional(&self) -> bool {
        true
    }

    /// Allocate input/output buffers of `len` samples and build the plan.
    fn allocate(&mut self, len: usize) -> Result<(), BenchError>;

    /// Copy `host` into the input buffer.
    fn copy_in(&mut self, host: &[Complex64]) -> Result<(), BenchError>;

    /// Block until previously issued work has finished.
    fn synchronize(&mut self) -> Result<(), BenchError> {
        Ok(())
    }

    /// Input buffer -> output buffer.
    fn execute_forward(&mut self) -> Result<(), BenchError>;

    /// Inverse transform of the output buffer, in place.
    fn execute_inverse(&mut self) -> Result<(), BenchError>;

    /// Copy the output buffer into `host`.
    fn copy_out(&mut self, host: &mut [Complex64]) -> Result<(), BenchError>;

    /// Free buffers and plan. Calling it twice is harmless.
    fn release(&mut self);
}

/// Fail with [`BenchError::MismatchedLengths`] unless `actual == expected`.
pub(crate) fn check_len(expected: usize, actual: usize) -> Result<(), BenchError> {
    if expected == actual {
        Ok(())
    } else {
        Err(BenchError::MismatchedLengths { expected, actual })
    }
}

/// Instantiate `kind`, or fail if this build does not include it.
pub fn create(kind: BackendKind) -> Result<Box<dyn FftBackend>, BenchError> {
    match kind {
        #[cfg(feature = "cufft")]
        BackendKind::CuFft => Ok(Box::new(cufft::CuFftBackend::new())),
        #[cfg(feature = "rocfft")]
        BackendKind::RocFft => Ok(Box::new(stub::StubBackend::new(BackendKind::RocFft))),
        #[cfg(feature = "vkfft")]
        BackendKind::VkFft => Ok(Box::new(stub::StubBackend::new(BackendKind::VkFft))),
        #[cfg(feature = "fftw")]
        BackendKind::Fftw => Ok(Box::new(fftw_cpu::FftwBackend::new())),
        #[cfg(feature = "rustfft")]
        BackendKind::RustFft => Ok(Box::new(rustfft_cpu::RustFftBackend::new())),
        #[allow(unreachable_patterns)]
        other => Err(BenchError::UnknownBackend(other.feature().to_string())),
    }
}

/// Kinds included in this build, in column order.
pub fn compiled_kinds() -> Vec<BackendKind> {
    BackendKind::ALL
        .into_iter()
        .filter(|k| k.is_compiled())
        .collect()
}

/// One instance of every backend included in this build.
pub fn compiled() -> Vec<Box<dyn FftBackend>> {
    compiled_kinds()
        .into_iter()
        .filter_map(|k| create(k).ok())
        .collect()
}

/// Instances of the requested kinds; an empty request means all compiled.
pub fn select(kinds: &[BackendKind]) -> Result<Vec<Box<dyn FftBackend>>, BenchError> {
    if kinds.is_empty() {
        return Ok(compiled());
    }
    let mut wanted = kinds.to_vec();
    wanted.sort();
    wanted.dedup();
    wanted.into_iter().map(create).collect()
}
