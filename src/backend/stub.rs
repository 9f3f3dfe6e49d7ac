//! Placeholder backends.
//!
//! rocFFT and vkFFT have no transform implementation here: the backend accepts
//! every call, keeps a zeroed host-side output buffer and does nothing else.
//! The runner sees `is_functional() == false` and skips the timing loop, so
//! their columns stay at `0`.

use log::debug;

use super::{check_len, BackendKind, FftBackend};
use crate::error::BenchError;
use crate::num::{zeroed, Complex64};

pub struct StubBackend {
    kind: BackendKind,
    output: Vec<Complex64>,
}

impl StubBackend {
    pub fn new(kind: BackendKind) -> Self {
        Self {
            kind,
            output: Vec::new(),
        }
    }

    // allocate rejects zero lengths, so an empty buffer means unallocated
    fn allocated(&self) -> Result<(), BenchError> {
        if self.output.is_empty() {
            Err(BenchError::NotAllocated)
        } else {
            Ok(())
        }
    }
}

impl FftBackend for StubBackend {
    fn kind(&self) -> BackendKind {
        self.kind
    }

    fn is_functional(&self) -> bool {
        false
    }

    fn allocate(&mut self, len: usize) -> Result<(), BenchError> {
        if len == 0 {
            return Err(BenchError::EmptyInput);
        }
        debug!("{}: placeholder allocation of {len} samples", self.kind);
        self.output = zeroed(len);
        Ok(())
    }

    fn copy_in(&mut self, host: &[Complex64]) -> Result<(), BenchError> {
        self.allocated()?;
        check_len(self.output.len(), host.len())
    }

    fn execute_forward(&mut self) -> Result<(), BenchError> {
        Ok(())
    }

    fn execute_inverse(&mut self) -> Result<(), BenchError> {
        Ok(())
    }

    fn copy_out(&mut self, host: &mut [Complex64]) -> Result<(), BenchError> {
        self.allocated()?;
        check_len(self.output.len(), host.len())?;
        host.copy_from_slice(&self.output);
        Ok(())
    }

    fn release(&mut self) {
        self.output = Vec::new();
    }
}
