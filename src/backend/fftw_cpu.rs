//! FFTW CPU reference backend.
//!
//! Plans are out-of-place, so the in-place inverse stages the output through
//! an aligned scratch buffer before executing.

use fftw::array::AlignedVec;
use fftw::plan::{C2CPlan, C2CPlan64};
use fftw::types::{c64, Flag, Sign};
use log::debug;

use super::{check_len, BackendKind, FftBackend};
use crate::error::BenchError;
use crate::num::Complex64;

struct Buffers {
    forward: C2CPlan64,
    inverse: C2CPlan64,
    input: AlignedVec<c64>,
    output: AlignedVec<c64>,
    scratch: AlignedVec<c64>,
}

#[derive(Default)]
pub struct FftwBackend {
    buffers: Option<Buffers>,
}

impl FftwBackend {
    pub fn new() -> Self {
        Self { buffers: None }
    }

    fn buffers(&mut self) -> Result<&mut Buffers, BenchError> {
        self.buffers.as_mut().ok_or(BenchError::NotAllocated)
    }
}

fn plan(len: usize, sign: Sign) -> Result<C2CPlan64, BenchError> {
    C2CPlan::aligned(&[len], sign, Flag::ESTIMATE).map_err(|e| BenchError::Fftw(e.to_string()))
}

impl FftBackend for FftwBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Fftw
    }

    fn allocate(&mut self, len: usize) -> Result<(), BenchError> {
        if len == 0 {
            return Err(BenchError::EmptyInput);
        }
        let forward = plan(len, Sign::Forward)?;
        let inverse = plan(len, Sign::Backward)?;
        debug!("fftw: planned length {len}");
        self.buffers = Some(Buffers {
            forward,
            inverse,
            input: AlignedVec::new(len),
            output: AlignedVec::new(len),
            scratch: AlignedVec::new(len),
        });
        Ok(())
    }

    fn copy_in(&mut self, host: &[Complex64]) -> Result<(), BenchError> {
        let b = self.buffers()?;
        check_len(b.input.len(), host.len())?;
        b.input.copy_from_slice(host);
        Ok(())
    }

    fn execute_forward(&mut self) -> Result<(), BenchError> {
        let b = self.buffers()?;
        // ESTIMATE plans leave the input intact for 1-D complex transforms
        b.forward
            .c2c(&mut b.input, &mut b.output)
            .map_err(|e| BenchError::Fftw(e.to_string()))
    }

    fn execute_inverse(&mut self) -> Result<(), BenchError> {
        let b = self.buffers()?;
        b.scratch.copy_from_slice(&b.output);
        b.inverse
            .c2c(&mut b.scratch, &mut b.output)
            .map_err(|e| BenchError::Fftw(e.to_string()))
    }

    fn copy_out(&mut self, host: &mut [Complex64]) -> Result<(), BenchError> {
        let b = self.buffers()?;
        check_len(b.output.len(), host.len())?;
        host.copy_from_slice(&b.output);
        Ok(())
    }

    fn release(&mut self) {
        self.buffers = None;
    }
}
