//! Pure-Rust CPU backend built on `rustfft`.
//!
//! Host memory doubles as "device" memory. The forward transform is
//! out-of-place from the caller's view: the input buffer is copied into the
//! output buffer and transformed there, so the input survives every timed
//! iteration unchanged.

use std::sync::Arc;

use log::debug;
use rustfft::{Fft, FftPlanner};

use super::{check_len, BackendKind, FftBackend};
use crate::error::BenchError;
use crate::num::{zeroed, Complex64};

struct Plan {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

pub struct RustFftBackend {
    planner: FftPlanner<f64>,
    plan: Option<Plan>,
    input: Vec<Complex64>,
    output: Vec<Complex64>,
}

impl Default for RustFftBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RustFftBackend {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            plan: None,
            input: Vec::new(),
            output: Vec::new(),
        }
    }
}

impl FftBackend for RustFftBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::RustFft
    }

    fn allocate(&mut self, len: usize) -> Result<(), BenchError> {
        if len == 0 {
            return Err(BenchError::EmptyInput);
        }
        let forward = self.planner.plan_fft_forward(len);
        let inverse = self.planner.plan_fft_inverse(len);
        let scratch_len = forward
            .get_inplace_scratch_len()
            .max(inverse.get_inplace_scratch_len());
        debug!("rustfft: planned length {len}, scratch {scratch_len}");
        self.plan = Some(Plan {
            forward,
            inverse,
            scratch: zeroed(scratch_len),
        });
        self.input = zeroed(len);
        self.output = zeroed(len);
        Ok(())
    }

    fn copy_in(&mut self, host: &[Complex64]) -> Result<(), BenchError> {
        if self.plan.is_none() {
            return Err(BenchError::NotAllocated);
        }
        check_len(self.input.len(), host.len())?;
        self.input.copy_from_slice(host);
        Ok(())
    }

    fn execute_forward(&mut self) -> Result<(), BenchError> {
        let plan = self.plan.as_mut().ok_or(BenchError::NotAllocated)?;
        self.output.copy_from_slice(&self.input);
        plan.forward
            .process_with_scratch(&mut self.output, &mut plan.scratch);
        Ok(())
    }

    fn execute_inverse(&mut self) -> Result<(), BenchError> {
        let plan = self.plan.as_mut().ok_or(BenchError::NotAllocated)?;
        plan.inverse
            .process_with_scratch(&mut self.output, &mut plan.scratch);
        Ok(())
    }

    fn copy_out(&mut self, host: &mut [Complex64]) -> Result<(), BenchError> {
        if self.plan.is_none() {
            return Err(BenchError::NotAllocated);
        }
        check_len(self.output.len(), host.len())?;
        host.copy_from_slice(&self.output);
        Ok(())
    }

    fn release(&mut self) {
        self.plan = None;
        self.input = Vec::new();
        self.output = Vec::new();
    }
}
