//! NVIDIA cuFFT backend.
//!
//! Two device buffers are allocated with `cudaMalloc`; the forward transform
//! runs out-of-place from the input to the output buffer and the inverse runs
//! in place on the output buffer. Every runtime and cuFFT status is checked.

use std::ffi::c_void;
use std::mem;
use std::ptr;

use log::{debug, warn};

use super::cufft_sys::{
    check, check_cufft, cudaDeviceSynchronize, cudaFree, cudaMalloc, cudaMemcpy, cudaMemcpyKind,
    cufftDestroy, cufftDoubleComplex, cufftExecZ2Z, cufftHandle, cufftPlan1d, CUFFT_FORWARD,
    CUFFT_INVERSE, CUFFT_Z2Z,
};
use super::{check_len, BackendKind, FftBackend};
use crate::error::BenchError;
use crate::num::Complex64;

const _: () = assert!(mem::size_of::<Complex64>() == mem::size_of::<cufftDoubleComplex>());

pub struct CuFftBackend {
    len: usize,
    plan: Option<cufftHandle>,
    d_in: *mut cufftDoubleComplex,
    d_out: *mut cufftDoubleComplex,
}

impl Default for CuFftBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CuFftBackend {
    pub fn new() -> Self {
        Self {
            len: 0,
            plan: None,
            d_in: ptr::null_mut(),
            d_out: ptr::null_mut(),
        }
    }

    fn bytes(&self) -> usize {
        self.len * mem::size_of::<cufftDoubleComplex>()
    }

    fn plan(&self) -> Result<cufftHandle, BenchError> {
        self.plan.ok_or(BenchError::NotAllocated)
    }
}

fn device_alloc(bytes: usize) -> Result<*mut cufftDoubleComplex, BenchError> {
    let mut raw: *mut c_void = ptr::null_mut();
    // SAFETY: `raw` is a valid out-pointer; cudaMalloc writes a device address into it.
    check("cudaMalloc", unsafe { cudaMalloc(&mut raw, bytes) })?;
    Ok(raw.cast())
}

impl FftBackend for CuFftBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::CuFft
    }

    fn allocate(&mut self, len: usize) -> Result<(), BenchError> {
        if len == 0 {
            return Err(BenchError::EmptyInput);
        }
        let nx = i32::try_from(len)
            .map_err(|_| BenchError::InvalidConfig(format!("length {len} exceeds cuFFT range")))?;
        self.release();
        self.len = len;
        let bytes = self.bytes();
        self.d_in = device_alloc(bytes)?;
        self.d_out = device_alloc(bytes)?;
        let mut handle: cufftHandle = 0;
        // SAFETY: `handle` is a valid out-pointer for the plan handle.
        let status = unsafe { cufftPlan1d(&mut handle, nx, CUFFT_Z2Z, 1) };
        check_cufft("cufftPlan1d", status)?;
        self.plan = Some(handle);
        debug!("cufft: allocated 2 x {bytes} bytes, plan {handle}");
        Ok(())
    }

    fn copy_in(&mut self, host: &[Complex64]) -> Result<(), BenchError> {
        self.plan()?;
        check_len(self.len, host.len())?;
        // SAFETY: `d_in` holds `len` elements and `host` was checked to match;
        // Complex64 and cufftDoubleComplex share a `[f64; 2]` layout.
        check("cudaMemcpy", unsafe {
            cudaMemcpy(
                self.d_in.cast(),
                host.as_ptr().cast(),
                self.bytes(),
                cudaMemcpyKind::HostToDevice,
            )
        })
    }

    fn synchronize(&mut self) -> Result<(), BenchError> {
        // SAFETY: no arguments; blocks until the device is idle.
        check("cudaDeviceSynchronize", unsafe { cudaDeviceSynchronize() })
    }

    fn execute_forward(&mut self) -> Result<(), BenchError> {
        let plan = self.plan()?;
        // SAFETY: both device buffers were allocated for the planned length.
        let status = unsafe { cufftExecZ2Z(plan, self.d_in, self.d_out, CUFFT_FORWARD) };
        check_cufft("cufftExecZ2Z", status)
    }

    fn execute_inverse(&mut self) -> Result<(), BenchError> {
        let plan = self.plan()?;
        // SAFETY: in-place execution on a buffer of the planned length.
        let status = unsafe { cufftExecZ2Z(plan, self.d_out, self.d_out, CUFFT_INVERSE) };
        check_cufft("cufftExecZ2Z", status)
    }

    fn copy_out(&mut self, host: &mut [Complex64]) -> Result<(), BenchError> {
        self.plan()?;
        check_len(self.len, host.len())?;
        // SAFETY: see `copy_in`; the copy is synchronous with respect to the host.
        check("cudaMemcpy", unsafe {
            cudaMemcpy(
                host.as_mut_ptr().cast(),
                self.d_out.cast_const().cast(),
                self.bytes(),
                cudaMemcpyKind::DeviceToHost,
            )
        })
    }

    fn release(&mut self) {
        if let Some(plan) = self.plan.take() {
            // SAFETY: `plan` came from cufftPlan1d and is destroyed once.
            let status = unsafe { cufftDestroy(plan) };
            if let Err(e) = check_cufft("cufftDestroy", status) {
                warn!("{e}");
            }
        }
        for buf in [&mut self.d_in, &mut self.d_out] {
            if !buf.is_null() {
                // SAFETY: the pointer came from cudaMalloc and is nulled after freeing.
                if let Err(e) = check("cudaFree", unsafe { cudaFree((*buf).cast()) }) {
                    warn!("{e}");
                }
                *buf = ptr::null_mut();
            }
        }
        self.len = 0;
    }
}

impl Drop for CuFftBackend {
    fn drop(&mut self) {
        self.release();
    }
}
