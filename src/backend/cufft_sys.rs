//! Raw FFI declarations for the subset of cuFFT and the CUDA runtime the
//! benchmark calls: 1-D double-complex plans, device allocation, copies and
//! device-wide synchronization.

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
#![allow(non_upper_case_globals)]

use std::ffi::{c_int, c_void};

use crate::error::BenchError;

pub type cufftHandle = c_int;
pub type cudaError_t = c_int;

pub const cudaSuccess: cudaError_t = 0;

/// `cudaMemcpyKind`
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum cudaMemcpyKind {
    HostToHost = 0,
    HostToDevice = 1,
    DeviceToHost = 2,
    DeviceToDevice = 3,
}

/// Raw `cufftResult`. Kept as an integer: newer toolkits return codes this
/// table does not know yet.
pub type cufftResult = c_int;

pub const CUFFT_SUCCESS: cufftResult = 0;

const CUFFT_STATUS_NAMES: [&str; 21] = [
    "CUFFT_SUCCESS",
    "CUFFT_INVALID_PLAN",
    "CUFFT_ALLOC_FAILED",
    "CUFFT_INVALID_TYPE",
    "CUFFT_INVALID_VALUE",
    "CUFFT_INTERNAL_ERROR",
    "CUFFT_EXEC_FAILED",
    "CUFFT_SETUP_FAILED",
    "CUFFT_INVALID_SIZE",
    "CUFFT_UNALIGNED_DATA",
    "CUFFT_INCOMPLETE_PARAMETER_LIST",
    "CUFFT_INVALID_DEVICE",
    "CUFFT_PARSE_ERROR",
    "CUFFT_NO_WORKSPACE",
    "CUFFT_NOT_IMPLEMENTED",
    "CUFFT_LICENSE_ERROR",
    "CUFFT_NOT_SUPPORTED",
    "CUFFT_MISSING_DEPENDENCY",
    "CUFFT_NVRTC_FAILURE",
    "CUFFT_NVJITLINK_FAILURE",
    "CUFFT_NVSHMEM_FAILURE",
];

/// Symbolic name of a cuFFT status, or `cufftResult <code>` for unknown ones.
pub fn cufft_status_name(code: cufftResult) -> String {
    usize::try_from(code)
        .ok()
        .and_then(|i| CUFFT_STATUS_NAMES.get(i))
        .map_or_else(|| format!("cufftResult {code}"), |name| name.to_string())
}

/// Convert a cuFFT status into a `Result`.
pub fn check_cufft(call: &'static str, code: cufftResult) -> Result<(), BenchError> {
    if code == CUFFT_SUCCESS {
        Ok(())
    } else {
        Err(BenchError::Cufft {
            call,
            status: cufft_status_name(code),
        })
    }
}

/// Double-complex to double-complex.
pub const CUFFT_Z2Z: c_int = 0x69;
pub const CUFFT_FORWARD: c_int = -1;
pub const CUFFT_INVERSE: c_int = 1;

/// Same layout as `cuDoubleComplex` and `num_complex::Complex64`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct cufftDoubleComplex {
    pub x: f64,
    pub y: f64,
}

#[link(name = "cufft")]
extern "C" {
    pub fn cufftPlan1d(
        plan: *mut cufftHandle,
        nx: c_int,
        fft_type: c_int,
        batch: c_int,
    ) -> cufftResult;

    /// Unnormalized: forward then inverse yields `nx * x`.
    pub fn cufftExecZ2Z(
        plan: cufftHandle,
        idata: *mut cufftDoubleComplex,
        odata: *mut cufftDoubleComplex,
        direction: c_int,
    ) -> cufftResult;

    pub fn cufftDestroy(plan: cufftHandle) -> cufftResult;
}

#[link(name = "cudart")]
extern "C" {
    pub fn cudaMalloc(dev_ptr: *mut *mut c_void, size: usize) -> cudaError_t;
    pub fn cudaFree(dev_ptr: *mut c_void) -> cudaError_t;
    pub fn cudaMemcpy(
        dst: *mut c_void,
        src: *const c_void,
        count: usize,
        kind: cudaMemcpyKind,
    ) -> cudaError_t;
    pub fn cudaDeviceSynchronize() -> cudaError_t;
}

/// Convert a CUDA runtime status into a `Result`.
pub fn check(call: &'static str, code: cudaError_t) -> Result<(), BenchError> {
    if code == cudaSuccess {
        Ok(())
    } else {
        Err(BenchError::Cuda { call, code })
    }
}
