//! Complex sample type and round-trip error metrics.

pub use num_complex::Complex64;

use crate::error::BenchError;

/// Allocate a zero-filled buffer of `len` samples.
pub fn zeroed(len: usize) -> Vec<Complex64> {
    vec![Complex64::new(0.0, 0.0); len]
}

/// Infinity-norm distance between `input` and `output / scale`.
///
/// All backends are unnormalized, so after a forward and an inverse transform
/// `output` holds `len * input`; passing `scale = len` measures how far the
/// round trip drifted from the original signal.
pub fn roundtrip_error(
    input: &[Complex64],
    output: &[Complex64],
    scale: f64,
) -> Result<f64, BenchError> {
    if input.len() != output.len() {
        return Err(BenchError::MismatchedLengths {
            expected: input.len(),
            actual: output.len(),
        });
    }
    Ok(input
        .iter()
        .zip(output)
        .map(|(x, y)| (x - y / scale).norm())
        .fold(0.0, max_or_nan))
}

/// `f64::max` that lets a NaN through instead of discarding it.
fn max_or_nan(acc: f64, d: f64) -> f64 {
    if acc.is_nan() || d.is_nan() {
        f64::NAN
    } else {
        acc.max(d)
    }
}

/// Largest magnitude in `data`, `0.0` for an empty slice.
pub fn inf_norm(data: &[Complex64]) -> f64 {
    data.iter().map(|z| z.norm()).fold(0.0, max_or_nan)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_scaled_signals_have_zero_error() {
        let x = [Complex64::new(0.5, 0.0), Complex64::new(0.25, -1.0)];
        let y: Vec<_> = x.iter().map(|z| z * 2.0).collect();
        assert_eq!(roundtrip_error(&x, &y, 2.0).unwrap(), 0.0);
    }

    #[test]
    fn error_is_the_worst_element() {
        let x = [Complex64::new(1.0, 0.0), Complex64::new(0.0, 0.0)];
        let y = [Complex64::new(1.0, 0.0), Complex64::new(3.0, 4.0)];
        assert_eq!(roundtrip_error(&x, &y, 1.0).unwrap(), 5.0);
    }

    #[test]
    fn zero_output_error_equals_input_norm() {
        let x = [Complex64::new(0.3, 0.0), Complex64::new(0.9, 0.0)];
        let y = zeroed(2);
        assert_eq!(roundtrip_error(&x, &y, 2.0).unwrap(), inf_norm(&x));
    }

    #[test]
    fn nan_output_is_not_hidden() {
        let x = [Complex64::new(0.5, 0.0), Complex64::new(0.25, 0.0)];
        let y = [
            Complex64::new(f64::NAN, 0.0),
            Complex64::new(f64::NAN, f64::NAN),
        ];
        assert!(roundtrip_error(&x, &y, 2.0).unwrap().is_nan());
        let partial = [Complex64::new(1.0, 0.0), Complex64::new(f64::NAN, 0.0)];
        assert!(roundtrip_error(&x, &partial, 2.0).unwrap().is_nan());
        assert!(inf_norm(&partial).is_nan());
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = roundtrip_error(&zeroed(3), &zeroed(2), 3.0).unwrap_err();
        assert_eq!(
            err,
            BenchError::MismatchedLengths {
                expected: 3,
                actual: 2
            }
        );
    }
}
