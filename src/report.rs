//! Console and JSON rendering of a [`Report`].
//!
//! Numbers are printed the way a default-configured C++ output stream prints
//! doubles (`%g` with six significant digits) and complex samples as
//! `(re,im)`, so the console output lines up with the reference tables the
//! benchmark has always produced.

use core::fmt;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::backend::{compiled_kinds, BackendKind};
use crate::bench::Report;
use crate::num::Complex64;
use crate::signal;

const RULE: &str = "==========================================================";
const PRECISION: usize = 6;

/// `%g` formatting with six significant digits.
#[derive(Debug, Clone, Copy)]
pub struct Gfmt(pub f64);

impl fmt::Display for Gfmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = self.0;
        if x.is_nan() {
            return f.write_str(if x.is_sign_negative() { "-nan" } else { "nan" });
        }
        if x.is_infinite() {
            return f.write_str(if x < 0.0 { "-inf" } else { "inf" });
        }
        if x == 0.0 {
            return f.write_str(if x.is_sign_negative() { "-0" } else { "0" });
        }
        // Round to the target precision first; the exponent of the rounded
        // value decides between fixed and scientific notation.
        let sci = format!("{:.*e}", PRECISION - 1, x);
        let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        if exp < -4 || exp >= PRECISION as i32 {
            let sign = if exp < 0 { '-' } else { '+' };
            write!(
                f,
                "{}e{}{:02}",
                strip_zeros(mantissa),
                sign,
                exp.unsigned_abs()
            )
        } else {
            let decimals = (PRECISION as i32 - 1 - exp) as usize;
            f.write_str(strip_zeros(&format!("{x:.decimals$}")))
        }
    }
}

fn strip_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// A complex sample as `(re,im)`.
#[derive(Debug, Clone, Copy)]
pub struct ComplexFmt(pub Complex64);

impl fmt::Display for ComplexFmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", Gfmt(self.0.re), Gfmt(self.0.im))
    }
}

/// Every sample followed by a single space.
pub fn signal_line(data: &[Complex64]) -> String {
    data.iter().map(|&z| format!("{} ", ComplexFmt(z))).collect()
}

/// The column header of the timing table.
pub fn header_line() -> String {
    BackendKind::ALL
        .iter()
        .map(|k| k.label())
        .collect::<Vec<_>>()
        .join("\t\t")
}

/// Write the full console report.
pub fn write_console<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(out, "{}", signal_line(&report.input))?;
    for run in &report.runs {
        writeln!(out, "{}", signal_line(&run.forward))?;
        writeln!(out, "{}", signal_line(&run.inverse))?;
    }

    writeln!(out, "\n{RULE}")?;
    writeln!(out, "\t\t\tRuntime (s)")?;
    writeln!(out, "{}", header_line())?;
    writeln!(out, "{RULE}")?;
    for i in 0..report.timings.iterations() {
        let row: Vec<String> = report
            .timings
            .row(i)
            .into_iter()
            .map(|t| Gfmt(t).to_string())
            .collect();
        writeln!(out, "{}", row.join("\t"))?;
    }

    writeln!(out)?;
    let tagged = report.runs.len() > 1;
    for run in &report.runs {
        write!(
            out,
            "Size: {}\t |FFT(X)-iFFT(X)|_{{infty}}: {}",
            report.size,
            Gfmt(run.error)
        )?;
        if tagged {
            write!(out, " [{}]", run.label())?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// The console report as a string.
pub fn render(report: &Report) -> String {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail
    let _ = write_console(&mut buf, report);
    String::from_utf8_lossy(&buf).into_owned()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvInfo {
    pub os: String,
    pub arch: String,
    /// Backend features compiled into this build.
    pub features: Vec<String>,
    pub date: String,
}

impl EnvInfo {
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            features: compiled_kinds()
                .into_iter()
                .map(|k| k.feature().to_string())
                .collect(),
            date: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendRecord {
    pub backend: String,
    pub functional: bool,
    pub times_s: Vec<f64>,
    pub mean_s: f64,
    pub min_s: f64,
    pub roundtrip_error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub env: EnvInfo,
    pub seed: u64,
    pub size: usize,
    pub iterations: usize,
    pub signal_digest: String,
    pub results: Vec<BackendRecord>,
}

impl JsonReport {
    pub fn new(report: &Report, env: EnvInfo) -> Self {
        let results = report
            .runs
            .iter()
            .map(|run| {
                let times_s = run
                    .kind
                    .map(|k| report.timings.column(k).to_vec())
                    .unwrap_or_else(|| vec![0.0; report.timings.iterations()]);
                let mean_s = if times_s.is_empty() {
                    0.0
                } else {
                    times_s.iter().sum::<f64>() / times_s.len() as f64
                };
                let min_s = times_s.iter().copied().reduce(f64::min).unwrap_or(0.0);
                BackendRecord {
                    backend: run.label().to_string(),
                    functional: run.functional,
                    times_s,
                    mean_s,
                    min_s,
                    roundtrip_error: run.error,
                }
            })
            .collect();
        Self {
            env,
            seed: report.config.seed,
            size: report.size,
            iterations: report.timings.iterations(),
            signal_digest: signal::digest(&report.input),
            results,
        }
    }
}

/// Pretty-printed JSON for `report` tagged with the current environment.
pub fn to_json(report: &Report) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&JsonReport::new(report, EnvInfo::current()))
}
