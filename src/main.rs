use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::warn;

use fftbench::backend::{self, BackendKind};
use fftbench::bench::{self, BenchConfig, DEFAULT_TOLERANCE};
use fftbench::report;

/// Time forward/inverse FFTs of a fixed-size signal on every compiled backend.
#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Timed forward transforms per backend [env: FFTBENCH_ITERATIONS, default 5]
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Seed of the input generator [env: FFTBENCH_SEED, default 1234]
    #[arg(long)]
    seed: Option<u64>,

    /// Only run these backends (repeatable); all compiled backends by default
    #[arg(short, long = "backend", value_name = "KIND")]
    backends: Vec<BackendKind>,

    /// Also write the results as JSON
    #[arg(long, value_name = "PATH")]
    json: Option<PathBuf>,

    /// Exit with an error if a backend's round-trip error exceeds the tolerance
    #[arg(long)]
    check: bool,

    /// Round-trip tolerance used by --check
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// List backends and whether this build includes them, then exit
    #[arg(long)]
    list: bool,
}

fn list_backends<W: Write>(out: &mut W) -> io::Result<()> {
    for kind in BackendKind::ALL {
        let state = match (kind.is_compiled(), kind) {
            (false, _) => "not compiled",
            (true, BackendKind::RocFft | BackendKind::VkFft) => "placeholder",
            (true, _) => "available",
        };
        writeln!(out, "{:<8}{:<10}{state}", kind.feature(), kind.label())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.list {
        list_backends(&mut out)?;
        return Ok(());
    }

    let mut config = BenchConfig::from_env().context("reading FFTBENCH_* environment")?;
    if let Some(n) = args.iterations {
        config.iterations = n;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    config.tolerance = args.tolerance;

    let mut backends = backend::select(&args.backends)?;
    let report = bench::run(&config, &mut backends).context("benchmark failed")?;

    report::write_console(&mut out, &report)?;
    out.flush()?;

    if let Some(path) = &args.json {
        let json = report::to_json(&report)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }

    if args.check {
        if !report.runs.iter().any(|r| r.functional) {
            warn!("--check: no functional backend ran, nothing to verify");
        }
        let failures = report.failures();
        if !failures.is_empty() {
            let names: Vec<_> = failures
                .iter()
                .map(|r| format!("{} ({:e})", r.label(), r.error))
                .collect();
            bail!(
                "round-trip error above {:e}: {}",
                config.tolerance,
                names.join(", ")
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_repeated_backends() {
        let args = Args::parse_from(["fftbench", "-b", "rustfft", "--backend", "FFTW", "-n", "3"]);
        assert_eq!(args.backends, vec![BackendKind::RustFft, BackendKind::Fftw]);
        assert_eq!(args.iterations, Some(3));
        assert_eq!(args.tolerance, DEFAULT_TOLERANCE);
    }

    #[test]
    fn rejects_unknown_backend() {
        assert!(Args::try_parse_from(["fftbench", "--backend", "mkl"]).is_err());
    }

    #[test]
    fn list_marks_every_backend() {
        let mut buf = Vec::new();
        list_backends(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), BackendKind::ALL.len());
        assert!(text.contains("cufft"));
        assert!(text.contains("RustFFT"));
    }
}
