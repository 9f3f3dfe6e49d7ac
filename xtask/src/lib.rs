use std::env;
use std::process::{Command, Stdio};

/// Backend features derived from the host machine, used to configure cargo commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    pub features: Vec<String>,
}

impl BuildConfig {
    /// Join features into a single string suitable for passing to cargo.
    pub fn features_arg(&self) -> Option<String> {
        if self.features.is_empty() {
            None
        } else {
            Some(self.features.join(" "))
        }
    }
}

/// Detect build configuration from the current machine.
pub fn detect_config() -> BuildConfig {
    let extra = env::var("FFTBENCH_FEATURES").unwrap_or_default();
    compute_config(detect_cuda(), detect_fftw(), &extra)
}

fn succeeds(cmd: &mut Command) -> bool {
    cmd.stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

fn detect_cuda() -> bool {
    let root_set = ["CUDA_PATH", "CUDA_HOME"]
        .iter()
        .any(|v| env::var(v).is_ok_and(|p| !p.trim().is_empty()));
    root_set || succeeds(Command::new("nvcc").arg("--version"))
}

fn detect_fftw() -> bool {
    succeeds(Command::new("pkg-config").args(["--exists", "fftw3"]))
}

/// Compute a [`BuildConfig`] from supplied inputs. This is separated for testing.
pub fn compute_config(cuda: bool, fftw: bool, extra: &str) -> BuildConfig {
    let mut features = vec!["rustfft".to_string()];
    if cuda {
        features.push("cufft".into());
    }
    if fftw {
        features.push("fftw".into());
    }
    for feat in extra.split_whitespace() {
        if !features.iter().any(|f| f == feat) {
            features.push(feat.to_string());
        }
    }
    BuildConfig { features }
}

fn cargo(cfg: Option<&BuildConfig>, args: &[&str]) -> Command {
    let mut cmd = Command::new("cargo");
    cmd.args(args);
    if let Some(f) = cfg.and_then(BuildConfig::features_arg) {
        cmd.arg("--features").arg(f);
    }
    cmd
}

pub fn build_command(cfg: &BuildConfig) -> Command {
    cargo(Some(cfg), &["build"])
}

pub fn test_command(cfg: &BuildConfig) -> Command {
    cargo(Some(cfg), &["test", "--workspace"])
}

pub fn clippy_command() -> Command {
    cargo(None, &["clippy", "--all-targets", "--features", "rustfft"])
}

pub fn fmt_command() -> Command {
    cargo(None, &["fmt", "--all"])
}

/// Run the benchmark binary in release mode with round-trip checking.
pub fn run_command(cfg: &BuildConfig) -> Command {
    let mut cmd = cargo(Some(cfg), &["run", "--release", "--bin", "fftbench"]);
    cmd.args(["--", "--check"]);
    cmd
}

/// Criterion benchmarks of every detected backend.
pub fn bench_command(cfg: &BuildConfig) -> Command {
    cargo(
        Some(cfg),
        &["bench", "--manifest-path", "fftbench-bench/Cargo.toml"],
    )
}
