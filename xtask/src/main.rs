#[cfg(not(test))]
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
#[cfg(not(test))]
use xtask::*;

#[derive(Parser)]
#[command(author, version, about = "Development tasks for fftbench")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Build,
    Test,
    Clippy,
    Fmt,
    Analyze,
    /// Run the benchmark binary with every detected backend
    Run,
    /// Criterion benchmarks of every detected backend
    Bench,
    /// Print the features detected on this machine
    Features,
}

#[cfg(not(test))]
fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = detect_config();

    let status = match cli.command {
        Commands::Build => build_command(&cfg).status(),
        Commands::Test => test_command(&cfg).status(),
        Commands::Clippy => clippy_command().status(),
        Commands::Fmt => fmt_command().status(),
        Commands::Analyze => {
            let fmt = fmt_command().status().context("running cargo fmt")?;
            if !fmt.success() {
                Ok(fmt)
            } else {
                clippy_command().status()
            }
        }
        Commands::Run => run_command(&cfg).status(),
        Commands::Bench => bench_command(&cfg).status(),
        Commands::Features => {
            println!("{}", cfg.features.join(" "));
            return Ok(());
        }
    }
    .context("spawning cargo")?;

    std::process::exit(status.code().unwrap_or(1));
}
