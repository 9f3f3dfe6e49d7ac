use assert_cmd::Command;

fn fftbench() -> Command {
    let mut cmd = Command::cargo_bin("fftbench").unwrap();
    cmd.env_remove("FFTBENCH_ITERATIONS")
        .env_remove("FFTBENCH_SEED")
        .env_remove("RUST_LOG");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{output:?}");
    String::from_utf8(output.stdout).unwrap()
}

#[test]
fn prints_input_table_and_error() {
    let text = stdout_of(&mut fftbench());
    let lines: Vec<_> = text.lines().collect();
    assert!(lines[0].starts_with("(0.930042,0) (0.248316,0) (0.0771784,0) "));
    assert!(text.contains("\t\t\tRuntime (s)"));
    assert!(text.contains("cuFFT\t\trocFFT\t\tvkFFT\t\tFFTW\t\tRustFFT"));
    assert!(text.contains("Size: 6\t |FFT(X)-iFFT(X)|_{infty}: "));
}

#[test]
fn iteration_count_sets_table_rows() {
    let text = stdout_of(fftbench().args(["-n", "3"]));
    let header = text
        .lines()
        .position(|l| l.starts_with("cuFFT"))
        .unwrap();
    let rows: Vec<_> = text.lines().skip(header + 2).take_while(|l| !l.is_empty()).collect();
    assert_eq!(rows.len(), 3);
    for row in rows {
        assert_eq!(row.split('\t').count(), 5);
    }
}

#[test]
fn env_iterations_are_honoured() {
    let text = stdout_of(fftbench().env("FFTBENCH_ITERATIONS", "2"));
    let header = text.lines().position(|l| l.starts_with("cuFFT")).unwrap();
    let rows = text
        .lines()
        .skip(header + 2)
        .take_while(|l| !l.is_empty())
        .count();
    assert_eq!(rows, 2);
}

#[test]
fn output_is_identical_across_runs_apart_from_timings() {
    let first = stdout_of(&mut fftbench());
    let second = stdout_of(&mut fftbench());
    assert_eq!(first.lines().next(), second.lines().next());
}

#[test]
fn invalid_env_value_exits_with_error() {
    let output = fftbench()
        .env("FFTBENCH_ITERATIONS", "not-a-number")
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FFTBENCH_ITERATIONS"));
}

#[test]
fn zero_iterations_fail() {
    fftbench().args(["-n", "0"]).assert().failure();
}

#[test]
fn list_shows_all_backends() {
    let text = stdout_of(fftbench().arg("--list"));
    for name in ["cufft", "rocfft", "vkfft", "fftw", "rustfft"] {
        assert!(text.contains(name), "missing {name}");
    }
}

#[test]
fn json_report_is_written() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    fftbench()
        .args(["-n", "2", "--json"])
        .arg(&path)
        .assert()
        .success();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["size"], 6);
    assert_eq!(json["iterations"], 2);
    assert_eq!(json["seed"], 1234);
    assert_eq!(json["signal_digest"].as_str().unwrap().len(), 64);
    assert!(!json["results"].as_array().unwrap().is_empty());
}

#[test]
fn check_passes_for_working_backends() {
    fftbench().arg("--check").assert().success();
}
