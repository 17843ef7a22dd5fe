use anyhow::{Context, Result, bail, ensure};
use std::path::Path;
use std::process::Command;

use pyline::interpreter::Interpreter;
use pyline::parser::parse_source;
use test_support::{
    Case, CaseClass, load_cases, normalize_output, run_python_file, run_python_startup,
};

fn parity_required(env_var: &str) -> bool {
    std::env::var(env_var)
        .map(|value| value == "1")
        .unwrap_or(false)
}

fn detect_python_interpreter() -> Result<Option<String>> {
    if let Ok(python) = std::env::var("PYTHON")
        && run_python_startup(&python).is_ok()
    {
        return Ok(Some(python));
    }

    for candidate in ["python3", "python"] {
        if run_python_startup(candidate).is_ok() {
            return Ok(Some(candidate.to_string()));
        }
    }

    if parity_required("PYTHON_PARITY_REQUIRED") {
        bail!("CPython parity required but no interpreter found. Set PYTHON or install python3.");
    }

    eprintln!("Skipping CPython parity test: no PYTHON env or python3 interpreter found.");
    Ok(None)
}

fn check_case_in_process(case: &Case) -> Result<()> {
    let source = std::fs::read_to_string(&case.program_path)
        .with_context(|| format!("Reading {}", case.name))?;
    let parsed = parse_source(&source);

    match case.spec.class {
        CaseClass::RuntimeSuccess => {
            ensure!(
                case.spec.expected.exit_code == 0,
                "Case {} expected exit code must be 0 for runtime_success",
                case.name
            );
            let program = parsed.with_context(|| format!("Parsing {}", case.name))?;
            let output = Interpreter::from_program(program)
                .run_to_string()
                .with_context(|| format!("Running {}", case.name))?;
            assert_eq!(
                normalize_output(&output),
                normalize_output(&case.expected_stdout()?),
                "Output mismatch for {}",
                case.name
            );
        }
        CaseClass::ParseError => {
            ensure!(
                case.spec.expected.exit_code == 1,
                "Case {} expected exit code must be 1 for parse_error",
                case.name
            );
            let expected_error = case.expected_error()?;
            let Err(error) = parsed else {
                bail!("Expected parse error in {}, but parsing succeeded", case.name);
            };
            let actual = error.to_string();
            ensure!(
                actual.contains(&expected_error),
                "Expected parse error containing '{expected_error}' in {}, got '{actual}'",
                case.name
            );
        }
        CaseClass::RuntimeError => {
            ensure!(
                case.spec.expected.exit_code == 1,
                "Case {} expected exit code must be 1 for runtime_error",
                case.name
            );
            let expected_error = case.expected_error()?;
            let program = parsed.with_context(|| format!("Parsing {}", case.name))?;
            let mut output: Vec<String> = Vec::new();
            let result = program.run(&mut output);
            let Err(error) = result else {
                bail!("Expected runtime error in {}, but run succeeded", case.name);
            };
            let actual = error.to_string();
            ensure!(
                actual.contains(&expected_error),
                "Expected runtime error containing '{expected_error}' in {}, got '{actual}'",
                case.name
            );
            if case.spec.expected.stdout_file.is_some() {
                assert_eq!(
                    normalize_output(&output.join("\n")),
                    normalize_output(&case.expected_stdout()?),
                    "Partial output mismatch for {}",
                    case.name
                );
            }
        }
    }
    Ok(())
}

fn check_case_binary(case: &Case) -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pyline"))
        .arg(&case.program_path)
        .output()
        .with_context(|| format!("Running pyline for {}", case.name))?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(
        output.status.code(),
        Some(case.spec.expected.exit_code),
        "Exit code mismatch for {} (stderr: {stderr})",
        case.name
    );
    if case.spec.expected.stdout_file.is_some() {
        assert_eq!(
            normalize_output(&stdout),
            normalize_output(&case.expected_stdout()?),
            "Stdout mismatch for {}",
            case.name
        );
    }
    if case.spec.expected.stderr_contains_file.is_some() {
        let expected_error = case.expected_error()?;
        ensure!(
            stderr.contains(&expected_error),
            "Expected stderr containing '{expected_error}' in {}, got '{stderr}'",
            case.name
        );
    }
    Ok(())
}

#[test]
fn runs_programs_in_process() -> Result<()> {
    for case in load_cases(Path::new("tests/programs"))? {
        check_case_in_process(&case)?;
    }
    Ok(())
}

#[test]
fn runs_programs_through_binary() -> Result<()> {
    for case in load_cases(Path::new("tests/programs"))? {
        check_case_binary(&case)?;
    }
    Ok(())
}

#[test]
fn check_mode_does_not_run_program() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pyline"))
        .arg("--check")
        .arg("tests/programs/undefined_variable/program.pyl")
        .output()
        .context("Running pyline --check")?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "ok");
    Ok(())
}

#[test]
fn dump_tree_reports_tree_and_final_bindings() -> Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_pyline"))
        .arg("--dump-tree")
        .arg("tests/programs/assign_print/program.pyl")
        .env_remove("RUST_LOG")
        .output()
        .context("Running pyline --dump-tree")?;
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "5");
    let stderr = String::from_utf8_lossy(&output.stderr);
    let lines: Vec<&str> = stderr.lines().collect();
    assert_eq!(lines, vec!["assign x = 5", "print x", "x = 5"]);
    Ok(())
}

#[test]
fn runs_programs_cpython_parity() -> Result<()> {
    let Some(interpreter) = detect_python_interpreter()? else {
        return Ok(());
    };

    for case in load_cases(Path::new("tests/programs"))? {
        if !case.spec.parity || case.spec.class != CaseClass::RuntimeSuccess {
            continue;
        }
        let actual = run_python_file(&interpreter, &case.program_path)
            .with_context(|| format!("Running CPython for {}", case.name))?;
        assert_eq!(
            normalize_output(&actual),
            normalize_output(&case.expected_stdout()?),
            "CPython mismatch for {}",
            case.name
        );
    }
    Ok(())
}
