//! The fetch / gen / run command bodies.
//!
//! Each returns `CliResult<ExitCode>`; printing errors and exiting is the
//! caller's job.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::fixtures::{scrape, store};
use crate::harness;

use super::{CliError, CliResult, ExitCode};

/// Maximum solution file size (10 MB)
///
/// Larger files are rejected before reading; a solution file this big is a
/// mistake, not a solution.
const MAX_SOURCE_SIZE: u64 = 10 * 1024 * 1024;

/// Read a solution source file, rejecting anything over `MAX_SOURCE_SIZE`
/// before touching its contents.
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, limit {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

/// Fetch example pairs for a problem URL and store them as fixture files.
///
/// `CPH_API_BASE` overrides the default problem API endpoint.
pub fn fetch(url: &str, dir: Option<PathBuf>) -> CliResult<ExitCode> {
    let slug = scrape::extract_slug(url).map_err(|e| CliError::failure(format!("Error: {e}")))?;

    let api_base =
        std::env::var("CPH_API_BASE").unwrap_or_else(|_| scrape::DEFAULT_API_BASE.to_string());
    let cases = scrape::fetch_examples(&slug, &api_base)
        .map_err(|e| CliError::failure(format!("Error fetching test cases: {e}")))?;

    let dir = dir.unwrap_or_else(|| PathBuf::from("testCases").join(&slug));
    let count = store::save_cases(&dir, &cases)
        .map_err(|e| CliError::failure(format!("Error saving test cases: {e}")))?;

    println!("Saved {} test case pair(s) in {}", count, dir.display());
    Ok(ExitCode::SUCCESS)
}

/// Generate the harness source for a solution file.
pub fn generate(
    solution: &Path,
    testcases: Option<PathBuf>,
    out: Option<PathBuf>,
    to_stdout: bool,
) -> CliResult<ExitCode> {
    let source = read_source(solution)?;
    let fixture_dir = resolve_fixture_dir(solution, testcases);

    let code = harness::generate(&source, &fixture_dir)
        .map_err(|e| CliError::failure(format!("Code generation error: {e}")))?;

    if to_stdout {
        println!("{code}");
        return Ok(ExitCode::SUCCESS);
    }

    let out = out.unwrap_or_else(|| solution.with_file_name("main.cpp"));
    fs::write(&out, &code)
        .map_err(|e| CliError::failure(format!("Error writing '{}': {}", out.display(), e)))?;

    println!("Generated harness: {}", out.display());
    Ok(ExitCode::SUCCESS)
}

/// Generate, compile and execute the harness, propagating its exit code
/// (the number of failing cases).
pub fn run_harness(solution: &Path, testcases: Option<PathBuf>) -> CliResult<ExitCode> {
    let fixture_dir = resolve_fixture_dir(solution, testcases);

    // Pairing check up front: a broken store is a store problem, not a
    // harness bug, so surface it before spawning anything.
    let pairs = store::discover_pairs(&fixture_dir).map_err(|e| {
        CliError::failure(format!(
            "Cannot read fixture directory '{}': {}",
            fixture_dir.display(),
            e
        ))
    })?;
    if pairs.is_empty() {
        return Err(CliError::failure(format!(
            "No test cases found in {}",
            fixture_dir.display()
        )));
    }
    for pair in pairs.iter().filter(|p| p.output.is_none()) {
        tracing::warn!(
            "input_{}.txt has no matching output file; the harness will skip it",
            pair.index
        );
    }

    let source = read_source(solution)?;
    let code = harness::generate(&source, &fixture_dir)
        .map_err(|e| CliError::failure(format!("Code generation error: {e}")))?;

    let main_cpp = solution.with_file_name("main.cpp");
    fs::write(&main_cpp, &code)
        .map_err(|e| CliError::failure(format!("Error writing '{}': {}", main_cpp.display(), e)))?;

    let binary = solution.with_file_name("main");
    let output = Command::new("g++")
        .arg("-std=c++17")
        .arg(&main_cpp)
        .arg("-o")
        .arg(&binary)
        .output()
        .map_err(|e| CliError::failure(format!("Error running g++: {e}")))?;

    if !output.status.success() {
        return Err(CliError::failure(format!(
            "Compilation failed:\n{}",
            String::from_utf8_lossy(&output.stderr)
        )));
    }

    // Inherited stdio so the report streams to the terminal as it happens
    let status = Command::new(&binary)
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| CliError::failure(format!("Error running harness: {e}")))?;

    Ok(ExitCode(status.code().unwrap_or(1)))
}

/// Fixture directory for a solution: explicit flag, or `testCases` beside it.
fn resolve_fixture_dir(solution: &Path, testcases: Option<PathBuf>) -> PathBuf {
    testcases.unwrap_or_else(|| {
        solution
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("testCases")
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fixture_dir_default() {
        let dir = resolve_fixture_dir(Path::new("work/solution.cpp"), None);
        assert_eq!(dir, PathBuf::from("work/testCases"));
    }

    #[test]
    fn test_resolve_fixture_dir_explicit() {
        let dir = resolve_fixture_dir(
            Path::new("work/solution.cpp"),
            Some(PathBuf::from("fixtures/two-sum")),
        );
        assert_eq!(dir, PathBuf::from("fixtures/two-sum"));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("does-not-exist.cpp")).unwrap_err();
        assert!(err.message.contains("Cannot access file"));
    }

    #[test]
    fn test_generate_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let solution = dir.path().join("solution.cpp");
        fs::write(&solution, "int add(int a, int b) { return a + b; }").unwrap();

        generate(&solution, None, None, false).unwrap();

        let harness_path = dir.path().join("main.cpp");
        let code = fs::read_to_string(&harness_path).unwrap();
        assert!(code.contains("auto result = add(a, b);"));
        assert!(code.contains(&dir.path().join("testCases").display().to_string()));
    }

    #[test]
    fn test_generate_signature_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let solution = dir.path().join("solution.cpp");
        fs::write(&solution, "// empty\n").unwrap();

        let err = generate(&solution, None, None, false).unwrap_err();
        assert!(err.message.contains("Code generation error"));
    }

    #[test]
    fn test_run_harness_requires_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let solution = dir.path().join("solution.cpp");
        fs::write(&solution, "int add(int a, int b) { return a + b; }").unwrap();

        let err = run_harness(&solution, None).unwrap_err();
        assert!(err.message.contains("Cannot read fixture directory"));
    }
}
