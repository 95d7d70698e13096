//! Fixture store
//!
//! Persists example pairs as `input_<n>.txt` / `output_<n>.txt` under a
//! named directory, and discovers existing pairs sorted by numeric index.
//! Writes are not transactional: a failure partway leaves the already
//! written files in place, which is acceptable for a local dev tool.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::FixtureCase;

/// Errors that occur while writing or reading the fixture directory.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no test cases to write")]
    NoCases,

    #[error("fixture I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Write the given cases as paired fixture files under `dir`.
///
/// An empty case list fails without creating the directory or any files.
/// Returns the number of pairs written.
pub fn save_cases(dir: &Path, cases: &[FixtureCase]) -> Result<usize, StoreError> {
    if cases.is_empty() {
        return Err(StoreError::NoCases);
    }

    fs::create_dir_all(dir)?;
    for (i, case) in cases.iter().enumerate() {
        let n = i + 1;
        fs::write(dir.join(format!("input_{n}.txt")), &case.input)?;
        fs::write(dir.join(format!("output_{n}.txt")), &case.output)?;
    }

    tracing::info!("saved {} test case pair(s) in {}", cases.len(), dir.display());
    Ok(cases.len())
}

/// An input fixture and, when present, its expected-output companion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasePair {
    pub index: u32,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

/// Enumerate `input_<n>.txt` files under `dir`, sorted by numeric index.
///
/// An input without its `output_<n>.txt` companion still appears (with
/// `output: None`) so callers can warn about the broken pairing before a
/// harness run rather than crash during one.
pub fn discover_pairs(dir: &Path) -> Result<Vec<CasePair>, StoreError> {
    let mut pairs = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        let Some(rest) = name.strip_prefix("input_") else { continue };
        let Some(digits) = rest.strip_suffix(".txt") else { continue };
        let Ok(index) = digits.parse::<u32>() else { continue };

        let output = dir.join(format!("output_{index}.txt"));
        pairs.push(CasePair {
            index,
            input: entry.path(),
            output: output.exists().then_some(output),
        });
    }

    pairs.sort_by_key(|p| p.index);
    Ok(pairs)
}
