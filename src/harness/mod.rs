//! Test-harness generation
//!
//! Turns a user's C++ solution file plus a fixture directory into a single
//! self-contained `main.cpp`: the solution source verbatim, a small decoding
//! and formatting runtime, and a driver that runs every fixture pair and
//! reports per-case and summary results.
//!
//! ## Modules
//!
//! - `signature` - extracts the solution function's signature
//! - `emitter` - indentation-aware C++ source buffer
//! - `generator` - type-driven decode/encode templates and harness assembly

// Enforce explicit error handling - no panicking in production code.
// `.expect("INVARIANT: ...")` stays allowed for true logic invariants.
#![deny(clippy::unwrap_used)]

pub mod emitter;
pub mod generator;
pub mod signature;

use thiserror::Error;

pub use generator::generate;

/// Errors that occur during harness generation.
///
/// An individual parameter or return type outside the supported vocabulary is
/// deliberately *not* an error here: it degrades to a placeholder in the
/// emitted source and surfaces when the generated harness is compiled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenError {
    #[error("could not find a function signature in the solution source")]
    SignatureNotFound,
}
