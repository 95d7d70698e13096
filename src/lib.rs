#![forbid(unsafe_code)]
//! cph — Competitive Programming Helper
//!
//! A small developer-productivity tool for LeetCode-style problems:
//! fetch a problem's example input/output pairs and persist them as paired
//! fixture files, then generate a self-contained C++ test harness that parses
//! the user's solution signature, decodes each fixture into native values,
//! invokes the solution, and reports per-case and summary results.
//!
//! ## Panic policy
//!
//! Errors are values here, not panics:
//!
//! - Non-test code propagates `Result`/`Option` with `?`, `ok_or`, `map_err`;
//!   the `cli` and `harness` modules enforce `#![deny(clippy::unwrap_used)]`.
//! - Tests may `.unwrap()` and `.expect()` freely.
//! - The generated C++ program handles its own faults through the harness's
//!   `try`/`catch` protocol; nothing there maps back to a Rust panic.
//! - A genuine logic bug may panic via `.expect("INVARIANT: reason")` with
//!   the invariant spelled out.

pub mod cli;
pub mod fixtures;
pub mod grammar;
pub mod harness;

pub use fixtures::FixtureCase;
pub use fixtures::scrape::extract_slug;
pub use grammar::Value;
pub use harness::generate;
pub use harness::signature::{ParsedSignature, TypeTag};
