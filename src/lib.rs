//! solvebox: compile-and-run orchestration for contest solutions
//!
//! A thin, synchronous layer between a contest helper tool and the system
//! toolchain: find the sources a build target selects, invoke the GNU
//! compiler as a subprocess (optionally with sanitizers, optionally in 32-bit
//! assembly compat mode), then run the produced binary with stdin wired from
//! a test input and its output captured or streamed through.
//!
//! # Architecture
//!
//! ## Build Orchestration ([`build`])
//! - [`build::compiler`]: glob expansion, command assembly, compiler spawn
//!
//! ## Execution Control ([`exec`])
//! - [`exec::runner`]: single-run orchestration with memcheck wrapping and
//!   sanitizer environment overlay
//!
//! ## Configuration ([`config`])
//! - [`config::types`]: option structs, descriptors, results, errors
//! - [`config::presets`]: immutable flag tables and the default target
//!
//! # Design Principles
//!
//! 1. **Exit codes are data** - a nonzero exit from the target binary is an
//!    ordinary result for the caller to interpret, never an error here
//! 2. **Fail loudly at the process boundary** - launch failures propagate
//!    untouched; nothing synthesizes diagnostics the compiler already printed
//! 3. **Blocking by construction** - one subprocess per call, no timeouts, no
//!    shared state between invocations; parallelism is the caller's problem

pub mod build;
pub mod cli;
pub mod config;
pub mod exec;

pub use config::types::*;

pub use build::compiler::{compile, compile_cpp, compile_gnu};
pub use exec::runner::run;
