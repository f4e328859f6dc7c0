//! Execution control
//!
//! Single-subprocess run orchestration for compiled solutions.

pub mod runner;
