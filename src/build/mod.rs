//! Build orchestration
//!
//! Source discovery and compiler invocation.

pub mod compiler;
