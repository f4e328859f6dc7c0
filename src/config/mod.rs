//! Configuration
//!
//! Option structs, descriptors, and the fixed flag tables.

pub mod presets;
pub mod types;
