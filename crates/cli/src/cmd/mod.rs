//! CLI command implementations

pub mod check;
pub mod example;
pub mod simulate;
