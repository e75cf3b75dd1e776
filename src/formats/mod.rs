//! Output format implementations.

pub mod csv;
