//! Control algorithms.

pub mod threshold;
