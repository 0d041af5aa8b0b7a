//! UI components.

pub mod black_hole;
