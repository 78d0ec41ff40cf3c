//! Terminal front ends.

pub mod tui;
