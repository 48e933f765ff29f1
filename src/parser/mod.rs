//! Shell parsing utilities for scout-block
//!
//! Provides command splitting, prefix stripping, wrapper unwrapping and
//! context-aware path extraction. No full shell grammar: just enough
//! structure to tell paths from patterns and text.

pub mod extract;
pub mod shell;
pub mod wrapper;
