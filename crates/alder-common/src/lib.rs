//! Common utilities for the alder markup toolkit.
//!
//! This crate provides shared infrastructure used by the parser and DOM
//! components:
//! - **Warning System** - deduplicated, colored terminal output for
//!   degraded-input diagnostics

pub mod warning;
