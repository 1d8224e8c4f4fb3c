//! Utility functions and helpers for the plantdoc service.
//!
//! # Submodules
//!
//! - `logging`: Tracing initialization and secret scrubbing.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod logging;
