//! Library side of the dirwatch binary
//!
//! Configuration loading, console rendering and logging setup live here so
//! they can be tested without spawning the process.

pub mod config;
pub mod console;
pub mod logging;
