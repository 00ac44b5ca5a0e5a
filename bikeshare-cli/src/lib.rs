//! Support library for the `bikeshare` binary.
//!
//! Exposes the session driver and logging set-up so tests can run a whole
//! interactive session against in-memory input and output.

pub mod cli;
pub mod logging;
