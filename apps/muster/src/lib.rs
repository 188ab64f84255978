//! # Muster
//!
//! Operator surfaces for the Muster assignment engine: the CLI, the HTTP API,
//! configuration loading and tracing setup.
//!
//! The engine itself lives in `muster-core`; this crate only wires stores,
//! settings and output around it.

pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
