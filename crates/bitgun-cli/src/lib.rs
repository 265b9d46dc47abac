//! Bitgun CLI library.
//!
//! Argument definitions, configuration loading, logging setup, and the
//! command implementations behind the `bitgun` binary.

pub mod cli_args;
pub mod commands;
pub mod config;
pub mod logging;
pub mod rng;
