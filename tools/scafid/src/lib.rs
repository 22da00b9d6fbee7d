//! scafid: command-line driver for scaffold identifier assignment
//!
//! Reads JSON datasets, runs `scaffold_ids`, writes JSON. The library does
//! no I/O of its own; persisting the registry between runs happens here.

pub mod cli;
pub mod commands;
pub mod io;

pub use cli::{Cli, Command};
pub use commands::run;
