//! Robot Show Driver
//!
//! Library half of the `nao-fun` binary: configuration, command line options and the
//! scripted show itself. The binary only wires these together.

pub mod cli;
pub mod config;
pub mod routine;
