//! blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core,engine,input,term,types}`
//! and hosts the runtime configuration used by the terminal binary.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::{Config, ConfigError};
