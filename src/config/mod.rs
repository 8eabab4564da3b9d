//! Configuration management
//!
//! Static configuration is layered from `config.toml`, an environment specific
//! file and environment variables, then frozen in a global `OnceLock`.

mod r#impl;
mod structs;

pub use structs::*;
