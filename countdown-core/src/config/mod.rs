//! Configuration types
//!
//! Board-agnostic configuration structures and the reader for the
//! embedded TOML configuration file.

pub mod hardware;
pub mod parse;
pub mod types;

pub use hardware::*;
pub use parse::{parse_config, ParseError};
pub use types::*;
