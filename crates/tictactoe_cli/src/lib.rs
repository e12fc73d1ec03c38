//! Terminal front end for `tictactoe_engine`.
//!
//! The binary wires these modules together; they are a library so the
//! config and input handling can be tested without a terminal.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod duel;
pub mod play;

pub use cli::{Cli, Command, ConfigAction};
pub use config::{ConfigError, DEFAULT_CONFIG_FILE, PlayerConfig};
pub use play::{Input, PlayOptions, parse_input};
