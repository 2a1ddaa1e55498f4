//! Command and query interface for schema canvas sessions.
//!
//! This crate defines the typed command language for every canvas
//! operation. Commands are serializable, so a session can be driven
//! from recorded gesture logs or scripts.
//!
//! # Example
//! ```ignore
//! use api::{Command, execute_command};
//!
//! let cmd = Command::Pan { delta: ScreenDelta::new(10.0, -5.0) };
//! let result = execute_command(&mut canvas, cmd);
//! ```

mod command;
mod executor;
mod query;

pub use command::*;
pub use executor::{execute_command, execute_query, process_message};
pub use query::*;
