//! CI Build Log Line Parsing
//!
//! Turns raw build log lines (ANSI escape sequences included) into styled
//! segments and decides whether a line is *notable*, i.e. carries a failure
//! or success marker that deserves an entry in the log minimap.
//!
//! # Example
//!
//! ```
//! use ci_tail_ansi::{parse_line, Severity};
//!
//! let line = parse_line("\x1b[31mFAILED\x1b[0m test_cursor\n");
//! assert_eq!(line.severity, Severity::Failure);
//! assert_eq!(line.plain_text(), "FAILED test_cursor");
//! ```

mod ansi;
mod commands;
mod parser;
mod types;

pub use ansi::parse_ansi_line;
pub use commands::parse_command;
pub use parser::{classify, parse_line};
pub use types::*;
