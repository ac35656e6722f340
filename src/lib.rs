pub mod config;
pub mod range;
pub mod result;
pub mod scanner;
pub mod sql_mode;
pub mod statements;
pub mod str_utils;
pub mod version;
#[cfg(feature = "worker")]
pub mod worker;

// Re-export types for convenience
pub use config::{SplitterConfig, VersionValue};
pub use range::{StatementFinishState, StatementRange, TextSpan};
pub use result::{Result, SplitterError};
pub use scanner::{StatementSplitter, determine_statement_ranges};
pub use sql_mode::{SqlMode, SqlModes};
pub use statements::{Statement, executable_statements, statement_index_from_position};
pub use version::{DOLLAR_QUOTE_MIN_VERSION, normalize_version, parse_version};
