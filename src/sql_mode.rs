use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Server SQL modes known to the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqlMode {
    AnsiQuotes,
    HighNotPrecedence,
    PipesAsConcat,
    IgnoreSpace,
    NoBackslashEscapes,
}

/// Set of active SQL modes, usually parsed from the server's `sql_mode` variable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SqlModes {
    modes: HashSet<SqlMode>,
}

impl SqlModes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mode: SqlMode) -> &mut Self {
        self.modes.insert(mode);
        self
    }

    pub fn contains(&self, mode: SqlMode) -> bool {
        self.modes.contains(&mode)
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    /// Backslashes escape characters in strings unless `NO_BACKSLASH_ESCAPES` is set
    pub fn backslash_escapes(&self) -> bool {
        !self.contains(SqlMode::NoBackslashEscapes)
    }
}

impl FromStr for SqlModes {
    type Err = std::convert::Infallible;

    /// Parse a comma separated mode list. Unknown names are skipped.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut result = SqlModes::new();

        for part in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match part.to_uppercase().as_str() {
                "ANSI" | "DB2" | "MAXDB" | "MSSQL" | "ORACLE" | "POSTGRESQL" => {
                    result
                        .insert(SqlMode::AnsiQuotes)
                        .insert(SqlMode::PipesAsConcat)
                        .insert(SqlMode::IgnoreSpace);
                }
                "ANSI_QUOTES" => {
                    result.insert(SqlMode::AnsiQuotes);
                }
                "PIPES_AS_CONCAT" => {
                    result.insert(SqlMode::PipesAsConcat);
                }
                "NO_BACKSLASH_ESCAPES" => {
                    result.insert(SqlMode::NoBackslashEscapes);
                }
                "IGNORE_SPACE" => {
                    result.insert(SqlMode::IgnoreSpace);
                }
                "HIGH_NOT_PRECEDENCE" | "MYSQL323" | "MYSQL40" => {
                    result.insert(SqlMode::HighNotPrecedence);
                }
                other => tracing::trace!(mode = other, "ignoring sql mode without lexer impact"),
            }
        }

        Ok(result)
    }
}
