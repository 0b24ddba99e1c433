//! Error types for parsing and query compilation.

use thiserror::Error;

/// Errors surfaced by the parse boundary and the JSONPath compiler.
///
/// "No match" and lenient-accessor type mismatches are deliberately *not*
/// errors; they are documented absent/default results. Evaluating a compiled
/// path cannot fail either — the typed step list makes a malformed program
/// unrepresentable.
#[derive(Error, Debug)]
pub enum JsonError {
    /// The input bytes were not valid JSON. The underlying error carries the
    /// 1-based line and column where parsing stopped.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The JSONPath query string was malformed.
    /// `pos` is the byte offset where the error was detected.
    #[error("JSONPath syntax error at offset {pos}: {message}")]
    PathSyntax { pos: usize, message: String },
}

/// Convenience alias used throughout jpath-core.
pub type Result<T> = std::result::Result<T, JsonError>;
