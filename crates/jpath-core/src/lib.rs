//! # jpath-core
//!
//! An in-memory JSON value model with a JSONPath-style query engine.
//!
//! Documents parse into an immutable, insertion-order-preserving [`Value`]
//! tree that keeps the Integer/Double distinction from the input. Queries
//! compile once into a [`JsonPath`] step list and evaluate against any tree,
//! collapsing the matches into a single value or a synthesized array.
//!
//! ## Quick start
//!
//! ```rust
//! use jpath_core::{parse_str, JsonPath};
//!
//! let doc = parse_str(r#"{"books":[{"title":"A"},{"title":"B"}]}"#).unwrap();
//! let path = JsonPath::compile("$.books[*].title").unwrap();
//!
//! let titles = path.query(&doc).unwrap();
//! assert_eq!(titles.as_array().unwrap().len(), 2);
//! assert_eq!(titles.at(0).unwrap().string_value(), "A");
//! ```
//!
//! One-off queries can skip the explicit compile step:
//!
//! ```rust
//! use jpath_core::parse_str;
//!
//! let doc = parse_str(r#"[10, 20, 30]"#).unwrap();
//! let last = doc.query("$[-1]").unwrap().unwrap();
//! assert_eq!(last.integer_value(), 30);
//! ```
//!
//! ## Modules
//!
//! - [`value`] — the tagged [`Value`] model and its accessor contract
//! - [`codec`] — bytes/text ⇄ `Value` boundary (serde_json-backed)
//! - [`path`] — JSONPath compiler ([`JsonPath::compile`])
//! - [`eval`] — evaluator and the 0/1/N result projection
//! - [`error`] — [`JsonError`]
//!
//! All operations are synchronous and pure over immutable inputs: trees and
//! compiled paths may be shared freely across threads.

pub mod codec;
pub mod error;
pub mod eval;
pub mod path;
pub mod value;

pub use codec::{parse, parse_str, serialize, to_json_string, to_json_string_pretty};
pub use error::{JsonError, Result};
pub use eval::project;
pub use path::JsonPath;
pub use value::{Kind, Value};
