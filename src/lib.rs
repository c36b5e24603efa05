//! # jsonvet
//!
//! A JSON Schema validator for drafts 3, 4, 6 and 7. Schema documents
//! compile into a tree of keyword validators; validation walks an
//! instance depth-first and reports every keyword failure with the
//! JSON Pointer of the instance node where it was observed.
//!
//! `$ref` resolves through a pool of parsed documents: pointer-only
//! references resolve against the containing root, absolute ones
//! against pooled documents retrieved up front by
//! [`RootSchema::fetch_remote_references`]. Recursive schemas such as
//! `{"items": {"$ref": "#"}}` are handled without re-fetching or
//! unbounded re-entry.
//!
//! ## Example
//!
//! ```rust
//! use jsonvet::must;
//!
//! let schema = must(r#"{
//!     "type": "object",
//!     "properties": {"name": {"type": "string"}},
//!     "required": ["name"]
//! }"#);
//!
//! let errors = schema.validate_bytes(br#"{"age": 41}"#).unwrap();
//! assert_eq!(errors[0].to_string(), r#"/: {"age":41} "name" value is required"#);
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::redundant_closure,
    clippy::explicit_iter_loop,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::print_stdout,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications
)]
mod context;
mod draft;
mod ecma;
mod error;
mod formats;
mod keywords;
mod pointer;
mod pool;
mod primitive_type;
mod registry;
mod resolver;
mod schema;

pub use draft::{draft_from_schema, draft_from_url, Draft};
pub use error::{FetchError, ParseError, ValidationError};
pub use formats::{register_format, FormatCheck};
pub use primitive_type::{data_type, PrimitiveType};
#[cfg(feature = "remote")]
pub use resolver::HttpFetcher;
pub use resolver::{DisabledFetcher, Fetch};
pub use schema::{must, ParseOptions, RootSchema, Schema};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn the_front_door() {
        let schema = must(r#"{"minLength": 5}"#);
        assert!(schema.is_valid(&json!("foobar")));
        assert!(!schema.is_valid(&json!("foo")));
    }
}
