use crate::pointer::InstancePath;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// An error raised while turning a JSON document into a schema tree.
///
/// Parse errors abort the operation; they are never mixed into the
/// validation error sink.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unexpected end of JSON input")]
    UnexpectedEndOfInput,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("schema should be an object or boolean")]
    InvalidDocument,
    #[error("invalid value for \"{keyword}\" keyword")]
    InvalidKeyword { keyword: &'static str },
    #[error("invalid regular expression \"{pattern}\": {message}")]
    InvalidRegex { pattern: String, message: String },
    #[error(transparent)]
    InvalidUri(#[from] url::ParseError),
}

impl ParseError {
    pub(crate) fn keyword(keyword: &'static str) -> ParseError {
        ParseError::InvalidKeyword { keyword }
    }
}

/// An error raised while fetching remote schema documents into the pool.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unsupported reference scheme \"{scheme}\" in {uri}")]
    UnsupportedScheme { scheme: String, uri: String },
    #[error("no fetcher available for {uri}")]
    NoFetcher { uri: String },
    #[error("fetching {uri}: {message}")]
    Fetch { uri: String, message: String },
    #[error("parsing document fetched from {uri}: {source}")]
    Parse {
        uri: String,
        #[source]
        source: ParseError,
    },
    #[error(transparent)]
    InvalidUri(#[from] url::ParseError),
}

/// A single keyword failure, tagged with the instance location where it
/// was observed.
///
/// The string form is `<path>: <echo> <message>`, where `<echo>` is the
/// compact JSON of the offending instance truncated to 20 bytes (and
/// omitted when the instance is `null`):
///
/// ```text
/// /: {"firstName":"Prince... "lastName" value is required
/// /friends/0: {"firstName":"Nas"} "lastName" value is required
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    path: String,
    keyword: &'static str,
    message: String,
    instance: Option<String>,
}

const ECHO_LIMIT: usize = 20;

fn echo(instance: &Value) -> Option<String> {
    if instance.is_null() {
        return None;
    }
    let mut text = instance.to_string();
    if text.len() > ECHO_LIMIT {
        let mut cut = ECHO_LIMIT;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    Some(text)
}

impl ValidationError {
    pub(crate) fn new(
        keyword: &'static str,
        path: &InstancePath<'_>,
        instance: &Value,
        message: String,
    ) -> ValidationError {
        ValidationError {
            path: path.pointer(),
            keyword,
            message,
            instance: echo(instance),
        }
    }

    /// JSON Pointer to the instance node that failed, `/` for the root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Name of the keyword that produced the error, e.g. `required`.
    pub fn keyword(&self) -> &'static str {
        self.keyword
    }

    /// The keyword-specific sentence.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Truncated compact JSON of the offending instance fragment, absent
    /// for `null` instances.
    pub fn instance_fragment(&self) -> Option<&str> {
        self.instance.as_deref()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.path)?;
        if let Some(fragment) = &self.instance {
            write!(f, "{} ", fragment)?;
        }
        f.write_str(&self.message)
    }
}

impl std::error::Error for ValidationError {}
