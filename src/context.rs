use crate::draft::{id_of, Draft};
use serde_json::Value;
use std::borrow::Cow;
use url::{ParseError, Url};

/// Parse-time state: the active draft and the base URI scope against
/// which relative identifiers and references resolve.
#[derive(Debug)]
pub(crate) struct ParseContext<'a> {
    pub(crate) scope: Cow<'a, Url>,
    pub(crate) draft: Draft,
}

impl<'a> ParseContext<'a> {
    pub(crate) fn new(scope: Url, draft: Draft) -> Self {
        ParseContext {
            scope: Cow::Owned(scope),
            draft,
        }
    }

    /// Enter a subschema. A subschema carrying an identifier moves the
    /// scope, so that identifiers and references inside it resolve
    /// relative to the new base.
    pub(crate) fn push(&'a self, schema: &Value) -> ParseContext<'a> {
        match id_of(self.draft, schema)
            .and_then(|id| Url::options().base_url(Some(&self.scope)).parse(id).ok())
        {
            Some(scope) => ParseContext {
                scope: Cow::Owned(scope),
                draft: self.draft,
            },
            None => ParseContext {
                scope: Cow::Borrowed(self.scope.as_ref()),
                draft: self.draft,
            },
        }
    }

    /// Resolve a URI reference against the current scope.
    pub(crate) fn build_url(&self, reference: &str) -> Result<Url, ParseError> {
        Url::options().base_url(Some(&self.scope)).parse(reference)
    }
}
