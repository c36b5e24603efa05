//! RFC 6901 JSON Pointers: applying pointer fragments to documents and
//! accumulating instance locations during validation.
use serde_json::Value;
use std::fmt::Write;

/// A key within a JSON object or an index within a JSON array.
#[derive(Debug, Clone, Copy)]
pub(crate) enum PathChunk<'a> {
    Property(&'a str),
    Index(usize),
}

/// The instance location of the node currently being validated.
///
/// Built as a linked list over stack frames so that descending into an
/// instance never clones the accumulated path; rendering to a pointer
/// string happens only when an error is actually recorded.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InstancePath<'a> {
    chunk: Option<PathChunk<'a>>,
    parent: Option<&'a InstancePath<'a>>,
    base: Option<&'a [String]>,
}

impl<'a> InstancePath<'a> {
    pub(crate) fn new() -> Self {
        InstancePath {
            chunk: None,
            parent: None,
            base: None,
        }
    }

    /// A root path carrying caller-supplied prefix tokens (the `path`
    /// argument of `RootSchema::validate`).
    pub(crate) fn with_base(base: &'a [String]) -> Self {
        InstancePath {
            chunk: None,
            parent: None,
            base: Some(base),
        }
    }

    pub(crate) fn push_property(&'a self, name: &'a str) -> InstancePath<'a> {
        InstancePath {
            chunk: Some(PathChunk::Property(name)),
            parent: Some(self),
            base: None,
        }
    }

    pub(crate) fn push_index(&'a self, index: usize) -> InstancePath<'a> {
        InstancePath {
            chunk: Some(PathChunk::Index(index)),
            parent: Some(self),
            base: None,
        }
    }

    /// Render as a JSON Pointer string; the root location renders as `/`.
    pub(crate) fn pointer(&self) -> String {
        let mut chunks = Vec::new();
        let mut current = Some(self);
        let mut base: Option<&[String]> = None;
        while let Some(node) = current {
            if let Some(chunk) = node.chunk {
                chunks.push(chunk);
            }
            if node.base.is_some() {
                base = node.base;
            }
            current = node.parent;
        }
        chunks.reverse();

        let mut out = String::new();
        if let Some(tokens) = base {
            for token in tokens {
                out.push('/');
                escape_into(&mut out, token);
            }
        }
        for chunk in chunks {
            out.push('/');
            match chunk {
                PathChunk::Property(name) => escape_into(&mut out, name),
                PathChunk::Index(index) => {
                    let _ = write!(out, "{}", index);
                }
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        out
    }
}

fn escape_into(out: &mut String, token: &str) {
    for ch in token.chars() {
        match ch {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(ch),
        }
    }
}

pub(crate) fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Split a pointer into unescaped reference tokens. The empty pointer
/// yields no tokens; anything else must start with `/`.
pub(crate) fn tokens(pointer: &str) -> Option<Vec<String>> {
    if pointer.is_empty() {
        return Some(Vec::new());
    }
    if !pointer.starts_with('/') {
        return None;
    }
    Some(pointer.split('/').skip(1).map(unescape).collect())
}

fn parse_index(s: &str) -> Option<usize> {
    if s.starts_with('+') || (s.starts_with('0') && s.len() != 1) {
        return None;
    }
    s.parse().ok()
}

/// Apply a pointer to a document, descending through object keys and
/// array indices.
pub(crate) fn resolve<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    let mut target = document;
    for token in tokens(pointer)? {
        target = match target {
            Value::Object(map) => map.get(&token)?,
            Value::Array(list) => list.get(parse_index(&token)?)?,
            _ => return None,
        };
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case("", Some(json!({"foo": ["bar", "baz"], "a/b": 1, "m~n": 8})))]
    #[test_case("/foo", Some(json!(["bar", "baz"])))]
    #[test_case("/foo/0", Some(json!("bar")))]
    #[test_case("/foo/2", None)]
    #[test_case("/foo/01", None; "leading zeros are rejected")]
    #[test_case("/a~1b", Some(json!(1)))]
    #[test_case("/m~0n", Some(json!(8)))]
    #[test_case("foo", None; "missing leading slash")]
    fn resolving(pointer: &str, expected: Option<serde_json::Value>) {
        let document = json!({"foo": ["bar", "baz"], "a/b": 1, "m~n": 8});
        assert_eq!(resolve(&document, pointer), expected.as_ref());
    }

    #[test]
    fn root_renders_as_slash() {
        assert_eq!(InstancePath::new().pointer(), "/");
    }

    #[test]
    fn chunks_render_in_order_with_escapes() {
        let root = InstancePath::new();
        let odd = root.push_property("a/b");
        let first = odd.push_index(0);
        assert_eq!(first.pointer(), "/a~1b/0");
    }

    #[test]
    fn base_tokens_prefix_the_path() {
        let base = vec!["data".to_string()];
        let root = InstancePath::with_base(&base);
        let child = root.push_index(3);
        assert_eq!(child.pointer(), "/data/3");
    }
}
