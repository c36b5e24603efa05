//! `$ref` resolution. References are resolved lazily at validate time
//! against the current root and the schema pool; remote documents are
//! brought into the pool eagerly by [`fetch_remote_references`], which
//! walks the schema tree and retrieves every absolute reference through
//! an injected [`Fetch`] implementation.
use crate::context::ParseContext;
use crate::draft::{draft_from_schema, Draft};
use crate::error::{FetchError, ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::pool::{pool_key, DEFAULT_ROOT_URL};
use crate::schema::{map_json_error, RootSchema, Schema, Scope};
use ahash::AHashSet;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// A `$ref` member, kept verbatim and pre-resolved against the scope it
/// was parsed under.
#[derive(Debug, Clone)]
pub(crate) struct Reference {
    pub(crate) source: String,
    pub(crate) target: ResolvedRef,
}

#[derive(Debug, Clone)]
pub(crate) enum ResolvedRef {
    /// Pointer into whichever document is the root at validate time.
    Pointer(String),
    /// Absolute document URI plus a pointer into that document.
    Remote { uri: String, fragment: String },
}

impl Reference {
    pub(crate) fn parse(
        reference: &str,
        context: &ParseContext<'_>,
    ) -> Result<Reference, ParseError> {
        let target = if let Some(fragment) = reference.strip_prefix('#') {
            ResolvedRef::Pointer(decode_fragment(fragment)?)
        } else {
            let url = context.build_url(reference)?;
            let fragment = decode_fragment(url.fragment().unwrap_or(""))?;
            ResolvedRef::Remote {
                uri: pool_key(&url),
                fragment,
            }
        };
        Ok(Reference {
            source: reference.to_string(),
            target,
        })
    }
}

fn decode_fragment(fragment: &str) -> Result<String, ParseError> {
    percent_decode_str(fragment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| ParseError::keyword("$ref"))
}

/// Delegate validation of `instance` to the referent. Re-entry on the
/// same `(schema, instance node)` pair terminates silently; that is what
/// makes `{"$ref": "#"}` safe on recursive schemas.
pub(crate) fn delegate(
    reference: &Reference,
    scope: &mut Scope<'_>,
    instance: &Value,
    path: &InstancePath<'_>,
    errors: &mut Vec<ValidationError>,
) {
    match &reference.target {
        ResolvedRef::Pointer(fragment) => {
            let root = Arc::clone(&scope.root);
            match resolve_fragment(&root, fragment) {
                Some(target) => validate_target(&target, scope, instance, path, errors),
                None => errors.push(unresolved(reference, path, instance)),
            }
        }
        ResolvedRef::Remote { uri, fragment } => {
            let pooled = scope.pool.read().get(uri).cloned();
            match pooled {
                Some(remote_root) => match resolve_fragment(&remote_root, fragment) {
                    Some(target) => {
                        let saved = std::mem::replace(&mut scope.root, remote_root);
                        validate_target(&target, scope, instance, path, errors);
                        scope.root = saved;
                    }
                    None => errors.push(unresolved(reference, path, instance)),
                },
                None => {
                    log::debug!("reference {} not found in schema pool", uri);
                    errors.push(unresolved(reference, path, instance));
                }
            }
        }
    }
}

fn validate_target(
    target: &Arc<Schema>,
    scope: &mut Scope<'_>,
    instance: &Value,
    path: &InstancePath<'_>,
    errors: &mut Vec<ValidationError>,
) {
    let key = (
        Arc::as_ptr(target) as usize,
        instance as *const Value as usize,
    );
    if !scope.visited.insert(key) {
        return;
    }
    target.validate_in(scope, instance, path, errors);
    scope.visited.remove(&key);
}

fn unresolved(
    reference: &Reference,
    path: &InstancePath<'_>,
    instance: &Value,
) -> ValidationError {
    ValidationError::new(
        "$ref",
        path,
        instance,
        format!("unable to resolve reference \"{}\"", reference.source),
    )
}

/// Resolve a pointer fragment to a schema node within `root`. Parsed
/// fragments are cached on the root so that recursive references reuse
/// one identity instead of re-parsing per instance level.
pub(crate) fn resolve_fragment(root: &Arc<Schema>, fragment: &str) -> Option<Arc<Schema>> {
    if fragment.is_empty() {
        return Some(Arc::clone(root));
    }
    if let Some(cached) = root.fragments.read().get(fragment) {
        return Some(Arc::clone(cached));
    }
    let value = crate::pointer::resolve(&root.source, fragment)?;
    let context = ParseContext::new(root.scope.clone(), root.draft);
    let schema = Schema::parse(value, &context).ok()?;
    let mut cache = root.fragments.write();
    let entry = cache
        .entry(fragment.to_string())
        .or_insert_with(|| Arc::new(schema));
    Some(Arc::clone(entry))
}

/// Retrieves schema documents by absolute URI. Implementations should
/// cache; the engine will not re-request a URI within one fetch pass.
pub trait Fetch: Send + Sync {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError>;
}

/// Plain HTTP GET fetcher, the default for `fetch_remote_references`.
#[cfg(feature = "remote")]
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpFetcher;

#[cfg(feature = "remote")]
impl Fetch for HttpFetcher {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        let url = Url::parse(uri)?;
        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(FetchError::UnsupportedScheme {
                    scheme: scheme.to_string(),
                    uri: uri.to_string(),
                })
            }
        }
        let response = reqwest::blocking::get(uri).map_err(|error| FetchError::Fetch {
            uri: uri.to_string(),
            message: error.to_string(),
        })?;
        let bytes = response.bytes().map_err(|error| FetchError::Fetch {
            uri: uri.to_string(),
            message: error.to_string(),
        })?;
        Ok(bytes.to_vec())
    }
}

/// Stand-in used when the crate is built without HTTP support; it only
/// errors if a remote document actually needs retrieval.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledFetcher;

impl Fetch for DisabledFetcher {
    fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::NoFetcher {
            uri: uri.to_string(),
        })
    }
}

/// Walk the schema tree, fetch every remote reference that is not yet in
/// the pool, and recurse into fetched documents for their own
/// references.
pub(crate) fn fetch_remote_references(
    root: &RootSchema,
    fetcher: &dyn Fetch,
) -> Result<(), FetchError> {
    if let Some(id) = root.id() {
        let key = pool_key(id);
        if key != DEFAULT_ROOT_URL {
            root.pool()
                .write()
                .entry(key)
                .or_insert_with(|| root.schema_arc());
        }
    }

    let mut seen: AHashSet<String> = AHashSet::new();
    let mut pending = collect_remote_uris(root);
    while let Some(uri) = pending.pop() {
        if !seen.insert(uri.clone()) {
            continue;
        }
        let pooled = root.pool().read().get(&uri).cloned();
        let document = match pooled {
            Some(document) => document,
            None => {
                log::debug!("fetching remote schema {}", uri);
                let bytes = fetcher.fetch(&uri)?;
                let document = parse_fetched(&bytes, &uri, root.draft()).map_err(|source| {
                    FetchError::Parse {
                        uri: uri.clone(),
                        source,
                    }
                })?;
                root.pool()
                    .write()
                    .entry(uri.clone())
                    .or_insert_with(|| Arc::clone(&document));
                document
            }
        };
        pending.extend(collect_remote_uris(&document));
    }
    Ok(())
}

fn parse_fetched(bytes: &[u8], uri: &str, fallback: Draft) -> Result<Arc<Schema>, ParseError> {
    let value: Value = serde_json::from_slice(bytes).map_err(map_json_error)?;
    let draft = draft_from_schema(&value).unwrap_or(fallback);
    let context = ParseContext::new(Url::parse(uri)?, draft);
    Ok(Arc::new(Schema::parse(&value, &context)?))
}

fn collect_remote_uris(schema: &Schema) -> Vec<String> {
    let mut uris = Vec::new();
    let mut stack = vec![schema];
    while let Some(node) = stack.pop() {
        if let Some(Reference {
            target: ResolvedRef::Remote { uri, .. },
            ..
        }) = node.reference()
        {
            uris.push(uri.clone());
        }
        for validator in node.validators() {
            validator.walk(&mut |sub| stack.push(sub));
        }
    }
    uris
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::DEFAULT_SCOPE;

    fn context() -> ParseContext<'static> {
        ParseContext::new(DEFAULT_SCOPE.clone(), Draft::Draft7)
    }

    #[test]
    fn pointer_references_stay_local() {
        let reference = Reference::parse("#/definitions/a", &context()).unwrap();
        match reference.target {
            ResolvedRef::Pointer(fragment) => assert_eq!(fragment, "/definitions/a"),
            other => panic!("expected pointer target, got {:?}", other),
        }
    }

    #[test]
    fn absolute_references_split_into_uri_and_fragment() {
        let reference =
            Reference::parse("http://example.com/item.json#/definitions/a", &context()).unwrap();
        match reference.target {
            ResolvedRef::Remote { uri, fragment } => {
                assert_eq!(uri, "http://example.com/item.json");
                assert_eq!(fragment, "/definitions/a");
            }
            other => panic!("expected remote target, got {:?}", other),
        }
    }

    #[test]
    fn percent_encoded_fragments_are_decoded() {
        let reference = Reference::parse("#/definitions/per%25cent", &context()).unwrap();
        match reference.target {
            ResolvedRef::Pointer(fragment) => assert_eq!(fragment, "/definitions/per%cent"),
            other => panic!("expected pointer target, got {:?}", other),
        }
    }

    struct MapFetcher(Vec<(&'static str, &'static str)>);

    impl Fetch for MapFetcher {
        fn fetch(&self, uri: &str) -> Result<Vec<u8>, FetchError> {
            self.0
                .iter()
                .find(|(known, _)| *known == uri)
                .map(|(_, body)| body.as_bytes().to_vec())
                .ok_or_else(|| FetchError::Fetch {
                    uri: uri.to_string(),
                    message: "not found".to_string(),
                })
        }
    }

    #[test]
    fn remote_references_fetch_into_the_pool() {
        use serde_json::json;

        let mut root = RootSchema::from_value(
            &json!({"type": "array", "items": {"$ref": "http://example.com/int.json"}}),
        )
        .unwrap();
        root.set_pool(crate::pool::fresh_pool());

        let fetcher = MapFetcher(vec![
            (
                "http://example.com/int.json",
                r##"{"allOf": [{"$ref": "http://example.com/pos.json"}], "type": "integer"}"##,
            ),
            ("http://example.com/pos.json", r#"{"minimum": 0}"#),
        ]);
        root.fetch_remote_references_with(&fetcher).unwrap();

        assert!(root.is_valid(&json!([1, 2])));
        assert!(!root.is_valid(&json!(["x"])));
        assert!(!root.is_valid(&json!([-4])));
    }

    #[test]
    fn fetch_failures_surface_as_fetch_errors() {
        use serde_json::json;

        let mut root =
            RootSchema::from_value(&json!({"$ref": "http://example.com/missing.json"})).unwrap();
        root.set_pool(crate::pool::fresh_pool());
        let result = root.fetch_remote_references_with(&MapFetcher(Vec::new()));
        assert!(matches!(result, Err(FetchError::Fetch { .. })));
    }

    #[test]
    fn unfetched_remote_references_report_a_validation_error() {
        use serde_json::json;

        let mut root =
            RootSchema::from_value(&json!({"$ref": "http://example.com/never.json"})).unwrap();
        root.set_pool(crate::pool::fresh_pool());
        let mut errors = Vec::new();
        root.validate("/", &json!(1), &mut errors);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].keyword(), "$ref");
        assert!(errors[0].message().contains("unable to resolve reference"));
    }

    #[test]
    fn meta_schema_references_resolve_from_the_seeded_pool() {
        use serde_json::json;

        let root =
            RootSchema::from_value(&json!({"$ref": "http://json-schema.org/draft-07/schema#"}))
                .unwrap();
        // A fetch pass is a no-op: the document is already pooled.
        root.fetch_remote_references_with(&MapFetcher(Vec::new()))
            .unwrap();
        assert!(root.is_valid(&json!({"type": "string"})));
        assert!(!root.is_valid(&json!({"type": 12})));
    }
}
