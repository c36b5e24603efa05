//! The recursive schema data model: parsing JSON documents into keyword
//! validator trees and driving the validation traversal.
use crate::context::ParseContext;
use crate::draft::{draft_from_schema, id_of, Draft};
use crate::error::{FetchError, ParseError, ValidationError};
use crate::keywords::BoxedKeyword;
use crate::pointer::{self, InstancePath};
use crate::pool::{self, pool_key, SharedPool, DEFAULT_ROOT_URL, DEFAULT_SCOPE};
use crate::registry;
use crate::resolver::{self, Fetch, Reference};
use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::ops::Deref;
use std::sync::Arc;
use url::Url;

/// Members that carry schema metadata rather than constraints.
const METADATA_KEYWORDS: &[&str] = &[
    "$schema",
    "$ref",
    "title",
    "description",
    "$comment",
    "default",
    "examples",
];

/// A single schema node: metadata, an optional `$ref`, and keyword
/// validators in source order. All keywords at a node are conjunctive.
///
/// The bare booleans `true` and `false` are first-class schemas: `true`
/// admits every instance, `false` admits none.
#[derive(Debug)]
pub struct Schema {
    pub(crate) source: Value,
    pub(crate) draft: Draft,
    pub(crate) scope: Url,
    boolean: Option<bool>,
    id: Option<Url>,
    title: Option<String>,
    description: Option<String>,
    comment: Option<String>,
    default: Option<Value>,
    reference: Option<Reference>,
    validators: Vec<BoxedKeyword>,
    pub(crate) fragments: RwLock<AHashMap<String, Arc<Schema>>>,
}

/// Validation state threaded through the traversal: the document that
/// pointer references currently resolve against, the pool for remote
/// ones, and the visited set that breaks reference cycles.
pub(crate) struct Scope<'a> {
    pub(crate) root: Arc<Schema>,
    pub(crate) pool: &'a SharedPool,
    pub(crate) strict_refs: bool,
    pub(crate) visited: AHashSet<(usize, usize)>,
}

impl Schema {
    pub(crate) fn parse(value: &Value, context: &ParseContext<'_>) -> Result<Schema, ParseError> {
        let object = match value {
            Value::Bool(boolean) => {
                return Ok(Schema {
                    source: value.clone(),
                    draft: context.draft,
                    scope: context.scope.clone().into_owned(),
                    boolean: Some(*boolean),
                    id: None,
                    title: None,
                    description: None,
                    comment: None,
                    default: None,
                    reference: None,
                    validators: Vec::new(),
                    fragments: RwLock::default(),
                })
            }
            Value::Object(object) => object,
            _ => return Err(ParseError::InvalidDocument),
        };

        let context = context.push(value);
        let id = id_of(context.draft, value).map(|_| context.scope.clone().into_owned());

        let reference = match object.get("$ref") {
            Some(Value::String(reference)) => Some(Reference::parse(reference, &context)?),
            Some(_) => return Err(ParseError::keyword("$ref")),
            None => None,
        };

        let mut validators = Vec::with_capacity(object.len());
        for (keyword, member) in object {
            if keyword == context.draft.id_keyword() || METADATA_KEYWORDS.contains(&keyword.as_str())
            {
                continue;
            }
            // Members absent from the registry are retained as opaque
            // metadata in `source` and validate as no-ops.
            if let Some(compile) = registry::lookup(context.draft, keyword) {
                if let Some(result) = compile(object, member, &context) {
                    validators.push(result?);
                }
            }
        }

        Ok(Schema {
            source: value.clone(),
            draft: context.draft,
            scope: context.scope.clone().into_owned(),
            boolean: None,
            id,
            title: string_member(object.get("title")),
            description: string_member(object.get("description")),
            comment: string_member(object.get("$comment")),
            default: object.get("default").cloned(),
            reference,
            validators,
            fragments: RwLock::default(),
        })
    }

    /// The string value of this node's `type` keyword when it is a
    /// single string, `"unknown"` otherwise.
    pub fn top_level_type(&self) -> &str {
        self.source
            .get("type")
            .and_then(Value::as_str)
            .unwrap_or("unknown")
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// The verbatim `$ref` member, if any.
    pub fn reference_str(&self) -> Option<&str> {
        self.reference.as_ref().map(|r| r.source.as_str())
    }

    pub(crate) fn reference(&self) -> Option<&Reference> {
        self.reference.as_ref()
    }

    pub(crate) fn validators(&self) -> &[BoxedKeyword] {
        &self.validators
    }

    pub(crate) fn validate_in(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(allowed) = self.boolean {
            if !allowed {
                errors.push(ValidationError::new(
                    "false",
                    path,
                    instance,
                    "false schema always fails".to_string(),
                ));
            }
            return;
        }
        if let Some(reference) = &self.reference {
            resolver::delegate(reference, scope, instance, path, errors);
            // The strict draft reading ignores everything beside `$ref`;
            // the default keeps validating siblings.
            if scope.strict_refs {
                return;
            }
        }
        for validator in &self.validators {
            validator.validate(scope, instance, path, errors);
        }
    }

    pub(crate) fn is_valid_in(&self, scope: &mut Scope<'_>, instance: &Value) -> bool {
        let mut errors = Vec::new();
        self.validate_in(scope, instance, &InstancePath::new(), &mut errors);
        errors.is_empty()
    }
}

fn string_member(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.source.serialize(serializer)
    }
}

/// A parsed schema document: a [`Schema`] plus the pool it resolves
/// remote references through. Immutable after parse; concurrent
/// validations share it freely.
#[derive(Debug)]
pub struct RootSchema {
    schema: Arc<Schema>,
    draft: Draft,
    pool: SharedPool,
    strict_refs: bool,
}

/// Knobs for parsing. `draft` overrides `$schema` detection;
/// `strict_refs` switches `$ref` to the strict draft reading where
/// sibling keywords are ignored.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseOptions {
    draft: Option<Draft>,
    strict_refs: bool,
}

impl ParseOptions {
    pub fn new() -> ParseOptions {
        ParseOptions::default()
    }

    #[must_use]
    pub fn draft(mut self, draft: Draft) -> ParseOptions {
        self.draft = Some(draft);
        self
    }

    #[must_use]
    pub fn strict_refs(mut self, strict: bool) -> ParseOptions {
        self.strict_refs = strict;
        self
    }
}

impl RootSchema {
    /// Parse a schema document from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<RootSchema, ParseError> {
        RootSchema::from_bytes_with(bytes, ParseOptions::default())
    }

    pub fn from_bytes_with(bytes: &[u8], options: ParseOptions) -> Result<RootSchema, ParseError> {
        let value: Value = serde_json::from_slice(bytes).map_err(map_json_error)?;
        RootSchema::from_value_with(&value, options)
    }

    /// Parse a schema document from an already-decoded JSON value.
    pub fn from_value(value: &Value) -> Result<RootSchema, ParseError> {
        RootSchema::from_value_with(value, ParseOptions::default())
    }

    pub fn from_value_with(value: &Value, options: ParseOptions) -> Result<RootSchema, ParseError> {
        let draft = options
            .draft
            .or_else(|| draft_from_schema(value))
            .unwrap_or_default();
        let scope = match id_of(draft, value) {
            Some(id) => Url::options().base_url(Some(&DEFAULT_SCOPE)).parse(id)?,
            None => DEFAULT_SCOPE.clone(),
        };
        let context = ParseContext::new(scope, draft);
        let schema = Arc::new(Schema::parse(value, &context)?);

        let root = RootSchema {
            schema,
            draft,
            pool: pool::default_pool(),
            strict_refs: options.strict_refs,
        };
        root.register();
        Ok(root)
    }

    /// Make this document, and every subschema carrying an identifier,
    /// reachable from other documents. Identified subschemas are
    /// documents in their own right, so they enter the pool as fresh
    /// roots parsed under their identifier scope.
    fn register(&self) {
        if let Some(id) = self.id() {
            let key = pool_key(id);
            if key != DEFAULT_ROOT_URL {
                self.pool
                    .write()
                    .entry(key)
                    .or_insert_with(|| Arc::clone(&self.schema));
            }
        }

        let mut stack: Vec<&Schema> = Vec::new();
        for validator in self.schema.validators() {
            validator.walk(&mut |sub| stack.push(sub));
        }
        while let Some(node) = stack.pop() {
            if let Some(id) = &node.id {
                let key = pool_key(id);
                if key != DEFAULT_ROOT_URL && !self.pool.read().contains_key(&key) {
                    let context = ParseContext::new(node.scope.clone(), node.draft);
                    if let Ok(parsed) = Schema::parse(&node.source, &context) {
                        self.pool
                            .write()
                            .entry(key)
                            .or_insert_with(|| Arc::new(parsed));
                    }
                }
            }
            for validator in node.validators() {
                validator.walk(&mut |sub| stack.push(sub));
            }
        }
    }

    /// Swap the pool this root resolves against. Used by tests to keep
    /// remote documents out of the process-wide default pool.
    pub(crate) fn set_pool(&mut self, pool: SharedPool) {
        self.pool = pool;
        self.register();
    }

    pub(crate) fn pool(&self) -> &SharedPool {
        &self.pool
    }

    pub(crate) fn schema_arc(&self) -> Arc<Schema> {
        Arc::clone(&self.schema)
    }

    pub(crate) fn id(&self) -> Option<&Url> {
        self.schema.id.as_ref()
    }

    pub fn draft(&self) -> Draft {
        self.draft
    }

    /// Eagerly retrieve every remote document referenced from this
    /// schema tree, using plain HTTP GET.
    pub fn fetch_remote_references(&self) -> Result<(), FetchError> {
        #[cfg(feature = "remote")]
        let fetcher = resolver::HttpFetcher;
        #[cfg(not(feature = "remote"))]
        let fetcher = resolver::DisabledFetcher;
        self.fetch_remote_references_with(&fetcher)
    }

    /// Same as [`fetch_remote_references`](Self::fetch_remote_references)
    /// with an injected fetcher.
    pub fn fetch_remote_references_with(&self, fetcher: &dyn Fetch) -> Result<(), FetchError> {
        resolver::fetch_remote_references(self, fetcher)
    }

    /// Validate `instance`, appending one error per keyword failure to
    /// `errors`. `path` is the pointer prefix reported for the root
    /// location; callers conventionally pass `"/"`.
    pub fn validate(&self, path: &str, instance: &Value, errors: &mut Vec<ValidationError>) {
        let base = pointer::tokens(path.trim_end_matches('/')).unwrap_or_default();
        let instance_path = InstancePath::with_base(&base);
        let mut scope = Scope {
            root: Arc::clone(&self.schema),
            pool: &self.pool,
            strict_refs: self.strict_refs,
            visited: AHashSet::new(),
        };
        self.schema
            .validate_in(&mut scope, instance, &instance_path, errors);
    }

    /// Parse `bytes` as a JSON instance and validate it. The returned
    /// list is empty for conforming instances; a malformed document is a
    /// parse error, not a validation error.
    pub fn validate_bytes(&self, bytes: &[u8]) -> Result<Vec<ValidationError>, ParseError> {
        let instance: Value = serde_json::from_slice(bytes).map_err(map_json_error)?;
        let mut errors = Vec::new();
        self.validate("/", &instance, &mut errors);
        Ok(errors)
    }

    pub fn is_valid(&self, instance: &Value) -> bool {
        let mut errors = Vec::new();
        self.validate("/", instance, &mut errors);
        errors.is_empty()
    }
}

impl Deref for RootSchema {
    type Target = Schema;

    fn deref(&self) -> &Schema {
        &self.schema
    }
}

impl Serialize for RootSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.schema.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RootSchema {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<RootSchema, D::Error> {
        let value = Value::deserialize(deserializer)?;
        RootSchema::from_value(&value).map_err(serde::de::Error::custom)
    }
}

/// Parse a schema from a string, panicking on failure. The only entry
/// point that may terminate the process; intended for compile-time-known
/// schemas.
///
/// ```should_panic
/// jsonvet::must("");  // panics: unexpected end of JSON input
/// ```
#[must_use]
pub fn must(source: &str) -> RootSchema {
    match RootSchema::from_bytes(source.as_bytes()) {
        Ok(schema) => schema,
        Err(error) => panic!("{}", error),
    }
}

pub(crate) fn map_json_error(error: serde_json::Error) -> ParseError {
    if error.is_eof() {
        ParseError::UnexpectedEndOfInput
    } else {
        ParseError::Json(error)
    }
}
