//! The schema pool: absolute URI -> parsed root schema. Consulted on
//! `$ref`, extended by identifiers seen at parse time and by the
//! remote-fetch pass. A process-wide default pool is seeded with the
//! standard draft meta-schemas so references to them never hit the
//! network.
use crate::context::ParseContext;
use crate::draft::Draft;
use crate::schema::Schema;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;
use url::Url;

/// Scope given to documents that carry no identifier of their own.
pub(crate) const DEFAULT_ROOT_URL: &str = "json-schema:///";

pub(crate) type SchemaPool = AHashMap<String, Arc<Schema>>;
pub(crate) type SharedPool = Arc<RwLock<SchemaPool>>;

lazy_static::lazy_static! {
    pub(crate) static ref DEFAULT_SCOPE: Url =
        Url::parse(DEFAULT_ROOT_URL).expect("default scope is a valid URL");
    static ref DEFAULT_POOL: SharedPool = Arc::new(RwLock::new(seeded_pool()));
}

/// Handle to the process-wide pool. Roots parsed without an explicit
/// pool share this one.
pub(crate) fn default_pool() -> SharedPool {
    Arc::clone(&DEFAULT_POOL)
}

/// A fresh pool carrying only the meta-schema seeds; used to isolate
/// tests from the process-wide pool.
pub(crate) fn fresh_pool() -> SharedPool {
    Arc::new(RwLock::new(seeded_pool()))
}

/// Normalize a pool key: the canonical URI of a document has no
/// fragment.
pub(crate) fn pool_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_fragment(None);
    key.to_string()
}

const META_SCHEMAS: &[(&str, Draft, &str)] = &[
    (
        "http://json-schema.org/draft-04/schema",
        Draft::Draft4,
        include_str!("meta/draft-04.json"),
    ),
    (
        "http://json-schema.org/draft-06/schema",
        Draft::Draft6,
        include_str!("meta/draft-06.json"),
    ),
    (
        "http://json-schema.org/draft-07/schema",
        Draft::Draft7,
        include_str!("meta/draft-07.json"),
    ),
];

fn seeded_pool() -> SchemaPool {
    let mut pool = SchemaPool::with_capacity(META_SCHEMAS.len());
    for (uri, draft, text) in META_SCHEMAS {
        let value = serde_json::from_str(text).expect("embedded meta-schema is valid JSON");
        let scope = Url::parse(uri).expect("embedded meta-schema URI is valid");
        let context = ParseContext::new(scope, *draft);
        let schema =
            Schema::parse(&value, &context).expect("embedded meta-schema parses as a schema");
        pool.insert((*uri).to_string(), Arc::new(schema));
    }
    pool
}
