//! Process-wide keyword registry. Builtin keywords dispatch through
//! [`Draft::get_keyword`]; additional constructors may be registered at
//! initialization time and take precedence over builtins. Lookups after
//! startup are read-only.
use crate::draft::Draft;
use crate::keywords::CompileFn;
use ahash::AHashMap;
use parking_lot::RwLock;

lazy_static::lazy_static! {
    static ref CUSTOM_KEYWORDS: RwLock<AHashMap<String, CompileFn>> =
        RwLock::new(AHashMap::new());
}

/// Register a keyword constructor under `name`. Registered constructors
/// apply to every draft and shadow builtins of the same name.
pub(crate) fn register(name: &str, compile: CompileFn) {
    CUSTOM_KEYWORDS.write().insert(name.to_string(), compile);
}

pub(crate) fn lookup(draft: Draft, keyword: &str) -> Option<CompileFn> {
    if let Some(compile) = CUSTOM_KEYWORDS.read().get(keyword) {
        return Some(*compile);
    }
    draft.get_keyword(keyword)
}
