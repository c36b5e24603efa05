use super::helpers::equal;
use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::Scope;
use ahash::AHashSet;
use serde_json::{Map, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

// Hash wrapper consistent with `helpers::equal`: numbers hash by their
// f64 value so 1 and 1.0 collide, and equality folds representation the
// same way.
struct HashedValue<'a>(&'a Value);

impl PartialEq for HashedValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        equal(self.0, other.0)
    }
}

impl Eq for HashedValue<'_> {}

impl Hash for HashedValue<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0 {
            Value::Null => state.write_u32(3_221_225_473), // chosen randomly
            Value::Bool(item) => item.hash(state),
            Value::Number(item) => {
                if let Some(number) = item.as_f64() {
                    number.to_bits().hash(state);
                }
            }
            Value::String(item) => item.hash(state),
            Value::Array(items) => {
                for item in items {
                    HashedValue(item).hash(state);
                }
            }
            Value::Object(items) => {
                // Member order must not influence the hash.
                let mut hash = 0;
                for (key, value) in items {
                    let mut item_hasher = DefaultHasher::default();
                    key.hash(&mut item_hasher);
                    HashedValue(value).hash(&mut item_hasher);
                    hash ^= item_hasher.finish();
                }
                state.write_u64(hash);
            }
        }
    }
}

fn is_unique(items: &[Value]) -> bool {
    let mut seen = AHashSet::with_capacity(items.len());
    items.iter().map(HashedValue).all(move |item| seen.insert(item))
}

pub(crate) struct UniqueItemsValidator;

impl KeywordValidator for UniqueItemsValidator {
    fn keyword(&self) -> &'static str {
        "uniqueItems"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            if !is_unique(items) {
                errors.push(ValidationError::new(
                    "uniqueItems",
                    path,
                    instance,
                    "array items must be unique".to_string(),
                ));
            }
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &ParseContext<'_>,
) -> Option<CompilationResult> {
    match schema {
        Value::Bool(true) => Some(Ok(Box::new(UniqueItemsValidator))),
        _ => None,
    }
}
