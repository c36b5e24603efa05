use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MaxItemsValidator {
    limit: usize,
}

impl KeywordValidator for MaxItemsValidator {
    fn keyword(&self) -> &'static str {
        "maxItems"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            if items.len() > self.limit {
                errors.push(ValidationError::new(
                    "maxItems",
                    path,
                    instance,
                    format!("array has more than {} items", self.limit),
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
    match schema.as_u64() {
        Some(limit) => Some(Ok(Box::new(MaxItemsValidator {
            limit: limit as usize,
        }))),
        None => Some(Err(ParseError::keyword("maxItems"))),
    }
}
