use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MinItemsValidator {
    limit: usize,
}

impl KeywordValidator for MinItemsValidator {
    fn keyword(&self) -> &'static str {
        "minItems"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            if items.len() < self.limit {
                errors.push(ValidationError::new(
                    "minItems",
                    path,
                    instance,
                    format!("array has less than {} items", self.limit),
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
        Some(limit) => Some(Ok(Box::new(MinItemsValidator {
            limit: limit as usize,
        }))),
        None => Some(Err(ParseError::keyword("minItems"))),
    }
}
