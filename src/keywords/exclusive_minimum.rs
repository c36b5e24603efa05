use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct ExclusiveMinimumValidator {
    limit: f64,
}

impl KeywordValidator for ExclusiveMinimumValidator {
    fn keyword(&self) -> &'static str {
        "exclusiveMinimum"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(item) = instance.as_f64() {
            if item <= self.limit {
                errors.push(ValidationError::new(
                    "exclusiveMinimum",
                    path,
                    instance,
                    format!("must be greater than {}", self.limit),
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
    match schema.as_f64() {
        Some(limit) => Some(Ok(Box::new(ExclusiveMinimumValidator { limit }))),
        None => Some(Err(ParseError::keyword("exclusiveMinimum"))),
    }
}
