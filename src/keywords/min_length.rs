use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MinLengthValidator {
    limit: usize,
}

impl KeywordValidator for MinLengthValidator {
    fn keyword(&self) -> &'static str {
        "minLength"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::String(item) = instance {
            if item.chars().count() < self.limit {
                errors.push(ValidationError::new(
                    "minLength",
                    path,
                    instance,
                    format!("min length of {} characters required", self.limit),
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
        Some(limit) => Some(Ok(Box::new(MinLengthValidator {
            limit: limit as usize,
        }))),
        None => Some(Err(ParseError::keyword("minLength"))),
    }
}
