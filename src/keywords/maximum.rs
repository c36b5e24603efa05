use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MaximumValidator {
    limit: f64,
    exclusive: bool,
}

impl KeywordValidator for MaximumValidator {
    fn keyword(&self) -> &'static str {
        "maximum"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(item) = instance.as_f64() {
            let over = if self.exclusive {
                item >= self.limit
            } else {
                item > self.limit
            };
            if over {
                let message = if self.exclusive {
                    format!("must be less than {}", self.limit)
                } else {
                    format!("must be less than or equal to {}", self.limit)
                };
                errors.push(ValidationError::new("maximum", path, instance, message));
            }
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &ParseContext<'_>,
) -> Option<CompilationResult> {
    build(schema, false)
}

/// Draft 4 spells exclusivity as a boolean `exclusiveMaximum` sibling.
pub(crate) fn compile_draft4(
    parent: &Map<String, Value>,
    schema: &Value,
    _: &ParseContext<'_>,
) -> Option<CompilationResult> {
    let exclusive = matches!(parent.get("exclusiveMaximum"), Some(Value::Bool(true)));
    build(schema, exclusive)
}

fn build(schema: &Value, exclusive: bool) -> Option<CompilationResult> {
    match schema.as_f64() {
        Some(limit) => Some(Ok(Box::new(MaximumValidator { limit, exclusive }))),
        None => Some(Err(ParseError::keyword("maximum"))),
    }
}
