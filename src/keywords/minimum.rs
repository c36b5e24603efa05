use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MinimumValidator {
    limit: f64,
    exclusive: bool,
}

impl KeywordValidator for MinimumValidator {
    fn keyword(&self) -> &'static str {
        "minimum"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Some(item) = instance.as_f64() {
            let under = if self.exclusive {
                item <= self.limit
            } else {
                item < self.limit
            };
            if under {
                let message = if self.exclusive {
                    format!("must be greater than {}", self.limit)
                } else {
                    format!("must be greater than or equal to {}", self.limit)
                };
                errors.push(ValidationError::new("minimum", path, instance, message));
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

/// Draft 4 spells exclusivity as a boolean `exclusiveMinimum` sibling.
pub(crate) fn compile_draft4(
    parent: &Map<String, Value>,
    schema: &Value,
    _: &ParseContext<'_>,
) -> Option<CompilationResult> {
    let exclusive = matches!(parent.get("exclusiveMinimum"), Some(Value::Bool(true)));
    build(schema, exclusive)
}

fn build(schema: &Value, exclusive: bool) -> Option<CompilationResult> {
    match schema.as_f64() {
        Some(limit) => Some(Ok(Box::new(MinimumValidator { limit, exclusive }))),
        None => Some(Err(ParseError::keyword("minimum"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn inclusive_by_default() {
        let schema = must(r#"{"minimum": 1.1}"#);
        assert!(schema.is_valid(&json!(1.1)));
        assert!(!schema.is_valid(&json!(0.6)));
        assert!(schema.is_valid(&json!("x")));
    }
}
