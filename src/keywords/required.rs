use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct RequiredValidator {
    required: Vec<String>,
}

impl KeywordValidator for RequiredValidator {
    fn keyword(&self) -> &'static str {
        "required"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            // One error per missing property, not just the first.
            for name in &self.required {
                if !item.contains_key(name) {
                    errors.push(ValidationError::new(
                        "required",
                        path,
                        instance,
                        format!("\"{}\" value is required", name),
                    ));
                }
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
        Value::Array(items) => {
            let mut required = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Value::String(name) => required.push(name.clone()),
                    _ => return Some(Err(ParseError::keyword("required"))),
                }
            }
            Some(Ok(Box::new(RequiredValidator { required })))
        }
        _ => Some(Err(ParseError::keyword("required"))),
    }
}
