use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MaxPropertiesValidator {
    limit: usize,
}

impl KeywordValidator for MaxPropertiesValidator {
    fn keyword(&self) -> &'static str {
        "maxProperties"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            if item.len() > self.limit {
                errors.push(ValidationError::new(
                    "maxProperties",
                    path,
                    instance,
                    format!("object has more than {} properties", self.limit),
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
        Some(limit) => Some(Ok(Box::new(MaxPropertiesValidator {
            limit: limit as usize,
        }))),
        None => Some(Err(ParseError::keyword("maxProperties"))),
    }
}
