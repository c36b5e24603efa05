use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MinPropertiesValidator {
    limit: usize,
}

impl KeywordValidator for MinPropertiesValidator {
    fn keyword(&self) -> &'static str {
        "minProperties"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            if item.len() < self.limit {
                errors.push(ValidationError::new(
                    "minProperties",
                    path,
                    instance,
                    format!("object has less than {} properties", self.limit),
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
        Some(limit) => Some(Ok(Box::new(MinPropertiesValidator {
            limit: limit as usize,
        }))),
        None => Some(Err(ParseError::keyword("minProperties"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn sibling_keywords_all_report() {
        let schema = must(r#"{"minProperties": 2, "propertyNames": {"minLength": 3}}"#);
        let errors = schema.validate_bytes(br#"{"a": 3}"#).unwrap();
        assert_eq!(errors.len(), 2);
        assert!(schema.is_valid(&json!({"abc": 1, "def": 2})));
    }
}
