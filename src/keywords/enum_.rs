use super::helpers::equal;
use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct EnumValidator {
    options: Vec<Value>,
    listed: String,
}

impl KeywordValidator for EnumValidator {
    fn keyword(&self) -> &'static str {
        "enum"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if !self.options.iter().any(|option| equal(option, instance)) {
            errors.push(ValidationError::new(
                "enum",
                path,
                instance,
                format!("should be one of {}", self.listed),
            ));
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &ParseContext<'_>,
) -> Option<CompilationResult> {
    match schema {
        Value::Array(options) => Some(Ok(Box::new(EnumValidator {
            options: options.clone(),
            listed: schema.to_string(),
        }))),
        _ => Some(Err(ParseError::keyword("enum"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(1), true)]
    #[test_case(json!(1.0), true; "numeric equality ignores representation")]
    #[test_case(json!("red"), true)]
    #[test_case(json!("blue"), false)]
    #[test_case(json!(null), false)]
    fn membership(instance: serde_json::Value, expected: bool) {
        assert_eq!(
            must(r#"{"enum": [1, "red", {"deep": true}]}"#).is_valid(&instance),
            expected
        );
    }

    #[test]
    fn deep_equality_applies() {
        let schema = must(r#"{"enum": [{"deep": [1]}]}"#);
        assert!(schema.is_valid(&json!({"deep": [1.0]})));
        assert!(!schema.is_valid(&json!({"deep": [1, 2]})));
    }
}
