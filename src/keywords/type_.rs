use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::primitive_type::PrimitiveType;
use crate::schema::Scope;
use serde_json::{Map, Value};
use std::convert::TryFrom;

pub(crate) struct SingleTypeValidator {
    expected: PrimitiveType,
}

impl KeywordValidator for SingleTypeValidator {
    fn keyword(&self) -> &'static str {
        "type"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if !self.expected.admits(PrimitiveType::from(instance)) {
            errors.push(ValidationError::new(
                "type",
                path,
                instance,
                format!("type should be {}", self.expected),
            ));
        }
    }
}

pub(crate) struct MultipleTypesValidator {
    expected: Vec<PrimitiveType>,
}

impl KeywordValidator for MultipleTypesValidator {
    fn keyword(&self) -> &'static str {
        "type"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        let actual = PrimitiveType::from(instance);
        if !self.expected.iter().any(|expected| expected.admits(actual)) {
            let listed = self
                .expected
                .iter()
                .map(|t| t.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            errors.push(ValidationError::new(
                "type",
                path,
                instance,
                format!("type should be one of: {}", listed),
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
        Value::String(name) => Some(single(name)),
        Value::Array(items) => {
            if let [Value::String(name)] = items.as_slice() {
                return Some(single(name));
            }
            let mut expected = Vec::with_capacity(items.len());
            for item in items {
                match item
                    .as_str()
                    .and_then(|name| PrimitiveType::try_from(name).ok())
                {
                    Some(primitive) => expected.push(primitive),
                    None => return Some(Err(ParseError::keyword("type"))),
                }
            }
            Some(Ok(Box::new(MultipleTypesValidator { expected })))
        }
        _ => Some(Err(ParseError::keyword("type"))),
    }
}

fn single(name: &str) -> CompilationResult {
    match PrimitiveType::try_from(name) {
        Ok(expected) => Ok(Box::new(SingleTypeValidator { expected })),
        Err(()) => Err(ParseError::keyword("type")),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("foo"), true)]
    #[test_case(json!(1), false)]
    fn single_type(instance: serde_json::Value, expected: bool) {
        assert_eq!(must(r#"{"type": "string"}"#).is_valid(&instance), expected);
    }

    #[test_case(json!(1), true; "integer is integer")]
    #[test_case(json!(1.0), true; "integral float is integer")]
    #[test_case(json!(1.1), false)]
    fn integer_classification(instance: serde_json::Value, expected: bool) {
        assert_eq!(must(r#"{"type": "integer"}"#).is_valid(&instance), expected);
    }

    #[test_case(json!(1), true)]
    #[test_case(json!("foo"), true)]
    #[test_case(json!([]), false)]
    fn union_type(instance: serde_json::Value, expected: bool) {
        assert_eq!(
            must(r#"{"type": ["integer", "string"]}"#).is_valid(&instance),
            expected
        );
    }

    #[test]
    fn message_names_the_expected_type() {
        let errors = must(r#"{"type": "string"}"#).validate_bytes(b"1").unwrap();
        assert_eq!(errors[0].to_string(), "/: 1 type should be string");
    }
}
