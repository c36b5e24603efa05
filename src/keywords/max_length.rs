use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MaxLengthValidator {
    limit: usize,
}

impl KeywordValidator for MaxLengthValidator {
    fn keyword(&self) -> &'static str {
        "maxLength"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::String(item) = instance {
            // Length counts unicode scalar values, not bytes.
            if item.chars().count() > self.limit {
                errors.push(ValidationError::new(
                    "maxLength",
                    path,
                    instance,
                    format!("max length of {} characters exceeded", self.limit),
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
        Some(limit) => Some(Ok(Box::new(MaxLengthValidator {
            limit: limit as usize,
        }))),
        None => Some(Err(ParseError::keyword("maxLength"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("fo"), true)]
    #[test_case(json!("foo"), true)]
    #[test_case(json!("fooo"), false)]
    #[test_case(json!("\u{1F62D}\u{1F62D}"), true; "astral characters count once")]
    #[test_case(json!(100), true)]
    fn lengths(instance: serde_json::Value, expected: bool) {
        assert_eq!(must(r#"{"maxLength": 3}"#).is_valid(&instance), expected);
    }
}
