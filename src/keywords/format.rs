use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::formats;
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct FormatValidator {
    format: String,
}

impl KeywordValidator for FormatValidator {
    fn keyword(&self) -> &'static str {
        "format"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::String(item) = instance {
            // Unknown formats pass: the registry is consulted at validate
            // time, so late registrations still apply.
            if formats::check(&self.format, item) == Some(false) {
                errors.push(ValidationError::new(
                    "format",
                    path,
                    instance,
                    format!("invalid {} format", self.format),
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
    match schema {
        Value::String(format) => Some(Ok(Box::new(FormatValidator {
            format: format.clone(),
        }))),
        _ => Some(Err(ParseError::keyword("format"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn known_formats_validate_strings() {
        let schema = must(r#"{"format": "ipv4"}"#);
        assert!(schema.is_valid(&json!("127.0.0.1")));
        assert!(!schema.is_valid(&json!("127.0.0.0.1")));
        assert!(schema.is_valid(&json!(127)));
    }

    #[test]
    fn unknown_formats_pass() {
        let schema = must(r#"{"format": "half-elven"}"#);
        assert!(schema.is_valid(&json!("arwen")));
    }
}
