use super::helpers::equal;
use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct ConstValidator {
    expected: Value,
}

impl KeywordValidator for ConstValidator {
    fn keyword(&self) -> &'static str {
        "const"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if !equal(&self.expected, instance) {
            errors.push(ValidationError::new(
                "const",
                path,
                instance,
                format!("must equal {}", self.expected),
            ));
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &ParseContext<'_>,
) -> Option<CompilationResult> {
    Some(Ok(Box::new(ConstValidator {
        expected: schema.clone(),
    })))
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn only_the_constant_passes() {
        let schema = must(r#"{"const": {"answer": 42}}"#);
        assert!(schema.is_valid(&json!({"answer": 42})));
        assert!(schema.is_valid(&json!({"answer": 42.0})));
        assert!(!schema.is_valid(&json!({"answer": 43})));
        assert!(!schema.is_valid(&json!(42)));
    }
}
