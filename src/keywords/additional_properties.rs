use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::ecma;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use fancy_regex::Regex;
use serde_json::{Map, Value};

/// A property is covered when its name appears in the sibling
/// `properties` or matches any sibling `patternProperties` regex;
/// `additionalProperties` only sees the rest.
struct Coverage {
    named: Vec<String>,
    patterns: Vec<Regex>,
}

impl Coverage {
    fn from_parent(parent: &Map<String, Value>) -> Result<Coverage, crate::error::ParseError> {
        let named = match parent.get("properties") {
            Some(Value::Object(map)) => map.keys().cloned().collect(),
            _ => Vec::new(),
        };
        let mut patterns = Vec::new();
        if let Some(Value::Object(map)) = parent.get("patternProperties") {
            for pattern in map.keys() {
                patterns.push(ecma::compile(pattern)?);
            }
        }
        Ok(Coverage { named, patterns })
    }

    fn covers(&self, name: &str) -> bool {
        self.named.iter().any(|known| known == name)
            || self.patterns.iter().any(|pattern| ecma::is_match(pattern, name))
    }
}

pub(crate) struct AdditionalPropertiesFalseValidator {
    coverage: Coverage,
}

impl KeywordValidator for AdditionalPropertiesFalseValidator {
    fn keyword(&self) -> &'static str {
        "additionalProperties"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            for (name, value) in item {
                if !self.coverage.covers(name) {
                    let property_path = path.push_property(name);
                    errors.push(ValidationError::new(
                        "additionalProperties",
                        &property_path,
                        value,
                        "additional properties are not allowed".to_string(),
                    ));
                }
            }
        }
    }
}

pub(crate) struct AdditionalPropertiesSchemaValidator {
    coverage: Coverage,
    schema: Schema,
}

impl KeywordValidator for AdditionalPropertiesSchemaValidator {
    fn keyword(&self) -> &'static str {
        "additionalProperties"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            for (name, value) in item {
                if !self.coverage.covers(name) {
                    let property_path = path.push_property(name);
                    self.schema.validate_in(scope, value, &property_path, errors);
                }
            }
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        visit(&self.schema);
    }
}

pub(crate) fn compile(
    parent: &Map<String, Value>,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Option<CompilationResult> {
    let coverage = match Coverage::from_parent(parent) {
        Ok(coverage) => coverage,
        Err(error) => return Some(Err(error)),
    };
    match schema {
        Value::Bool(true) => None,
        Value::Bool(false) => Some(Ok(Box::new(AdditionalPropertiesFalseValidator { coverage }))),
        _ => match Schema::parse(schema, context) {
            Ok(parsed) => Some(Ok(Box::new(AdditionalPropertiesSchemaValidator {
                coverage,
                schema: parsed,
            }))),
            Err(error) => Some(Err(error)),
        },
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn false_rejects_uncovered_properties() {
        let schema = must(
            r#"{"properties": {"foo": {}}, "patternProperties": {"^v": {}}, "additionalProperties": false}"#,
        );
        assert!(schema.is_valid(&json!({"foo": 1, "vroom": 2})));
        assert!(!schema.is_valid(&json!({"foo": 1, "bar": 2})));
    }

    #[test]
    fn schema_validates_uncovered_properties() {
        let schema =
            must(r#"{"properties": {"foo": {}}, "additionalProperties": {"type": "boolean"}}"#);
        assert!(schema.is_valid(&json!({"foo": 1, "extra": true})));
        assert!(!schema.is_valid(&json!({"extra": 12})));
    }

    #[test]
    fn uncovered_errors_point_at_the_property() {
        let schema = must(r#"{"properties": {"foo": {}}, "additionalProperties": false}"#);
        let errors = schema.validate_bytes(br#"{"bar": 2}"#).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path(), "/bar");
    }

    #[test]
    fn standalone_false_rejects_every_property() {
        let schema = must(r#"{"additionalProperties": false}"#);
        assert!(schema.is_valid(&json!({})));
        assert!(!schema.is_valid(&json!({"any": 1})));
    }
}
