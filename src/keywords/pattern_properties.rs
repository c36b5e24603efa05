use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::ecma;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use fancy_regex::Regex;
use serde_json::{Map, Value};

pub(crate) struct PatternPropertiesValidator {
    patterns: Vec<(Regex, Schema)>,
}

impl KeywordValidator for PatternPropertiesValidator {
    fn keyword(&self) -> &'static str {
        "patternProperties"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            for (pattern, schema) in &self.patterns {
                for (name, value) in item {
                    if ecma::is_match(pattern, name) {
                        let property_path = path.push_property(name);
                        schema.validate_in(scope, value, &property_path, errors);
                    }
                }
            }
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        for (_, schema) in &self.patterns {
            visit(schema);
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Option<CompilationResult> {
    match schema {
        Value::Object(map) => {
            let mut patterns = Vec::with_capacity(map.len());
            for (pattern, subschema) in map {
                let regex = match ecma::compile(pattern) {
                    Ok(regex) => regex,
                    Err(error) => return Some(Err(error)),
                };
                match Schema::parse(subschema, context) {
                    Ok(parsed) => patterns.push((regex, parsed)),
                    Err(error) => return Some(Err(error)),
                }
            }
            Some(Ok(Box::new(PatternPropertiesValidator { patterns })))
        }
        _ => Some(Err(ParseError::keyword("patternProperties"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn matching_names_validate_their_values() {
        let schema = must(r#"{"patternProperties": {"^S_": {"type": "string"}}}"#);
        assert!(schema.is_valid(&json!({"S_name": "x", "other": 1})));
        assert!(!schema.is_valid(&json!({"S_name": 1})));
    }

    #[test]
    fn several_patterns_may_cover_one_property() {
        let schema = must(
            r#"{"patternProperties": {"a": {"type": "integer"}, "aaa": {"maximum": 20}}}"#,
        );
        assert!(schema.is_valid(&json!({"aaaa": 18})));
        assert!(!schema.is_valid(&json!({"aaaa": 31})));
    }
}
