use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

pub(crate) struct PropertiesValidator {
    properties: Vec<(String, Schema)>,
}

impl KeywordValidator for PropertiesValidator {
    fn keyword(&self) -> &'static str {
        "properties"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            for (name, schema) in &self.properties {
                if let Some(value) = item.get(name) {
                    let property_path = path.push_property(name);
                    schema.validate_in(scope, value, &property_path, errors);
                }
            }
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        for (_, schema) in &self.properties {
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
            let mut properties = Vec::with_capacity(map.len());
            for (name, subschema) in map {
                match Schema::parse(subschema, context) {
                    Ok(parsed) => properties.push((name.clone(), parsed)),
                    Err(error) => return Some(Err(error)),
                }
            }
            Some(Ok(Box::new(PropertiesValidator { properties })))
        }
        _ => Some(Err(ParseError::keyword("properties"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn present_properties_validate() {
        let schema = must(r#"{"properties": {"age": {"type": "integer"}}}"#);
        assert!(schema.is_valid(&json!({"age": 30})));
        assert!(schema.is_valid(&json!({})));
        assert!(!schema.is_valid(&json!({"age": "thirty"})));
    }

    #[test]
    fn errors_carry_the_property_path() {
        let schema = must(r#"{"properties": {"age": {"type": "integer"}}}"#);
        let errors = schema.validate_bytes(br#"{"age": "thirty"}"#).unwrap();
        assert_eq!(errors[0].path(), "/age");
    }
}
