use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

/// `definitions` constrains nothing by itself; parsing its members keeps
/// schema errors eager and makes their remote references visible to the
/// fetch pass. Pointer references into them resolve against the raw
/// document.
pub(crate) struct DefinitionsValidator {
    definitions: Vec<(String, Schema)>,
}

impl KeywordValidator for DefinitionsValidator {
    fn keyword(&self) -> &'static str {
        "definitions"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        _: &Value,
        _: &InstancePath<'_>,
        _: &mut Vec<ValidationError>,
    ) {
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        for (_, schema) in &self.definitions {
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
            let mut definitions = Vec::with_capacity(map.len());
            for (name, subschema) in map {
                match Schema::parse(subschema, context) {
                    Ok(parsed) => definitions.push((name.clone(), parsed)),
                    Err(error) => return Some(Err(error)),
                }
            }
            Some(Ok(Box::new(DefinitionsValidator { definitions })))
        }
        _ => Some(Err(ParseError::keyword("definitions"))),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn definitions_alone_constrain_nothing() {
        let schema = must(r#"{"definitions": {"positive": {"minimum": 0}}}"#);
        assert!(schema.is_valid(&json!(-5)));
    }

    #[test]
    fn referenced_definitions_apply() {
        let schema = must(
            r##"{"definitions": {"positive": {"minimum": 0}}, "$ref": "#/definitions/positive"}"##,
        );
        assert!(schema.is_valid(&json!(5)));
        assert!(!schema.is_valid(&json!(-5)));
    }
}
