use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

pub(crate) struct AllOfValidator {
    schemas: Vec<Schema>,
}

impl KeywordValidator for AllOfValidator {
    fn keyword(&self) -> &'static str {
        "allOf"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        // Conjunction: every branch runs and its errors surface directly.
        for schema in &self.schemas {
            schema.validate_in(scope, instance, path, errors);
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        for schema in &self.schemas {
            visit(schema);
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Option<CompilationResult> {
    match parse_branches("allOf", schema, context) {
        Ok(schemas) => Some(Ok(Box::new(AllOfValidator { schemas }))),
        Err(error) => Some(Err(error)),
    }
}

pub(super) fn parse_branches(
    keyword: &'static str,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Result<Vec<Schema>, ParseError> {
    match schema {
        Value::Array(items) => {
            let mut schemas = Vec::with_capacity(items.len());
            for item in items {
                schemas.push(Schema::parse(item, context)?);
            }
            Ok(schemas)
        }
        _ => Err(ParseError::keyword(keyword)),
    }
}
