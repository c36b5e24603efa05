use super::all_of::parse_branches;
use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

pub(crate) struct AnyOfValidator {
    schemas: Vec<Schema>,
}

impl KeywordValidator for AnyOfValidator {
    fn keyword(&self) -> &'static str {
        "anyOf"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if !self
            .schemas
            .iter()
            .any(|schema| schema.is_valid_in(scope, instance))
        {
            errors.push(ValidationError::new(
                "anyOf",
                path,
                instance,
                "did not match any schema in \"anyOf\"".to_string(),
            ));
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
    match parse_branches("anyOf", schema, context) {
        Ok(schemas) => Some(Ok(Box::new(AnyOfValidator { schemas }))),
        Err(error) => Some(Err(error)),
    }
}
