use super::all_of::parse_branches;
use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

pub(crate) struct OneOfValidator {
    schemas: Vec<Schema>,
}

impl KeywordValidator for OneOfValidator {
    fn keyword(&self) -> &'static str {
        "oneOf"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        let mut matches = self
            .schemas
            .iter()
            .filter(|schema| schema.is_valid_in(scope, instance));
        let message = if matches.next().is_none() {
            "did not match any schema in \"oneOf\""
        } else if matches.next().is_some() {
            "matched more than one schema in \"oneOf\""
        } else {
            return;
        };
        errors.push(ValidationError::new(
            "oneOf",
            path,
            instance,
            message.to_string(),
        ));
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
    match parse_branches("oneOf", schema, context) {
        Ok(schemas) => Some(Ok(Box::new(OneOfValidator { schemas }))),
        Err(error) => Some(Err(error)),
    }
}
