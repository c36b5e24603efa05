use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

pub(crate) struct NotValidator {
    schema: Schema,
}

impl KeywordValidator for NotValidator {
    fn keyword(&self) -> &'static str {
        "not"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if self.schema.is_valid_in(scope, instance) {
            errors.push(ValidationError::new(
                "not",
                path,
                instance,
                "must not match schema in \"not\"".to_string(),
            ));
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        visit(&self.schema);
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Option<CompilationResult> {
    match Schema::parse(schema, context) {
        Ok(parsed) => Some(Ok(Box::new(NotValidator { schema: parsed }))),
        Err(error) => Some(Err(error)),
    }
}
