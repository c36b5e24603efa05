use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

pub(crate) struct ContainsValidator {
    schema: Schema,
}

impl KeywordValidator for ContainsValidator {
    fn keyword(&self) -> &'static str {
        "contains"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            if !items.iter().any(|item| self.schema.is_valid_in(scope, item)) {
                errors.push(ValidationError::new(
                    "contains",
                    path,
                    instance,
                    "no array items match the contains schema".to_string(),
                ));
            }
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
        Ok(parsed) => Some(Ok(Box::new(ContainsValidator { schema: parsed }))),
        Err(error) => Some(Err(error)),
    }
}
