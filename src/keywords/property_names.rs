use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

pub(crate) struct PropertyNamesValidator {
    schema: Schema,
}

impl KeywordValidator for PropertyNamesValidator {
    fn keyword(&self) -> &'static str {
        "propertyNames"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            for name in item.keys() {
                // Each member name validates as a string instance.
                let name_value = Value::String(name.clone());
                self.schema.validate_in(scope, &name_value, path, errors);
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
        Ok(parsed) => Some(Ok(Box::new(PropertyNamesValidator { schema: parsed }))),
        Err(error) => Some(Err(error)),
    }
}
