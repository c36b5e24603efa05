use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

/// `items` as a single schema: applies to every element.
pub(crate) struct ItemsSchemaValidator {
    schema: Schema,
}

impl KeywordValidator for ItemsSchemaValidator {
    fn keyword(&self) -> &'static str {
        "items"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            for (index, item) in items.iter().enumerate() {
                let item_path = path.push_index(index);
                self.schema.validate_in(scope, item, &item_path, errors);
            }
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        visit(&self.schema);
    }
}

/// `items` as an ordered list: applies positionally.
pub(crate) struct ItemsListValidator {
    schemas: Vec<Schema>,
}

impl KeywordValidator for ItemsListValidator {
    fn keyword(&self) -> &'static str {
        "items"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            for (index, (item, schema)) in items.iter().zip(self.schemas.iter()).enumerate() {
                let item_path = path.push_index(index);
                schema.validate_in(scope, item, &item_path, errors);
            }
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
    match schema {
        Value::Array(schemas) => {
            let mut parsed = Vec::with_capacity(schemas.len());
            for item in schemas {
                match Schema::parse(item, context) {
                    Ok(schema) => parsed.push(schema),
                    Err(error) => return Some(Err(error)),
                }
            }
            Some(Ok(Box::new(ItemsListValidator { schemas: parsed })))
        }
        _ => match Schema::parse(schema, context) {
            Ok(parsed) => Some(Ok(Box::new(ItemsSchemaValidator { schema: parsed }))),
            Err(error) => Some(Err(error)),
        },
    }
}
