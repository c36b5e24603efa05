use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

/// `additionalItems: false` next to a positional `items` list.
pub(crate) struct AdditionalItemsFalseValidator {
    offset: usize,
}

impl KeywordValidator for AdditionalItemsFalseValidator {
    fn keyword(&self) -> &'static str {
        "additionalItems"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            for (index, item) in items.iter().enumerate().skip(self.offset) {
                let item_path = path.push_index(index);
                errors.push(ValidationError::new(
                    "additionalItems",
                    &item_path,
                    item,
                    "additional items are not allowed".to_string(),
                ));
            }
        }
    }
}

/// `additionalItems: <schema>`: elements past the `items` list validate
/// against it.
pub(crate) struct AdditionalItemsSchemaValidator {
    schema: Schema,
    offset: usize,
}

impl KeywordValidator for AdditionalItemsSchemaValidator {
    fn keyword(&self) -> &'static str {
        "additionalItems"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Array(items) = instance {
            for (index, item) in items.iter().enumerate().skip(self.offset) {
                let item_path = path.push_index(index);
                self.schema.validate_in(scope, item, &item_path, errors);
            }
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        visit(&self.schema);
    }
}

pub(crate) fn compile(
    parent: &Map<String, Value>,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Option<CompilationResult> {
    // Only meaningful when `items` is a positional list; with a single
    // item schema there is no "past the end".
    let offset = match parent.get("items") {
        Some(Value::Array(items)) => items.len(),
        _ => return None,
    };
    match schema {
        Value::Bool(true) => None,
        Value::Bool(false) => Some(Ok(Box::new(AdditionalItemsFalseValidator { offset }))),
        _ => match Schema::parse(schema, context) {
            Ok(parsed) => Some(Ok(Box::new(AdditionalItemsSchemaValidator {
                schema: parsed,
                offset,
            }))),
            Err(error) => Some(Err(error)),
        },
    }
}
