use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

enum Dependency {
    /// Property dependency: listed names must also be present.
    Required(Vec<String>),
    /// Schema dependency: the whole object validates against it.
    Schema(Schema),
}

pub(crate) struct DependenciesValidator {
    dependencies: Vec<(String, Dependency)>,
}

impl KeywordValidator for DependenciesValidator {
    fn keyword(&self) -> &'static str {
        "dependencies"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Object(item) = instance {
            for (property, dependency) in &self.dependencies {
                if !item.contains_key(property) {
                    continue;
                }
                match dependency {
                    Dependency::Required(names) => {
                        for name in names {
                            if !item.contains_key(name) {
                                errors.push(ValidationError::new(
                                    "dependencies",
                                    path,
                                    instance,
                                    format!("\"{}\" value is required", name),
                                ));
                            }
                        }
                    }
                    Dependency::Schema(schema) => {
                        schema.validate_in(scope, instance, path, errors);
                    }
                }
            }
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        for (_, dependency) in &self.dependencies {
            if let Dependency::Schema(schema) = dependency {
                visit(schema);
            }
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Option<CompilationResult> {
    let map = match schema.as_object() {
        Some(map) => map,
        None => return Some(Err(ParseError::keyword("dependencies"))),
    };
    let mut dependencies = Vec::with_capacity(map.len());
    for (property, dependency) in map {
        let parsed = match dependency {
            Value::Array(names) => {
                let mut required = Vec::with_capacity(names.len());
                for name in names {
                    match name.as_str() {
                        Some(name) => required.push(name.to_string()),
                        None => return Some(Err(ParseError::keyword("dependencies"))),
                    }
                }
                Dependency::Required(required)
            }
            other => match Schema::parse(other, context) {
                Ok(schema) => Dependency::Schema(schema),
                Err(error) => return Some(Err(error)),
            },
        };
        dependencies.push((property.clone(), parsed));
    }
    Some(Ok(Box::new(DependenciesValidator { dependencies })))
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;

    #[test]
    fn property_dependencies() {
        let schema = must(r#"{"dependencies": {"bar": ["foo"]}}"#);
        assert!(schema.is_valid(&json!({"foo": 1, "bar": 2})));
        assert!(schema.is_valid(&json!({"foo": 1})));
        assert!(!schema.is_valid(&json!({"bar": 2})));
    }

    #[test]
    fn schema_dependencies() {
        let schema =
            must(r#"{"dependencies": {"bar": {"properties": {"foo": {"type": "integer"}}}}}"#);
        assert!(schema.is_valid(&json!({"foo": 1, "bar": 2})));
        assert!(!schema.is_valid(&json!({"foo": "quux", "bar": 2})));
        assert!(schema.is_valid(&json!({"foo": "quux"})));
    }
}
