use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::ValidationError;
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};

/// `if`/`then`/`else`. The condition's outcome selects which branch
/// validates; the condition's own errors are never surfaced.
pub(crate) struct IfThenElseValidator {
    condition: Schema,
    then_branch: Option<Schema>,
    else_branch: Option<Schema>,
}

impl KeywordValidator for IfThenElseValidator {
    fn keyword(&self) -> &'static str {
        "if"
    }

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        let branch = if self.condition.is_valid_in(scope, instance) {
            self.then_branch.as_ref()
        } else {
            self.else_branch.as_ref()
        };
        if let Some(schema) = branch {
            schema.validate_in(scope, instance, path, errors);
        }
    }

    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        visit(&self.condition);
        if let Some(schema) = &self.then_branch {
            visit(schema);
        }
        if let Some(schema) = &self.else_branch {
            visit(schema);
        }
    }
}

pub(crate) fn compile(
    parent: &Map<String, Value>,
    schema: &Value,
    context: &ParseContext<'_>,
) -> Option<CompilationResult> {
    let then_branch = match parent.get("then") {
        Some(branch) => match Schema::parse(branch, context) {
            Ok(parsed) => Some(parsed),
            Err(error) => return Some(Err(error)),
        },
        None => None,
    };
    let else_branch = match parent.get("else") {
        Some(branch) => match Schema::parse(branch, context) {
            Ok(parsed) => Some(parsed),
            Err(error) => return Some(Err(error)),
        },
        None => None,
    };
    if then_branch.is_none() && else_branch.is_none() {
        // A bare `if` selects nothing.
        return None;
    }
    match Schema::parse(schema, context) {
        Ok(condition) => Some(Ok(Box::new(IfThenElseValidator {
            condition,
            then_branch,
            else_branch,
        }))),
        Err(error) => Some(Err(error)),
    }
}

#[cfg(test)]
mod tests {
    use crate::schema::must;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(-1), true; "else branch")]
    #[test_case(json!(-100), false; "else branch fails")]
    #[test_case(json!(0), true; "then branch")]
    #[test_case(json!(3), false; "then branch fails")]
    fn branch_selection(instance: serde_json::Value, expected: bool) {
        let schema = must(
            r#"{"if": {"minimum": 0}, "then": {"multipleOf": 2}, "else": {"minimum": -10}}"#,
        );
        assert_eq!(schema.is_valid(&instance), expected);
    }

    #[test]
    fn condition_errors_never_surface() {
        let schema = must(r#"{"if": {"type": "integer"}, "then": {"minimum": 0}}"#);
        let errors = schema.validate_bytes(b"\"a string\"").unwrap();
        assert!(errors.is_empty());
    }

    #[test]
    fn bare_if_is_inert() {
        let schema = must(r#"{"if": {"type": "integer"}}"#);
        assert!(schema.is_valid(&json!("anything")));
    }
}
