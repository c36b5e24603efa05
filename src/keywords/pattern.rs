use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::ecma;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use fancy_regex::Regex;
use serde_json::{Map, Value};

pub(crate) struct PatternValidator {
    original: String,
    pattern: Regex,
}

impl KeywordValidator for PatternValidator {
    fn keyword(&self) -> &'static str {
        "pattern"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::String(item) = instance {
            if !ecma::is_match(&self.pattern, item) {
                errors.push(ValidationError::new(
                    "pattern",
                    path,
                    instance,
                    format!("regexp pattern {} mismatch", self.original),
                ));
            }
        }
    }
}

pub(crate) fn compile(
    _: &Map<String, Value>,
    schema: &Value,
    _: &ParseContext<'_>,
) -> Option<CompilationResult> {
    match schema {
        Value::String(original) => Some(match ecma::compile(original) {
            Ok(pattern) => Ok(Box::new(PatternValidator {
                original: original.clone(),
                pattern,
            })),
            Err(error) => Err(error),
        }),
        _ => Some(Err(ParseError::keyword("pattern"))),
    }
}
