use super::{CompilationResult, KeywordValidator};
use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::Scope;
use serde_json::{Map, Value};

pub(crate) struct MultipleOfValidator {
    factor: f64,
}

impl KeywordValidator for MultipleOfValidator {
    fn keyword(&self) -> &'static str {
        "multipleOf"
    }

    fn validate(
        &self,
        _: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    ) {
        if let Value::Number(number) = instance {
            let item = match number.as_f64() {
                Some(item) => item,
                None => return,
            };
            // Integral cases divide exactly; fractional factors compare
            // against the nearest whole quotient to absorb float noise
            // in cases like 0.0075 / 0.0001.
            let is_multiple = if item.fract() == 0. && self.factor.fract() == 0. {
                (item % self.factor) == 0.
            } else {
                let quotient = item / self.factor;
                (quotient - quotient.round()).abs() < 1e-8
            };
            if !is_multiple {
                errors.push(ValidationError::new(
                    "multipleOf",
                    path,
                    instance,
                    format!("must be a multiple of {}", self.factor),
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
    match schema.as_f64() {
        Some(factor) if factor > 0. => Some(Ok(Box::new(MultipleOfValidator { factor }))),
        _ => Some(Err(ParseError::keyword("multipleOf"))),
    }
}
