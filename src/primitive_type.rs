use serde_json::Value;
use std::{convert::TryFrom, fmt};

/// The JSON type taxonomy used by the `type` keyword. `Integer` is a
/// refinement of `Number`: a numeric value with no fractional part
/// classifies as both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Array,
    Boolean,
    Integer,
    Null,
    Number,
    Object,
    String,
}

impl PrimitiveType {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            PrimitiveType::Array => "array",
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Null => "null",
            PrimitiveType::Number => "number",
            PrimitiveType::Object => "object",
            PrimitiveType::String => "string",
        }
    }

    /// Whether an instance of the classified type `actual` satisfies a
    /// `type` constraint naming `self`.
    pub(crate) fn admits(self, actual: PrimitiveType) -> bool {
        self == actual || (self == PrimitiveType::Number && actual == PrimitiveType::Integer)
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for PrimitiveType {
    type Error = ();

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "array" => Ok(PrimitiveType::Array),
            "boolean" => Ok(PrimitiveType::Boolean),
            "integer" => Ok(PrimitiveType::Integer),
            "null" => Ok(PrimitiveType::Null),
            "number" => Ok(PrimitiveType::Number),
            "object" => Ok(PrimitiveType::Object),
            "string" => Ok(PrimitiveType::String),
            _ => Err(()),
        }
    }
}

impl From<&Value> for PrimitiveType {
    fn from(instance: &Value) -> Self {
        match instance {
            Value::Null => PrimitiveType::Null,
            Value::Bool(_) => PrimitiveType::Boolean,
            Value::Number(number) => {
                if number.is_i64()
                    || number.is_u64()
                    || number.as_f64().map(|f| f.fract() == 0.).unwrap_or(false)
                {
                    PrimitiveType::Integer
                } else {
                    PrimitiveType::Number
                }
            }
            Value::String(_) => PrimitiveType::String,
            Value::Array(_) => PrimitiveType::Array,
            Value::Object(_) => PrimitiveType::Object,
        }
    }
}

/// Classify an instance: `4.0` is `"integer"`, `4.5` is `"number"`.
#[must_use]
pub fn data_type(instance: &Value) -> &'static str {
    PrimitiveType::from(instance).as_str()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!(null), "null")]
    #[test_case(json!(true), "boolean")]
    #[test_case(json!(4.0), "integer")]
    #[test_case(json!(4), "integer")]
    #[test_case(json!(4.5), "number")]
    #[test_case(json!("foo"), "string")]
    #[test_case(json!({}), "object")]
    #[test_case(json!([]), "array")]
    fn classification(instance: serde_json::Value, expected: &str) {
        assert_eq!(data_type(&instance), expected);
    }

    #[test]
    fn number_admits_integer() {
        assert!(PrimitiveType::Number.admits(PrimitiveType::Integer));
        assert!(!PrimitiveType::Integer.admits(PrimitiveType::Number));
    }
}
