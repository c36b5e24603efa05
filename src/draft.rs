use crate::keywords::{self, CompileFn};
use serde_json::Value;

/// Supported revisions of the JSON Schema specification.
///
/// Draft 3 is scoped to the keyword subset it shares with draft 4;
/// draft-3-only keywords (`disallow`, `divisibleBy`, boolean `required`,
/// schema-valued `type`, `extends`) parse as opaque members.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Draft {
    Draft3,
    Draft4,
    Draft6,
    Draft7,
}

impl Default for Draft {
    fn default() -> Self {
        Draft::Draft7
    }
}

impl Draft {
    /// Look up the builtin constructor for a keyword under this draft.
    pub(crate) fn get_keyword(self, keyword: &str) -> Option<CompileFn> {
        match self {
            Draft::Draft7 => match keyword {
                "if" => Some(keywords::if_::compile),
                _ => draft6_keyword(keyword),
            },
            Draft::Draft6 => draft6_keyword(keyword),
            // Draft 3 keywords with a draft-4 counterpart share its
            // semantics; draft-3-only forms (`disallow`, `divisibleBy`,
            // boolean `required`, schema-valued `type`, `extends`) are
            // not implemented and parse as opaque members.
            Draft::Draft3 | Draft::Draft4 => match keyword {
                "additionalItems" => Some(keywords::additional_items::compile),
                "additionalProperties" => Some(keywords::additional_properties::compile),
                "allOf" => Some(keywords::all_of::compile),
                "anyOf" => Some(keywords::any_of::compile),
                "definitions" => Some(keywords::definitions::compile),
                "dependencies" => Some(keywords::dependencies::compile),
                "enum" => Some(keywords::enum_::compile),
                "format" => Some(keywords::format::compile),
                "items" => Some(keywords::items::compile),
                "maximum" => Some(keywords::maximum::compile_draft4),
                "maxItems" => Some(keywords::max_items::compile),
                "maxLength" => Some(keywords::max_length::compile),
                "maxProperties" => Some(keywords::max_properties::compile),
                "minimum" => Some(keywords::minimum::compile_draft4),
                "minItems" => Some(keywords::min_items::compile),
                "minLength" => Some(keywords::min_length::compile),
                "minProperties" => Some(keywords::min_properties::compile),
                "multipleOf" => Some(keywords::multiple_of::compile),
                "not" => Some(keywords::not::compile),
                "oneOf" => Some(keywords::one_of::compile),
                "pattern" => Some(keywords::pattern::compile),
                "patternProperties" => Some(keywords::pattern_properties::compile),
                "properties" => Some(keywords::properties::compile),
                "required" => Some(keywords::required::compile),
                "type" => Some(keywords::type_::compile),
                "uniqueItems" => Some(keywords::unique_items::compile),
                _ => None,
            },
        }
    }

    /// The member carrying a schema identifier under this draft.
    pub(crate) fn id_keyword(self) -> &'static str {
        match self {
            Draft::Draft3 | Draft::Draft4 => "id",
            Draft::Draft6 | Draft::Draft7 => "$id",
        }
    }
}

fn draft6_keyword(keyword: &str) -> Option<CompileFn> {
    match keyword {
        "additionalItems" => Some(keywords::additional_items::compile),
        "additionalProperties" => Some(keywords::additional_properties::compile),
        "allOf" => Some(keywords::all_of::compile),
        "anyOf" => Some(keywords::any_of::compile),
        "const" => Some(keywords::const_::compile),
        "contains" => Some(keywords::contains::compile),
        "definitions" => Some(keywords::definitions::compile),
        "dependencies" => Some(keywords::dependencies::compile),
        "enum" => Some(keywords::enum_::compile),
        "exclusiveMaximum" => Some(keywords::exclusive_maximum::compile),
        "exclusiveMinimum" => Some(keywords::exclusive_minimum::compile),
        "format" => Some(keywords::format::compile),
        "items" => Some(keywords::items::compile),
        "maximum" => Some(keywords::maximum::compile),
        "maxItems" => Some(keywords::max_items::compile),
        "maxLength" => Some(keywords::max_length::compile),
        "maxProperties" => Some(keywords::max_properties::compile),
        "minimum" => Some(keywords::minimum::compile),
        "minItems" => Some(keywords::min_items::compile),
        "minLength" => Some(keywords::min_length::compile),
        "minProperties" => Some(keywords::min_properties::compile),
        "multipleOf" => Some(keywords::multiple_of::compile),
        "not" => Some(keywords::not::compile),
        "oneOf" => Some(keywords::one_of::compile),
        "pattern" => Some(keywords::pattern::compile),
        "patternProperties" => Some(keywords::pattern_properties::compile),
        "properties" => Some(keywords::properties::compile),
        "propertyNames" => Some(keywords::property_names::compile),
        "required" => Some(keywords::required::compile),
        "type" => Some(keywords::type_::compile),
        "uniqueItems" => Some(keywords::unique_items::compile),
        _ => None,
    }
}

/// Get the `Draft` from a JSON Schema URL.
pub fn draft_from_url(url: &str) -> Option<Draft> {
    match url.trim_end_matches('#') {
        "http://json-schema.org/draft-07/schema" => Some(Draft::Draft7),
        "http://json-schema.org/draft-06/schema" => Some(Draft::Draft6),
        "http://json-schema.org/draft-04/schema" => Some(Draft::Draft4),
        "http://json-schema.org/draft-03/schema" => Some(Draft::Draft3),
        _ => None,
    }
}

/// Get the `Draft` from a schema document's `$schema` member.
pub fn draft_from_schema(schema: &Value) -> Option<Draft> {
    schema
        .as_object()
        .and_then(|object| object.get("$schema"))
        .and_then(Value::as_str)
        .and_then(draft_from_url)
}

/// Extract the identifier of a schema value under the given draft.
pub(crate) fn id_of(draft: Draft, schema: &Value) -> Option<&str> {
    schema
        .as_object()
        .and_then(|object| object.get(draft.id_keyword()))
        .and_then(Value::as_str)
}
