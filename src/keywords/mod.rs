//! One module per keyword. Each keyword is compiled from its JSON value
//! into a validator object; a schema node holds its validators in source
//! order and runs every one of them, so a single node can produce several
//! independent errors.
pub(crate) mod additional_items;
pub(crate) mod additional_properties;
pub(crate) mod all_of;
pub(crate) mod any_of;
pub(crate) mod const_;
pub(crate) mod contains;
pub(crate) mod definitions;
pub(crate) mod dependencies;
pub(crate) mod enum_;
pub(crate) mod exclusive_maximum;
pub(crate) mod exclusive_minimum;
pub(crate) mod format;
pub(crate) mod helpers;
pub(crate) mod if_;
pub(crate) mod items;
pub(crate) mod max_items;
pub(crate) mod max_length;
pub(crate) mod max_properties;
pub(crate) mod maximum;
pub(crate) mod min_items;
pub(crate) mod min_length;
pub(crate) mod min_properties;
pub(crate) mod minimum;
pub(crate) mod multiple_of;
pub(crate) mod not;
pub(crate) mod one_of;
pub(crate) mod pattern;
pub(crate) mod pattern_properties;
pub(crate) mod properties;
pub(crate) mod property_names;
pub(crate) mod required;
pub(crate) mod type_;
pub(crate) mod unique_items;

use crate::context::ParseContext;
use crate::error::{ParseError, ValidationError};
use crate::pointer::InstancePath;
use crate::schema::{Schema, Scope};
use serde_json::{Map, Value};
use std::fmt;

/// A compiled keyword: parses itself once from the schema document and
/// examines instances, appending location-tagged errors to the sink.
pub(crate) trait KeywordValidator: Send + Sync {
    /// The keyword name, used as the error rule name.
    fn keyword(&self) -> &'static str;

    fn validate(
        &self,
        scope: &mut Scope<'_>,
        instance: &Value,
        path: &InstancePath<'_>,
        errors: &mut Vec<ValidationError>,
    );

    /// Boolean probe used by composition keywords; errors are discarded.
    fn is_valid(&self, scope: &mut Scope<'_>, instance: &Value) -> bool {
        let mut errors = Vec::new();
        self.validate(scope, instance, &InstancePath::new(), &mut errors);
        errors.is_empty()
    }

    /// Visit the direct subschemas held by this keyword. Used by the
    /// remote-reference collection pass.
    fn walk<'s>(&'s self, visit: &mut dyn FnMut(&'s Schema)) {
        let _ = visit;
    }
}

impl fmt::Debug for dyn KeywordValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.keyword())
    }
}

pub(crate) type BoxedKeyword = Box<dyn KeywordValidator>;
pub(crate) type CompilationResult = Result<BoxedKeyword, ParseError>;

/// Constructor signature shared by all keywords. The parent object is
/// passed alongside the keyword's own value for keywords whose meaning
/// depends on siblings (`additionalItems` on `items`, draft-4 `maximum`
/// on `exclusiveMaximum`, `if` on `then`/`else`). Returning `None` means
/// the keyword contributes no validator here.
pub(crate) type CompileFn =
    fn(&Map<String, Value>, &Value, &ParseContext<'_>) -> Option<CompilationResult>;
