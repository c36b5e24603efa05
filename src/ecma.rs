//! ECMA 262 regular expressions differ from Rust's in a few character
//! class and control escape details. Schema patterns pass through this
//! translation before compilation, which is also the seam where the
//! regex engine can be swapped.
use crate::error::ParseError;
use fancy_regex::Regex;

lazy_static::lazy_static! {
    static ref CONTROL_GROUPS_RE: regex::Regex =
        regex::Regex::new(r"\\c[A-Za-z]").expect("is a valid regex");
}

/// Compile an ECMA 262 pattern into a usable regex.
pub(crate) fn compile(pattern: &str) -> Result<Regex, ParseError> {
    let translated = translate(pattern);
    Regex::new(&translated).map_err(|error| ParseError::InvalidRegex {
        pattern: pattern.to_string(),
        message: error.to_string(),
    })
}

/// Whether a string matches. Patterns that exceed the engine's
/// backtracking limit count as non-matching.
pub(crate) fn is_match(regex: &Regex, instance: &str) -> bool {
    regex.is_match(instance).unwrap_or(false)
}

fn translate(pattern: &str) -> String {
    // \cA..\cZ control escapes, then the ASCII-only perl classes.
    let pattern = CONTROL_GROUPS_RE.replace_all(pattern, |captures: &regex::Captures<'_>| {
        let letter = captures[0]
            .trim_start_matches(r"\c")
            .chars()
            .next()
            .expect("the capture always ends with a letter");
        ((letter.to_ascii_uppercase() as u8 - 64) as char).to_string()
    });
    pattern
        .replace(r"\d", "[0-9]")
        .replace(r"\D", "[^0-9]")
        .replace(r"\w", "[A-Za-z0-9_]")
        .replace(r"\W", "[^A-Za-z0-9_]")
        .replace(r"\s", "[ \t\n\r\x0b\x0c]")
        .replace(r"\S", "[^ \t\n\r\x0b\x0c]")
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(r"^\d+$", "0123", true)]
    #[test_case(r"^\d+$", "١٢٣", false; "non ascii digits are not ecma digits")]
    #[test_case(r"^\w+$", "snake_case1", true)]
    #[test_case(r"a\cJb", "a\nb", true; "control escape")]
    #[test_case(r"^(?=ab)a\w+$", "abc", true; "lookahead is supported")]
    fn matching(pattern: &str, instance: &str, expected: bool) {
        let regex = compile(pattern).unwrap();
        assert_eq!(is_match(&regex, instance), expected);
    }

    #[test]
    fn invalid_patterns_are_parse_errors() {
        assert!(compile("[").is_err());
    }
}
