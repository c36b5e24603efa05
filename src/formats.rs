//! The `format` registry: a process-wide mapping from format name to a
//! string predicate. Seeded with the standard draft formats; callers may
//! register additional ones at initialization time. Formats absent from
//! the registry validate as no-ops.
use ahash::AHashMap;
use chrono::{DateTime, NaiveDate};
use parking_lot::RwLock;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use url::Url;

/// Predicate deciding whether a string conforms to a format.
pub type FormatCheck = fn(&str) -> bool;

lazy_static::lazy_static! {
    static ref FORMATS: RwLock<AHashMap<String, FormatCheck>> = RwLock::new(builtin_formats());

    static ref IRI_REFERENCE_RE: regex::Regex =
        regex::Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?\z").expect("is a valid regex");
    static ref JSON_POINTER_RE: regex::Regex =
        regex::Regex::new(r"^(/(([^/~])|(~[01]))*)*\z").expect("is a valid regex");
    static ref RELATIVE_JSON_POINTER_RE: regex::Regex =
        regex::Regex::new(r"^(?:0|[1-9][0-9]*)(?:#|(?:/(?:[^~/]|~0|~1)*)*)\z")
            .expect("is a valid regex");
    static ref TIME_RE: regex::Regex = regex::Regex::new(
        r"^([01][0-9]|2[0-3]):([0-5][0-9]):([0-5][0-9]|60)(\.[0-9]+)?(([Zz])|([+-]([01][0-9]|2[0-3]):[0-5][0-9]))\z",
    )
    .expect("is a valid regex");
    static ref URI_REFERENCE_RE: regex::Regex =
        regex::Regex::new(r"^(\w+:(/?/?))?[^#\\\s]*(#[^\\\s]*)?\z").expect("is a valid regex");
    static ref URI_TEMPLATE_RE: regex::Regex = regex::Regex::new(
        r#"^(?:(?:[^\x00-\x20"'<>%\\^`{|}]|%[0-9a-f]{2})|\{[+#./;?&=,!@|]?(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?(?:,(?:[a-z0-9_]|%[0-9a-f]{2})+(?::[1-9][0-9]{0,3}|\*)?)*})*\z"#,
    )
    .expect("is a valid regex");
}

/// Register `check` under `name`, replacing any previous registration.
pub fn register_format(name: &str, check: FormatCheck) {
    FORMATS.write().insert(name.to_string(), check);
}

/// `None` when the format is unknown, which validates as a pass.
pub(crate) fn check(name: &str, instance: &str) -> Option<bool> {
    FORMATS.read().get(name).map(|check| check(instance))
}

fn builtin_formats() -> AHashMap<String, FormatCheck> {
    let builtin: &[(&str, FormatCheck)] = &[
        ("date", date),
        ("date-time", date_time),
        ("email", email),
        ("hostname", hostname),
        ("idn-email", email),
        ("idn-hostname", idn_hostname),
        ("ipv4", ipv4),
        ("ipv6", ipv6),
        ("iri", uri),
        ("iri-reference", iri_reference),
        ("json-pointer", json_pointer),
        ("regex", is_regex),
        ("relative-json-pointer", relative_json_pointer),
        ("time", time),
        ("uri", uri),
        ("uri-reference", uri_reference),
        ("uri-template", uri_template),
    ];
    builtin
        .iter()
        .map(|(name, check)| ((*name).to_string(), *check))
        .collect()
}

fn date(instance: &str) -> bool {
    NaiveDate::parse_from_str(instance, "%Y-%m-%d").is_ok()
}

fn date_time(instance: &str) -> bool {
    DateTime::parse_from_rfc3339(instance).is_ok()
}

fn time(instance: &str) -> bool {
    TIME_RE.is_match(instance)
}

fn email(instance: &str) -> bool {
    instance.contains('@')
}

fn hostname(instance: &str) -> bool {
    !(instance.is_empty()
        || instance.starts_with('-')
        || instance.ends_with('-')
        || instance.chars().count() > 255
        || instance
            .chars()
            .any(|c| !(c.is_alphanumeric() || c == '-' || c == '.'))
        || instance.split('.').any(|part| part.chars().count() > 63))
}

fn idn_hostname(instance: &str) -> bool {
    hostname(instance) && idna::domain_to_ascii(instance).is_ok()
}

fn ipv4(instance: &str) -> bool {
    Ipv4Addr::from_str(instance).is_ok()
}

fn ipv6(instance: &str) -> bool {
    Ipv6Addr::from_str(instance).is_ok()
}

fn uri(instance: &str) -> bool {
    Url::from_str(instance).is_ok()
}

fn uri_reference(instance: &str) -> bool {
    URI_REFERENCE_RE.is_match(instance)
}

fn iri_reference(instance: &str) -> bool {
    IRI_REFERENCE_RE.is_match(instance)
}

fn uri_template(instance: &str) -> bool {
    URI_TEMPLATE_RE.is_match(instance)
}

fn json_pointer(instance: &str) -> bool {
    JSON_POINTER_RE.is_match(instance)
}

fn relative_json_pointer(instance: &str) -> bool {
    RELATIVE_JSON_POINTER_RE.is_match(instance)
}

fn is_regex(instance: &str) -> bool {
    crate::ecma::compile(instance).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("date", "1963-06-19", true)]
    #[test_case("date", "06/19/1963", false)]
    #[test_case("date-time", "1963-06-19T08:30:06.283185Z", true)]
    #[test_case("date-time", "1990-02-31T15:59:60.123-08:00", false)]
    #[test_case("time", "08:30:06Z", true)]
    #[test_case("time", "08:30:06", false; "offset is required")]
    #[test_case("email", "joe.bloggs@example.com", true)]
    #[test_case("email", "2962", false)]
    #[test_case("hostname", "www.example.com", true)]
    #[test_case("hostname", "-a-host-name-that-starts-with--", false)]
    #[test_case("ipv4", "192.168.0.1", true)]
    #[test_case("ipv4", "127.0.0.0.1", false)]
    #[test_case("ipv6", "::1", true)]
    #[test_case("ipv6", "12345::", false)]
    #[test_case("uri", "http://foo.bar/?baz=qux#quux", true)]
    #[test_case("uri", "//foo.bar/?baz=qux#quux", false; "protocol relative is not absolute")]
    #[test_case("uri-reference", "/abc", true)]
    #[test_case("uri-reference", r"\\WINDOWS\fileshare", false)]
    #[test_case("json-pointer", "/foo/bar~0/baz~1/%a", true)]
    #[test_case("json-pointer", "/foo/bar~", false)]
    #[test_case("relative-json-pointer", "1/0", true)]
    #[test_case("relative-json-pointer", "/foo/bar", false)]
    #[test_case("regex", "([abc])+\\s+$", true)]
    #[test_case("regex", "^(abc]", false)]
    fn builtin_checks(name: &str, instance: &str, expected: bool) {
        assert_eq!(check(name, instance), Some(expected), "{} {:?}", name, instance);
    }

    #[test]
    fn unknown_formats_are_absent() {
        assert_eq!(check("throwaway", "anything"), None);
    }

    #[test]
    fn registration_overrides() {
        register_format("answer", |s| s == "42");
        assert_eq!(check("answer", "42"), Some(true));
        assert_eq!(check("answer", "41"), Some(false));
    }
}
