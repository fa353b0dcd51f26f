//! Namespace classification of identifiers.
//!
//! An identifier is `<namespace>/<label>`. Only the `d/` (domains) and `id/`
//! (identities) namespaces have their labels checked; everything else is
//! passed through as an opaque namespace string.

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;

use crate::limits::MAX_DOMAIN_LABEL_LEN;

lazy_static! {
    static ref DOMAIN_LABEL: Regex = Regex::new(r"^(xn--)?[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    static ref IDENTITY_LABEL: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap();
    static ref DIGITS_ONLY: Regex = Regex::new(r"^[0-9]+$").unwrap();
}

/// The namespace an identifier belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// `d/`: domain names.
    Domain,
    /// `id/`: identities.
    Identity,
    /// `p/`: players.
    Player,
    /// `g/`: games.
    Game,
    /// Any other namespace, unvalidated.
    Other(String),
}

impl Namespace {
    /// Returns the textual prefix of this namespace (without the `/`).
    pub fn as_str(&self) -> &str {
        match self {
            Namespace::Domain => "d",
            Namespace::Identity => "id",
            Namespace::Player => "p",
            Namespace::Game => "g",
            Namespace::Other(s) => s,
        }
    }

    fn from_prefix(prefix: &str) -> Namespace {
        match prefix {
            "d" => Namespace::Domain,
            "id" => Namespace::Identity,
            "p" => Namespace::Player,
            "g" => Namespace::Game,
            other => Namespace::Other(other.to_string()),
        }
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Splits an ASCII identifier once on `/` into `(namespace, label)`.
///
/// Returns `None` for non-ASCII identifiers or identifiers without a `/`.
pub fn split_identifier(identifier: &[u8]) -> Option<(&str, &str)> {
    if !identifier.is_ascii() {
        return None;
    }
    // ASCII is always valid UTF-8
    let identifier = std::str::from_utf8(identifier).ok()?;
    identifier.split_once('/')
}

/// Derives the namespace of an identifier.
///
/// Returns `None` when the identifier cannot be classified: it is not ASCII,
/// has no `/`, or its label is invalid for the `d/` or `id/` namespace.
pub fn classify(identifier: &[u8]) -> Option<Namespace> {
    let (prefix, label) = split_identifier(identifier)?;
    let namespace = Namespace::from_prefix(prefix);

    let valid = match namespace {
        Namespace::Domain => is_valid_domain_label(label),
        Namespace::Identity => is_valid_identity_label(label),
        _ => true,
    };

    valid.then_some(namespace)
}

/// Checks a `d/` label: one lowercase LDH label (IDNA prefix allowed) of
/// 1–63 characters that is not purely numeric.
pub fn is_valid_domain_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_DOMAIN_LABEL_LEN {
        return false;
    }
    DOMAIN_LABEL.is_match(label) && !DIGITS_ONLY.is_match(label)
}

/// Checks an `id/` label: lowercase alphanumerics separated by single hyphens.
pub fn is_valid_identity_label(label: &str) -> bool {
    !label.is_empty() && IDENTITY_LABEL.is_match(label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_namespace() {
        assert_eq!(classify(b"d/example"), Some(Namespace::Domain));
        assert_eq!(classify(b"d/xn--bcher-kva"), Some(Namespace::Domain));
        assert_eq!(classify(b"d/my-site2"), Some(Namespace::Domain));
    }

    #[test]
    fn test_domain_label_rejections() {
        assert_eq!(classify(b"d/"), None);
        assert_eq!(classify(b"d/12345"), None);
        assert_eq!(classify(b"d/Example"), None);
        assert_eq!(classify(b"d/-leading"), None);
        assert_eq!(classify(b"d/double--hyphen"), None);
        assert_eq!(classify(b"d/sub.domain"), None);

        let long = format!("d/{}", "a".repeat(64));
        assert_eq!(classify(long.as_bytes()), None);
        let max = format!("d/{}", "a".repeat(63));
        assert_eq!(classify(max.as_bytes()), Some(Namespace::Domain));
    }

    #[test]
    fn test_identity_namespace() {
        assert_eq!(classify(b"id/alice"), Some(Namespace::Identity));
        // Digits-only is fine outside d/
        assert_eq!(classify(b"id/1234"), Some(Namespace::Identity));
        // No IDNA exception
        assert_eq!(classify(b"id/xn--bcher-kva"), None);
        assert_eq!(classify(b"id/"), None);
    }

    #[test]
    fn test_other_namespaces_pass_through() {
        assert_eq!(classify(b"p/Some Player"), Some(Namespace::Player));
        assert_eq!(classify(b"g/"), Some(Namespace::Game));
        assert_eq!(
            classify(b"xyz/anything goes/here"),
            Some(Namespace::Other("xyz".to_string()))
        );
    }

    #[test]
    fn test_unclassifiable() {
        assert_eq!(classify(b"no-slash"), None);
        assert_eq!(classify(&[b'd', b'/', 0xff]), None);
        assert_eq!(classify("p/caf\u{e9}".as_bytes()), None);
    }

    #[test]
    fn test_split_once() {
        assert_eq!(split_identifier(b"d/a/b"), Some(("d", "a/b")));
        assert_eq!(Namespace::Other("x".into()).to_string(), "x");
    }
}
