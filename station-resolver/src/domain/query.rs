//! Parsing of raw station fields.

use std::fmt;

/// A station name with an optional disambiguation hint.
///
/// The hint is the line name or prefecture name given in parentheses after
/// the station name, and is used to choose between same-named stations.
///
/// # Examples
///
/// ```
/// use station_resolver::domain::StationQuery;
///
/// let query = StationQuery::parse("渋谷 (東京メトロ銀座線)");
/// assert_eq!(query.name, "渋谷");
/// assert_eq!(query.hint(), Some("東京メトロ銀座線"));
///
/// let query = StationQuery::parse("渋谷");
/// assert_eq!(query.hint(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationQuery {
    /// Bare station name sent to the station lookup.
    pub name: String,
    /// Line or prefecture qualifier, if one was given.
    pub hint: Option<String>,
}

impl StationQuery {
    /// Create a query from its parts.
    pub fn new(name: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            name: name.into(),
            hint,
        }
    }

    /// Parse a raw field such as `"Shinjuku (Yamanote Line)"`.
    ///
    /// The field is split at its only `(`. The name is the trimmed text
    /// before it and the hint is the trimmed text after it with every `)`
    /// removed. A field without `(` is a bare name.
    ///
    /// A field with more than one `(` is malformed and is not split: the
    /// whole trimmed field becomes the name and there is no hint.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('(') {
            Some((name, rest)) if !rest.contains('(') => {
                let hint = rest.replace(')', "");
                let hint = hint.trim();
                Self {
                    name: name.trim().to_string(),
                    hint: (!hint.is_empty()).then(|| hint.to_string()),
                }
            }
            _ => Self {
                name: raw.trim().to_string(),
                hint: None,
            },
        }
    }

    /// Returns the hint, if any.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }
}

impl fmt::Display for StationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} ({})", self.name, hint),
            None => f.write_str(&self.name),
        }
    }
}
