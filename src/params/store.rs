//! In-memory query-parameter store backed by an ordered map.

use super::QueryParams;
use indexmap::IndexMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

/// Ordered key/value parameters that parse from and render to an
/// `application/x-www-form-urlencoded` query string.
///
/// Keys keep their first-insertion position; deleting and re-adding a key
/// moves it to the end.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryParams {
    pairs: IndexMap<String, String>,
}

impl MemoryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a query string, with or without the leading `?`.
    ///
    /// A repeated key keeps its last value.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let pairs = form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Render as a query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl QueryParams for MemoryParams {
    fn get(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    fn set(&mut self, key: &str, value: Option<&str>) {
        match value {
            Some(v) => {
                self.pairs.insert(key.to_string(), v.to_string());
            }
            None => {
                self.pairs.shift_remove(key);
            }
        }
    }
}

impl FromStr for MemoryParams {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for MemoryParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MemoryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decodes_values() {
        let params = MemoryParams::parse("?expression=ip.src+%3D%3D+10.0.0.1&date=1");
        assert_eq!(params.get("expression"), Some("ip.src == 10.0.0.1"));
        assert_eq!(params.get("date"), Some("1"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let params = MemoryParams::parse("date=1&date=24");
        assert_eq!(params.get("date"), Some("24"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_set_none_deletes() {
        let mut params = MemoryParams::parse("date=1&expression=x");
        params.set("expression", None);
        assert!(!params.contains("expression"));
        params.set("missing", None);
        assert_eq!(params.to_query_string(), "date=1");
    }

    #[test]
    fn test_render_encodes_and_keeps_order() {
        let mut params = MemoryParams::new();
        params.set("startTime", Some("1000"));
        params.set("stopTime", Some("2000"));
        params.set("expression", Some("tags == \"a&b\""));
        assert_eq!(
            params.to_string(),
            "startTime=1000&stopTime=2000&expression=tags+%3D%3D+%22a%26b%22"
        );
    }

    #[test]
    fn test_from_iterator() {
        let params: MemoryParams = [("date", "-1"), ("strictly", "true")].into_iter().collect();
        assert_eq!(params.to_query_string(), "date=-1&strictly=true");
        assert!(MemoryParams::parse("").is_empty());
    }
}
