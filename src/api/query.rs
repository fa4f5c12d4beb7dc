//! Query string encoding
//!
//! Builds `name=value&...` strings from an ordered bag of optional values.
//! An empty result means there is nothing to send, and operations use that as
//! a precondition check before touching the network.

use std::fmt;

/// A single query string value
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Bool(bool),
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryValue::Bool(b) => write!(f, "{}", b),
            QueryValue::Number(n) => write!(f, "{}", n),
            QueryValue::Unsigned(n) => write!(f, "{}", n),
            QueryValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Bool(value)
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Number(value)
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::Unsigned(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Text(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Text(value)
    }
}

/// Encode an ordered bag into a query string.
///
/// Entries whose value is `None` are skipped entirely. Values are
/// percent-encoded, names are emitted as given. Returns an empty string when
/// no entry carries a value.
pub fn encode_query<K, V>(bag: &[(K, Option<V>)]) -> String
where
    K: AsRef<str>,
    V: Into<QueryValue> + Clone,
{
    bag.iter()
        .filter_map(|(name, value)| {
            let value: QueryValue = value.clone()?.into();
            Some(format!(
                "{}={}",
                name.as_ref(),
                urlencoding::encode(&value.to_string())
            ))
        })
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bag_is_empty_string() {
        let bag: [(&str, Option<QueryValue>); 0] = [];
        assert_eq!(encode_query(&bag), "");
    }

    #[test]
    fn test_all_unset_is_empty_string() {
        let bag = [("usage", None::<i64>), ("rate", None)];
        assert_eq!(encode_query(&bag), "");
    }

    #[test]
    fn test_skips_unset_and_keeps_order() {
        let bag = [
            ("usage", Some(QueryValue::Number(10))),
            ("bandwidth", None),
            ("rate", Some(QueryValue::Number(5))),
            ("force", Some(QueryValue::Bool(true))),
        ];
        assert_eq!(encode_query(&bag), "usage=10&rate=5&force=true");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let bag = [("region", Some("EU & US/west"))];
        assert_eq!(encode_query(&bag), "region=EU%20%26%20US%2Fwest");
    }

    #[test]
    fn test_negative_numbers() {
        let bag = [("segments", Some(-1i64))];
        assert_eq!(encode_query(&bag), "segments=-1");
    }

    #[test]
    fn test_unsigned_above_i64_range() {
        let bag = [("usage", Some(u64::MAX))];
        assert_eq!(encode_query(&bag), "usage=18446744073709551615");
    }
}
