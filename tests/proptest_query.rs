//! Property-based tests using proptest
//!
//! These tests verify query encoding and URL assembly using randomized inputs.

use proptest::prelude::*;
use satadmin::api::{encode_query, AdminClient, HttpRequest, HttpResponse, Transport, TransportError};
use std::sync::Arc;

/// Transport that must never be called
struct Unreachable;

#[async_trait::async_trait]
impl Transport for Unreachable {
    async fn send(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
        Err(TransportError::new("unexpected network call"))
    }
}

fn client(base_url: &str) -> AdminClient {
    AdminClient::with_transport(base_url, "token", Arc::new(Unreachable))
}

/// Generate an ordered bag of unique names with optional values
fn arb_bag() -> impl Strategy<Value = Vec<(String, Option<String>)>> {
    prop::collection::btree_map("[a-z]{1,8}", prop::option::of(".{0,12}"), 0..10).prop_map(|map| {
        map.into_iter().collect()
    })
}

proptest! {
    /// Unset entries never appear and set entries keep bag order
    #[test]
    fn encode_query_skips_unset_and_keeps_order(bag in arb_bag()) {
        let query = encode_query(&bag);

        let expected: Vec<String> = bag
            .iter()
            .filter_map(|(name, value)| {
                value
                    .as_ref()
                    .map(|v| format!("{}={}", name, urlencoding::encode(v)))
            })
            .collect();

        prop_assert_eq!(query, expected.join("&"));
    }

    /// Every encoded value decodes back to the original
    #[test]
    fn encode_query_values_are_percent_encoded(value in ".{0,32}") {
        let query = encode_query(&[("v", Some(value.clone()))]);
        let encoded = query.strip_prefix("v=").unwrap();

        prop_assert!(!encoded.contains('&'));
        prop_assert!(!encoded.contains(' '));
        prop_assert_eq!(urlencoding::decode(encoded).unwrap().into_owned(), value);
    }

    /// A bag with no set values encodes to the empty string
    #[test]
    fn encode_query_all_unset_is_empty(names in prop::collection::vec("[a-z]{1,8}", 0..10)) {
        let bag: Vec<(String, Option<i64>)> = names.into_iter().map(|n| (n, None)).collect();
        prop_assert_eq!(encode_query(&bag), "");
    }

    /// A single leading slash is deduplicated against the base URL
    #[test]
    fn build_url_joins_with_one_slash(path in "[a-z0-9]{1,10}(/[a-z0-9]{1,10}){0,3}", slash in any::<bool>()) {
        let client = client("http://x");
        let input = if slash { format!("/{}", path) } else { path.clone() };

        prop_assert_eq!(client.build_url(&input, None), format!("http://x/{}", path));
        prop_assert_eq!(client.build_url(&input, Some("")), format!("http://x/{}", path));
    }

    /// A trailing slash on the base URL never yields a double slash
    #[test]
    fn build_url_strips_trailing_base_slash(path in "[a-z0-9]{1,10}", slash in any::<bool>()) {
        let client = client("http://x/api/");
        let input = if slash { format!("/{}", path) } else { path.clone() };
        let url = client.build_url(&input, Some("a=1"));

        prop_assert_eq!(client.base_url(), "http://x/api");
        prop_assert_eq!(url, format!("http://x/api/{}?a=1", path));
    }
}
