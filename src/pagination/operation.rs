//! Paginator for named provider operations.

use super::{AggregatedResult, ContinuationToken, Page, PageMetadata};
use crate::client::ClientHandle;
use crate::error::{BoxError, DecodeError, ProviderError};
use crate::wire::WireMap;
use parking_lot::Mutex;
use serde_json::Value;
use tracing::trace;

/// Names of the request and response fields carrying the continuation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpec {
    /// Request parameter the token is sent in.
    pub input: &'static str,
    /// Response field the next token is read from.
    pub output: &'static str,
}

impl TokenSpec {
    /// `NextToken` in both directions.
    pub const NEXT_TOKEN: TokenSpec = TokenSpec::new("NextToken", "NextToken");

    /// Create a token spec.
    pub const fn new(input: &'static str, output: &'static str) -> Self {
        Self { input, output }
    }
}

/// Drives one provider operation across all of its pages.
///
/// The fixed request parameters are sent with every page; the continuation
/// token is injected under [`TokenSpec::input`] from the second page on.
#[derive(Debug)]
pub struct OperationPaginator<'a> {
    client: &'a ClientHandle,
    operation: &'static str,
    params: WireMap,
    tokens: TokenSpec,
}

impl<'a> OperationPaginator<'a> {
    /// Create a paginator for `operation` on `client`.
    pub fn new(
        client: &'a ClientHandle,
        operation: &'static str,
        params: WireMap,
        tokens: TokenSpec,
    ) -> Self {
        Self {
            client,
            operation,
            params,
            tokens,
        }
    }

    /// Fetch one raw page, returning the response and the next token.
    pub async fn fetch_page(
        &self,
        token: Option<Value>,
    ) -> Result<(WireMap, Option<Value>), ProviderError> {
        let mut params = self.params.clone();
        if let Some(token) = token {
            params.insert(self.tokens.input.to_string(), token);
        }

        let response = self.client.invoke(self.operation, params).await?;
        let next = response
            .get(self.tokens.output)
            .filter(|token| !token.is_exhausted())
            .cloned();

        Ok((response, next))
    }

    /// Drain every page, decoding each response with `decode`.
    ///
    /// `decode` turns one response into that page's items and metadata.
    pub async fn aggregate<T, M, F>(&self, decode: F) -> Result<AggregatedResult<T, M>, BoxError>
    where
        M: PageMetadata,
        F: FnMut(&WireMap) -> Result<(Vec<T>, M), DecodeError>,
    {
        let decode = Mutex::new(decode);
        let decode = &decode;

        super::aggregate(|token: Option<Value>| async move {
            let (response, next_token) = self.fetch_page(token).await?;
            let (items, metadata) = {
                let mut decode = decode.lock();
                (*decode)(&response)?
            };
            trace!(operation = self.operation, items = items.len(), "Decoded page");

            Ok::<_, BoxError>(Page {
                items,
                next_token,
                metadata,
            })
        })
        .await
    }

    /// Drain every page, collecting the records listed under `field`.
    pub async fn collect<T, F>(&self, field: &'static str, mut decode: F) -> Result<Vec<T>, BoxError>
    where
        F: FnMut(&WireMap) -> Result<T, DecodeError>,
    {
        let result: AggregatedResult<T, ()> = self
            .aggregate(|response| {
                let items = crate::wire::list(response, field)?
                    .iter()
                    .map(|entry| crate::wire::as_map(entry, field).and_then(&mut decode))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok((items, ()))
            })
            .await?;

        Ok(result.into_items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockProviderClient;
    use serde_json::json;
    use std::sync::Arc;

    fn handle(mock: &Arc<MockProviderClient>) -> ClientHandle {
        ClientHandle::new("ec2", "us-east-2", mock.clone())
    }

    #[tokio::test]
    async fn test_injects_token_and_keeps_fixed_params() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response(
            "DescribeThings",
            json!({"Things": [{"Id": "1"}], "NextToken": "t1"}),
        );
        mock.push_response("DescribeThings", json!({"Things": [{"Id": "2"}]}));

        let client = handle(&mock);
        let mut params = WireMap::new();
        params.insert("Filter".into(), json!("x"));
        let paginator =
            OperationPaginator::new(&client, "DescribeThings", params, TokenSpec::NEXT_TOKEN);

        let ids = paginator
            .collect("Things", |thing| crate::wire::required_str(thing, "Id"))
            .await
            .unwrap();
        assert_eq!(ids, vec!["1", "2"]);

        let calls = mock.calls_for("DescribeThings");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].get("NextToken"), None);
        assert_eq!(calls[0]["Filter"], json!("x"));
        assert_eq!(calls[1]["NextToken"], json!("t1"));
        assert_eq!(calls[1]["Filter"], json!("x"));
    }

    #[tokio::test]
    async fn test_empty_token_ends_listing() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("ListThings", json!({"Things": [], "NextToken": ""}));

        let client = handle(&mock);
        let paginator =
            OperationPaginator::new(&client, "ListThings", WireMap::new(), TokenSpec::NEXT_TOKEN);
        let items: Vec<String> = paginator
            .collect("Things", |thing| crate::wire::required_str(thing, "Id"))
            .await
            .unwrap();

        assert!(items.is_empty());
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failure_discards_earlier_pages() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("ListThings", json!({"Things": [{"Id": "1"}], "NextToken": "t1"}));
        mock.push_error(
            "ListThings",
            ProviderError::service("InternalFailure", "try later"),
        );

        let client = handle(&mock);
        let paginator =
            OperationPaginator::new(&client, "ListThings", WireMap::new(), TokenSpec::NEXT_TOKEN);
        let err = paginator
            .collect("Things", |thing| crate::wire::required_str(thing, "Id"))
            .await
            .unwrap_err();

        let provider = err.downcast_ref::<ProviderError>().unwrap();
        assert_eq!(provider.code(), Some("InternalFailure"));
    }

    #[tokio::test]
    async fn test_aggregate_folds_metadata_until_empty_key() {
        let mock = Arc::new(MockProviderClient::new());
        mock.push_response("Scan", json!({"Items": [1, 2], "Count": 2, "LastEvaluatedKey": {"pk": "b"}}));
        mock.push_response("Scan", json!({"Items": [3], "Count": 1, "LastEvaluatedKey": {}}));

        let client = handle(&mock);
        let tokens = TokenSpec::new("ExclusiveStartKey", "LastEvaluatedKey");
        let paginator = OperationPaginator::new(&client, "Scan", WireMap::new(), tokens);
        let result = paginator
            .aggregate(|response| {
                let items = crate::wire::list(response, "Items")?.to_vec();
                let count = response.get("Count").and_then(Value::as_u64).unwrap_or_default();
                Ok((items, crate::pagination::Summed(count)))
            })
            .await
            .unwrap();

        assert_eq!(result.pages, 2);
        assert_eq!(result.items, vec![json!(1), json!(2), json!(3)]);
        assert_eq!(result.metadata, crate::pagination::Summed(3));
        assert_eq!(mock.calls_for("Scan")[1]["ExclusiveStartKey"], json!({"pk": "b"}));
    }
}
