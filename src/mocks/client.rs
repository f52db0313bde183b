//! Mock provider client and client factory.

use crate::client::{ClientFactory, ClientSpec, ProviderClient};
use crate::error::{DecodeError, ProviderError};
use crate::wire::WireMap;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

type Reply = Result<WireMap, ProviderError>;

/// Scripted provider client.
///
/// Replies are queued per operation and consumed in order; a reply set with
/// [`MockProviderClient::set_response`] is returned whenever the queue for
/// that operation is empty. Every call is recorded.
#[derive(Default)]
pub struct MockProviderClient {
    queued: Mutex<HashMap<String, VecDeque<Reply>>>,
    standing: Mutex<HashMap<String, WireMap>>,
    calls: Mutex<Vec<(String, WireMap)>>,
}

impl MockProviderClient {
    /// Create a client with nothing scripted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for `operation`.
    ///
    /// A value that is not a JSON object is replayed as a decode failure.
    pub fn push_response(&self, operation: &str, response: Value) {
        self.push(operation, into_map(response));
    }

    /// Queue a failure for `operation`.
    pub fn push_error(&self, operation: &str, error: ProviderError) {
        self.push(operation, Err(error));
    }

    /// Respond to `operation` with `response` whenever nothing is queued.
    pub fn set_response(&self, operation: &str, response: Value) {
        let map = match response {
            Value::Object(map) => map,
            _ => WireMap::new(),
        };
        self.standing.lock().insert(operation.to_string(), map);
    }

    /// Total number of calls.
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Parameters of every call to `operation`, in order.
    pub fn calls_for(&self, operation: &str) -> Vec<WireMap> {
        self.calls
            .lock()
            .iter()
            .filter(|(op, _)| op == operation)
            .map(|(_, params)| params.clone())
            .collect()
    }

    /// Operation names in call order.
    pub fn operations(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(op, _)| op.clone()).collect()
    }

    fn push(&self, operation: &str, reply: Reply) {
        self.queued
            .lock()
            .entry(operation.to_string())
            .or_default()
            .push_back(reply);
    }
}

fn into_map(value: Value) -> Reply {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ProviderError::Decode(DecodeError::invalid(
            "response",
            "an object",
        ))),
    }
}

#[async_trait]
impl ProviderClient for MockProviderClient {
    async fn invoke(&self, operation: &str, params: WireMap) -> Result<WireMap, ProviderError> {
        self.calls.lock().push((operation.to_string(), params));

        if let Some(reply) = self
            .queued
            .lock()
            .get_mut(operation)
            .and_then(VecDeque::pop_front)
        {
            return reply;
        }

        self.standing
            .lock()
            .get(operation)
            .cloned()
            .ok_or_else(|| ProviderError::other(format!("no scripted response for {}", operation)))
    }
}

impl std::fmt::Debug for MockProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProviderClient")
            .field("call_count", &self.call_count())
            .finish_non_exhaustive()
    }
}

/// Client factory handing out mock clients.
///
/// Clients for services registered with [`MockClientFactory::with_service`]
/// are returned for that service; every other service gets the shared
/// fallback client. Every [`ClientSpec`] is recorded.
pub struct MockClientFactory {
    fallback: Arc<MockProviderClient>,
    services: HashMap<String, Arc<MockProviderClient>>,
    specs: Mutex<Vec<ClientSpec>>,
    failure: Mutex<Option<(String, String)>>,
}

impl MockClientFactory {
    /// Create a factory with a fresh fallback client.
    pub fn new() -> Self {
        Self::with_client(Arc::new(MockProviderClient::new()))
    }

    /// Create a factory whose fallback is `client`.
    pub fn with_client(client: Arc<MockProviderClient>) -> Self {
        Self {
            fallback: client,
            services: HashMap::new(),
            specs: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Return `client` for `service`.
    pub fn with_service(mut self, service: &str, client: Arc<MockProviderClient>) -> Self {
        self.services.insert(service.to_string(), client);
        self
    }

    /// Fail every subsequent build with a service fault.
    pub fn fail_with(&self, code: &str, message: &str) {
        *self.failure.lock() = Some((code.to_string(), message.to_string()));
    }

    /// The fallback client.
    pub fn client(&self) -> Arc<MockProviderClient> {
        self.fallback.clone()
    }

    /// Every spec a client was requested for, in order.
    pub fn specs(&self) -> Vec<ClientSpec> {
        self.specs.lock().clone()
    }

    /// Specs requested for `service`.
    pub fn specs_for(&self, service: &str) -> Vec<ClientSpec> {
        self.specs
            .lock()
            .iter()
            .filter(|spec| spec.service == service)
            .cloned()
            .collect()
    }
}

impl Default for MockClientFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClientFactory for MockClientFactory {
    async fn create_client(&self, spec: &ClientSpec) -> Result<Arc<dyn ProviderClient>, ProviderError> {
        self.specs.lock().push(spec.clone());

        if let Some((code, message)) = self.failure.lock().clone() {
            return Err(ProviderError::service(code, message));
        }

        let client = self
            .services
            .get(&spec.service)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone());
        Ok(client)
    }
}

impl std::fmt::Debug for MockClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockClientFactory")
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .field("specs", &self.specs.lock().len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::TestFixtures;
    use serde_json::json;

    #[tokio::test]
    async fn test_queue_then_standing_response() {
        let mock = MockProviderClient::new();
        mock.push_response("Op", json!({"n": 1}));
        mock.set_response("Op", json!({"n": 0}));

        assert_eq!(mock.invoke("Op", WireMap::new()).await.unwrap()["n"], json!(1));
        assert_eq!(mock.invoke("Op", WireMap::new()).await.unwrap()["n"], json!(0));
        assert_eq!(mock.invoke("Op", WireMap::new()).await.unwrap()["n"], json!(0));
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unscripted_operation_fails() {
        let mock = MockProviderClient::new();
        let err = mock.invoke("Missing", WireMap::new()).await.unwrap_err();
        assert!(err.to_string().contains("Missing"));
        assert_eq!(mock.operations(), vec!["Missing"]);
    }

    #[tokio::test]
    async fn test_factory_routes_per_service() {
        let sts = Arc::new(MockProviderClient::new());
        sts.set_response("GetCallerIdentity", json!({"Account": "1"}));
        let factory = MockClientFactory::new().with_service("sts", sts.clone());

        let spec = ClientSpec {
            service: "sts".into(),
            region: "us-east-2".into(),
            credentials: TestFixtures::credentials(),
            config: Default::default(),
        };
        let client = factory.create_client(&spec).await.unwrap();
        client.invoke("GetCallerIdentity", WireMap::new()).await.unwrap();

        assert_eq!(sts.call_count(), 1);
        assert_eq!(factory.client().call_count(), 0);
        assert_eq!(factory.specs_for("sts").len(), 1);
    }

    #[tokio::test]
    async fn test_factory_failure() {
        let factory = MockClientFactory::new();
        factory.fail_with("InvalidClientTokenId", "bad token");
        let spec = ClientSpec {
            service: "s3".into(),
            region: "us-east-2".into(),
            credentials: TestFixtures::credentials(),
            config: Default::default(),
        };
        let Err(err) = factory.create_client(&spec).await else {
            panic!("factory should fail");
        };
        assert_eq!(err.code(), Some("InvalidClientTokenId"));
        assert_eq!(factory.specs().len(), 1);
    }
}
