use super::errors::ConnectorError;
use crate::configuration::RecordStoreSettings;
use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// Keyed-collection CRUD over a namespaced JSON document store. Keys are
/// assigned by the store on creation and never reused.
#[async_trait]
pub trait RecordStoreConnector: Send + Sync {
    /// Every record in the namespace; an empty namespace is an empty vec,
    /// not an error.
    async fn list_all(&self, namespace: &str) -> Result<Vec<(String, Value)>, ConnectorError>;

    /// Persists `fields` under a store-assigned key and returns that key.
    async fn create(&self, namespace: &str, fields: Value) -> Result<String, ConnectorError>;

    async fn get(&self, namespace: &str, id: &str) -> Result<Option<Value>, ConnectorError>;

    /// Merges `partial` into the record. `NotFound` when `id` is absent.
    async fn update(&self, namespace: &str, id: &str, partial: Value)
        -> Result<(), ConnectorError>;

    /// `NotFound` when `id` is absent; idempotent-delete policy belongs to
    /// the caller, not the store.
    async fn delete(&self, namespace: &str, id: &str) -> Result<(), ConnectorError>;

    /// Reads a top-level singleton document such as the site settings.
    async fn read_singleton(&self, path: &str) -> Result<Option<Value>, ConnectorError>;

    /// Merges into a singleton document, creating it when absent.
    async fn merge_singleton(&self, path: &str, partial: Value) -> Result<(), ConnectorError>;
}

/// HTTP client for an RTDB-shaped document store: every node lives at
/// `{base}/{path}.json`, collections POST to the namespace node and get a
/// generated key back as `{"name": key}`.
pub struct RecordStoreClient {
    base_url: String,
    auth_token: Option<String>,
    http_client: reqwest::Client,
}

impl RecordStoreClient {
    pub fn new(config: &RecordStoreSettings) -> Result<Self, ConnectorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .map_err(|err| ConnectorError::StoreUnavailable(format!("HTTP client error: {}", err)))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            http_client,
        })
    }

    fn node_url(&self, path: &str) -> String {
        match &self.auth_token {
            Some(token) => format!("{}/{}.json?auth={}", self.base_url, path, token),
            None => format!("{}/{}.json", self.base_url, path),
        }
    }

    async fn request_node(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ConnectorError> {
        let mut builder = self.http_client.request(method, self.node_url(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ConnectorError::StoreUnavailable(format!(
                "store answered {} for {}: {}",
                status, path, body
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|err| ConnectorError::InvalidResponse(format!("{} at {}", err, path)))
    }
}

#[async_trait]
impl RecordStoreConnector for RecordStoreClient {
    #[tracing::instrument(name = "List records.", skip(self))]
    async fn list_all(&self, namespace: &str) -> Result<Vec<(String, Value)>, ConnectorError> {
        match self.request_node(Method::GET, namespace, None).await? {
            Value::Null => Ok(vec![]),
            Value::Object(entries) => Ok(entries.into_iter().collect()),
            other => Err(ConnectorError::InvalidResponse(format!(
                "expected an object under {}, got {}",
                namespace, other
            ))),
        }
    }

    #[tracing::instrument(name = "Create record.", skip(self, fields))]
    async fn create(&self, namespace: &str, fields: Value) -> Result<String, ConnectorError> {
        let response = self
            .request_node(Method::POST, namespace, Some(&fields))
            .await?;

        response
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                ConnectorError::InvalidResponse(format!(
                    "store did not return a generated key for {}",
                    namespace
                ))
            })
    }

    #[tracing::instrument(name = "Fetch record.", skip(self))]
    async fn get(&self, namespace: &str, id: &str) -> Result<Option<Value>, ConnectorError> {
        let node = format!("{}/{}", namespace, id);
        match self.request_node(Method::GET, &node, None).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    #[tracing::instrument(name = "Update record.", skip(self, partial))]
    async fn update(
        &self,
        namespace: &str,
        id: &str,
        partial: Value,
    ) -> Result<(), ConnectorError> {
        // a PATCH on a missing node would silently create it, check first
        if self.get(namespace, id).await?.is_none() {
            return Err(ConnectorError::NotFound(format!("{}/{}", namespace, id)));
        }

        let node = format!("{}/{}", namespace, id);
        self.request_node(Method::PATCH, &node, Some(&partial))
            .await?;
        Ok(())
    }

    #[tracing::instrument(name = "Delete record.", skip(self))]
    async fn delete(&self, namespace: &str, id: &str) -> Result<(), ConnectorError> {
        if self.get(namespace, id).await?.is_none() {
            return Err(ConnectorError::NotFound(format!("{}/{}", namespace, id)));
        }

        let node = format!("{}/{}", namespace, id);
        self.request_node(Method::DELETE, &node, None).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Read singleton.", skip(self))]
    async fn read_singleton(&self, path: &str) -> Result<Option<Value>, ConnectorError> {
        match self.request_node(Method::GET, path, None).await? {
            Value::Null => Ok(None),
            value => Ok(Some(value)),
        }
    }

    #[tracing::instrument(name = "Merge singleton.", skip(self, partial))]
    async fn merge_singleton(&self, path: &str, partial: Value) -> Result<(), ConnectorError> {
        self.request_node(Method::PATCH, path, Some(&partial))
            .await?;
        Ok(())
    }
}

pub mod mock {
    use super::*;
    use chrono::Utc;
    use rand::Rng;
    use serde_json::Map;
    use tokio::sync::Mutex;

    const PUSH_CHARS: &[u8] = b"-0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ_abcdefghijklmnopqrstuvwxyz";

    /// Store-style generated key: millisecond timestamp prefix so keys
    /// sort by creation time, random tail so they never collide.
    pub fn push_id() -> String {
        let mut millis = Utc::now().timestamp_millis();
        let mut prefix = [0u8; 8];
        for slot in prefix.iter_mut().rev() {
            *slot = PUSH_CHARS[(millis % 64) as usize];
            millis /= 64;
        }

        let mut rng = rand::thread_rng();
        let tail: String = (0..12)
            .map(|_| PUSH_CHARS[rng.gen_range(0..PUSH_CHARS.len())] as char)
            .collect();

        format!("-{}{}", std::str::from_utf8(&prefix).unwrap(), tail)
    }

    /// In-memory stand-in for the document store, shaped like the real
    /// tree: one object per namespace, records keyed by generated id.
    #[derive(Default)]
    pub struct InMemoryRecordStore {
        tree: Mutex<Map<String, Value>>,
    }

    impl InMemoryRecordStore {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn record_count(&self, namespace: &str) -> usize {
            let tree = self.tree.lock().await;
            tree.get(namespace)
                .and_then(Value::as_object)
                .map(|records| records.len())
                .unwrap_or(0)
        }
    }

    fn merge_into(target: &mut Map<String, Value>, partial: Value) {
        if let Value::Object(partial) = partial {
            for (key, value) in partial {
                target.insert(key, value);
            }
        }
    }

    #[async_trait]
    impl RecordStoreConnector for InMemoryRecordStore {
        async fn list_all(
            &self,
            namespace: &str,
        ) -> Result<Vec<(String, Value)>, ConnectorError> {
            let tree = self.tree.lock().await;
            match tree.get(namespace) {
                Some(Value::Object(records)) => Ok(records
                    .iter()
                    .map(|(id, value)| (id.clone(), value.clone()))
                    .collect()),
                _ => Ok(vec![]),
            }
        }

        async fn create(&self, namespace: &str, fields: Value) -> Result<String, ConnectorError> {
            let mut tree = self.tree.lock().await;
            let records = tree
                .entry(namespace.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            let id = push_id();
            records
                .as_object_mut()
                .expect("namespace node is always an object")
                .insert(id.clone(), fields);
            Ok(id)
        }

        async fn get(&self, namespace: &str, id: &str) -> Result<Option<Value>, ConnectorError> {
            let tree = self.tree.lock().await;
            Ok(tree
                .get(namespace)
                .and_then(|records| records.get(id))
                .cloned())
        }

        async fn update(
            &self,
            namespace: &str,
            id: &str,
            partial: Value,
        ) -> Result<(), ConnectorError> {
            let mut tree = self.tree.lock().await;
            let record = tree
                .get_mut(namespace)
                .and_then(|records| records.get_mut(id))
                .ok_or_else(|| ConnectorError::NotFound(format!("{}/{}", namespace, id)))?;

            let fields = record
                .as_object_mut()
                .ok_or_else(|| ConnectorError::InvalidResponse(format!("{}/{}", namespace, id)))?;
            merge_into(fields, partial);
            Ok(())
        }

        async fn delete(&self, namespace: &str, id: &str) -> Result<(), ConnectorError> {
            let mut tree = self.tree.lock().await;
            let removed = tree
                .get_mut(namespace)
                .and_then(Value::as_object_mut)
                .and_then(|records| records.remove(id));
            match removed {
                Some(_) => Ok(()),
                None => Err(ConnectorError::NotFound(format!("{}/{}", namespace, id))),
            }
        }

        async fn read_singleton(&self, path: &str) -> Result<Option<Value>, ConnectorError> {
            let tree = self.tree.lock().await;
            Ok(tree.get(path).cloned())
        }

        async fn merge_singleton(&self, path: &str, partial: Value) -> Result<(), ConnectorError> {
            let mut tree = self.tree.lock().await;
            let node = tree
                .entry(path.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            let fields = node
                .as_object_mut()
                .ok_or_else(|| ConnectorError::InvalidResponse(path.to_string()))?;
            merge_into(fields, partial);
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::push_id;

        #[test]
        fn push_ids_are_unique() {
            let mut ids: Vec<String> = (0..256).map(|_| push_id()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), 256);
        }

        #[test]
        fn push_ids_sort_by_generation_time() {
            let first = push_id();
            std::thread::sleep(std::time::Duration::from_millis(2));
            let second = push_id();
            assert!(first < second);
        }
    }
}
