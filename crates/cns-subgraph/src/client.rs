//! Graph-query client over HTTP

use crate::inject::FaultInjection;
use crate::{Error, GraphFault, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Health query document
pub const META_QUERY: &str = "{ _meta { block { number } hasIndexingErrors } }";

/// Subgraph client configuration
#[derive(Debug, Clone)]
pub struct SubgraphConfig {
    /// Query endpoint URL
    pub endpoint: String,
    /// Debug injection profile
    pub injection: FaultInjection,
}

impl SubgraphConfig {
    /// Create a configuration for an endpoint
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            injection: FaultInjection::None,
        }
    }

    /// Set the debug injection profile
    pub fn with_injection(mut self, injection: FaultInjection) -> Self {
        self.injection = injection;
        self
    }
}

/// Latest indexed block from the `_meta` object
#[derive(Debug, Clone, Deserialize)]
pub struct MetaBlock {
    /// Block number
    pub number: u64,
}

/// Index health snapshot
///
/// Lets callers distinguish an unreachable index from one that is up
/// but behind or recording indexing errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubgraphMeta {
    /// Latest indexed block
    pub block: MetaBlock,
    /// Whether the index recorded errors while indexing
    pub has_indexing_errors: bool,
}

/// Client for the eventually-consistent indexing service
pub struct SubgraphClient {
    config: SubgraphConfig,
    client: reqwest::Client,
}

impl SubgraphClient {
    /// Create a new subgraph client
    pub fn new(config: SubgraphConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// The configured endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    async fn apply_injection(&self, document: &str) -> Result<()> {
        if let Some(delay) = self.config.injection.latency() {
            debug!("Delaying subgraph request by {:?}", delay);
            tokio::time::sleep(delay).await;
        }
        if let Some(fault) = self.config.injection.fault_for(document) {
            warn!("Injecting subgraph fault: {}", fault.message);
            return Err(Error::Injected(vec![fault]));
        }
        Ok(())
    }

    /// Execute a query document with variables
    pub async fn query<V: Serialize, T: DeserializeOwned>(
        &self,
        document: &str,
        variables: &V,
    ) -> Result<T> {
        #[derive(Serialize)]
        struct GraphRequest<'a, V> {
            query: &'a str,
            variables: &'a V,
        }

        #[derive(Deserialize)]
        struct GraphResponse<T> {
            data: Option<T>,
            #[serde(default)]
            errors: Option<Vec<GraphFault>>,
        }

        self.apply_injection(document).await?;

        let response = self
            .client
            .post(&self.config.endpoint)
            .json(&GraphRequest {
                query: document,
                variables,
            })
            .send()
            .await
            .map_err(|e| Error::Transport(format!("HTTP error: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Status(response.status().as_u16()));
        }

        let body: GraphResponse<T> = response
            .json()
            .await
            .map_err(|e| Error::Decode(format!("JSON decode error: {e}")))?;

        if let Some(errors) = body.errors {
            if !errors.is_empty() {
                warn!("Subgraph answered with {} fault(s)", errors.len());
                return Err(Error::Graph(errors));
            }
        }

        body.data
            .ok_or_else(|| Error::Decode("response carried no data".to_string()))
    }

    /// Fetch the index health snapshot
    ///
    /// Stays live in indexing-fault injection mode, unlike data queries.
    pub async fn meta(&self) -> Result<SubgraphMeta> {
        #[derive(Serialize)]
        struct NoVariables {}

        #[derive(Deserialize)]
        struct MetaData {
            #[serde(rename = "_meta")]
            meta: SubgraphMeta,
        }

        let data: MetaData = self.query(META_QUERY, &NoVariables {}).await?;
        debug!(
            "Subgraph at block {} (indexing errors: {})",
            data.meta.block.number, data.meta.has_indexing_errors
        );
        Ok(data.meta)
    }
}

/// Object-safe seam over the indexing service
///
/// Resolver code consumes this trait so the HTTP client can be swapped
/// for a double in tests.
#[async_trait]
pub trait IndexReader: Send + Sync {
    /// Execute a query document, returning loosely-typed data
    async fn query_raw(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value>;
}

#[async_trait]
impl IndexReader for SubgraphClient {
    async fn query_raw(
        &self,
        document: &str,
        variables: serde_json::Value,
    ) -> Result<serde_json::Value> {
        self.query(document, &variables).await
    }
}
