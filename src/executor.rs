use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::debounce::Debouncer;
use crate::sequencer::RequestSequencer;

/// One GraphQL operation execution request.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub operation: &'static str,
    pub variables: Value,
    /// Skip the client-side cache and force a fresh network fetch.
    pub bypass_cache: bool,
}

impl QueryRequest {
    pub fn new(operation: &'static str, variables: Value) -> Self {
        Self {
            operation,
            variables,
            bypass_cache: false,
        }
    }

    pub fn bypass_cache(mut self, bypass: bool) -> Self {
        self.bypass_cache = bypass;
        self
    }
}

#[derive(Debug, Error)]
pub enum QueryError {
    /// The executor rejected: network failure, server error.
    #[error("{operation}: transport failure: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: anyhow::Error,
    },
    /// The executor resolved but the expected top-level field is
    /// absent or null. Surfaced as a failure, never as an empty success.
    #[error("{operation}: response is missing field `{field}`")]
    MissingData {
        operation: &'static str,
        field: &'static str,
    },
    /// The response body does not have the expected shape.
    #[error("{operation}: could not decode response: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Remote query capability, resolving to the response `data` object.
/// Concrete transports (GraphQL client, plain HTTP) live outside this crate;
/// loaders only require this shape.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, request: QueryRequest) -> Result<Value, QueryError>;
}

/// Shared handle every loader receives: the transport plus the process-wide
/// sequencer and debouncer. Construct exactly one per client process.
#[derive(Clone)]
pub struct QueryContext {
    pub executor: Arc<dyn QueryExecutor>,
    pub sequencer: Arc<RequestSequencer>,
    pub debouncer: Arc<Debouncer>,
}

impl QueryContext {
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        Self {
            executor,
            sequencer: Arc::new(RequestSequencer::new()),
            debouncer: Arc::new(Debouncer::new()),
        }
    }
}

/// Pulls a required top-level field out of the response `data` object.
pub fn require_field<'a>(
    data: &'a Value,
    operation: &'static str,
    field: &'static str,
) -> Result<&'a Value, QueryError> {
    match data.get(field) {
        Some(value) if !value.is_null() => Ok(value),
        _ => Err(QueryError::MissingData { operation, field }),
    }
}

/// Decodes part of a response body into a view-model type.
pub fn decode<T: DeserializeOwned>(operation: &'static str, value: &Value) -> Result<T, QueryError> {
    serde_json::from_value(value.clone()).map_err(|source| QueryError::Decode { operation, source })
}
