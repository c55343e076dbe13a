use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::ResourceUrl;
use crate::models::customer::{Customer, CustomerForm};
use crate::models::training::{Training, TrainingForm};
use crate::service::link_resolver::{CustomerLookup, ResolutionError};

/// The two collections the remote service exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKind {
    Customers,
    Trainings,
}

impl CollectionKind {
    pub fn path(self) -> &'static str {
        match self {
            CollectionKind::Customers => "/api/customers",
            CollectionKind::Trainings => "/api/trainings",
        }
    }

    /// Key under `_embedded` in a collection response.
    pub fn embedded_key(self) -> &'static str {
        match self {
            CollectionKind::Customers => "customers",
            CollectionKind::Trainings => "trainings",
        }
    }
}

/// What a failed request was trying to do, kept in the error so callers
/// can surface a message naming the action the user took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchCollection(CollectionKind),
    Create(CollectionKind),
    Replace(CollectionKind),
    Delete(CollectionKind),
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            Operation::FetchCollection(CollectionKind::Customers) => "fetching customers",
            Operation::FetchCollection(CollectionKind::Trainings) => "fetching trainings",
            Operation::Create(CollectionKind::Customers) => "adding a new customer",
            Operation::Create(CollectionKind::Trainings) => "adding a new training",
            Operation::Replace(CollectionKind::Customers) => "editing a customer",
            Operation::Replace(CollectionKind::Trainings) => "editing a training",
            Operation::Delete(CollectionKind::Customers) => "deleting a customer",
            Operation::Delete(CollectionKind::Trainings) => "deleting a training",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("error when {operation}: {status}")]
    Status { operation: Operation, status: String },
    #[error("error when {operation}: {source}")]
    Transport {
        operation: Operation,
        #[source]
        source: reqwest::Error,
    },
    #[error("error when {operation}: unexpected response body: {source}")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

/// Client for the remote customer/training REST service.
///
/// Every call is one-shot: no retry, no configured timeout. A transport
/// failure or a non-2xx status becomes a [`RequestError`] naming the
/// attempted operation; callers decide whether to alert or just log.
#[derive(Debug, Clone)]
pub struct RestClient {
    base_url: String,
    http: reqwest::Client,
}

impl RestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self, kind: CollectionKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    async fn send(
        &self,
        operation: Operation,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, RequestError> {
        let response = request
            .send()
            .await
            .map_err(|source| RequestError::Transport { operation, source })?;
        if !response.status().is_success() {
            return Err(RequestError::Status {
                operation,
                status: response.status().to_string(),
            });
        }
        Ok(response)
    }

    async fn read_json(
        &self,
        operation: Operation,
        response: reqwest::Response,
    ) -> Result<Value, RequestError> {
        response
            .json()
            .await
            .map_err(|source| RequestError::Transport { operation, source })
    }

    /// GET the whole collection and unwrap the `_embedded` envelope. An
    /// absent envelope means an empty collection, not an error.
    pub async fn fetch_collection<T: DeserializeOwned>(
        &self,
        kind: CollectionKind,
    ) -> Result<Vec<T>, RequestError> {
        let operation = Operation::FetchCollection(kind);
        let request = self.http.get(self.collection_url(kind));
        let response = self.send(operation, request).await?;
        let body = self.read_json(operation, response).await?;
        embedded_items(body, kind.embedded_key())
            .map_err(|source| RequestError::Decode { operation, source })
    }

    pub async fn fetch_customers(&self) -> Result<Vec<Customer>, RequestError> {
        self.fetch_collection(CollectionKind::Customers).await
    }

    pub async fn fetch_trainings(&self) -> Result<Vec<Training>, RequestError> {
        self.fetch_collection(CollectionKind::Trainings).await
    }

    /// POST a payload to a collection; the server echoes the created
    /// representation back.
    pub async fn create<P: Serialize, T: DeserializeOwned>(
        &self,
        kind: CollectionKind,
        payload: &P,
    ) -> Result<T, RequestError> {
        let operation = Operation::Create(kind);
        let request = self.http.post(self.collection_url(kind)).json(payload);
        let response = self.send(operation, request).await?;
        let body = self.read_json(operation, response).await?;
        serde_json::from_value(body).map_err(|source| RequestError::Decode { operation, source })
    }

    /// PUT a full replacement payload to a resource's canonical URL.
    pub async fn replace<P: Serialize, T: DeserializeOwned>(
        &self,
        kind: CollectionKind,
        url: &ResourceUrl,
        payload: &P,
    ) -> Result<T, RequestError> {
        let operation = Operation::Replace(kind);
        let request = self.http.put(url.as_str()).json(payload);
        let response = self.send(operation, request).await?;
        let body = self.read_json(operation, response).await?;
        serde_json::from_value(body).map_err(|source| RequestError::Decode { operation, source })
    }

    /// DELETE a resource by its canonical URL. Any 2xx counts as success;
    /// the response body is ignored.
    pub async fn delete(&self, kind: CollectionKind, url: &ResourceUrl) -> Result<(), RequestError> {
        let operation = Operation::Delete(kind);
        self.send(operation, self.http.delete(url.as_str())).await?;
        Ok(())
    }

    pub async fn create_customer(&self, form: &CustomerForm) -> Result<Customer, RequestError> {
        self.create(CollectionKind::Customers, form).await
    }

    pub async fn replace_customer(
        &self,
        url: &ResourceUrl,
        form: &CustomerForm,
    ) -> Result<Customer, RequestError> {
        self.replace(CollectionKind::Customers, url, form).await
    }

    pub async fn create_training(&self, form: &TrainingForm) -> Result<Training, RequestError> {
        self.create(CollectionKind::Trainings, form).await
    }
}

// The linked-customer fetch deliberately skips the status check: an error
// body that parses as JSON still goes through name extraction and falls
// back there, matching how unresolved references degrade to a label.
#[async_trait]
impl CustomerLookup for RestClient {
    async fn fetch_customer(&self, url: &ResourceUrl) -> Result<Value, ResolutionError> {
        let response = self.http.get(url.as_str()).send().await?;
        Ok(response.json().await?)
    }
}

fn embedded_items<T: DeserializeOwned>(
    body: Value,
    key: &str,
) -> Result<Vec<T>, serde_json::Error> {
    match body.get("_embedded").and_then(|embedded| embedded.get(key)) {
        Some(items) => serde_json::from_value(items.clone()),
        None => Ok(Vec::new()),
    }
}
