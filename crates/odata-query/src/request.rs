//! Module: request
//! Responsibility: hand a compiled query to a caller-supplied transport.
//! Does not own: HTTP, retries, authentication or response decoding.
//! Boundary: exactly one `Transport::send` per terminal call.

use crate::{
    config::{ClientConfig, ConfigError},
    error::QueryError,
    query::QueryBuilder,
    traits::Entity,
};
use http::Method;
use serde::Serialize;
use std::fmt;
use thiserror::Error as ThisError;

///
/// Request
///
/// Everything a transport needs to issue one call. `query` is already
/// encoded and carries no leading `?`.
///

#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: String,
    pub body: Option<serde_json::Value>,
}

impl Request {
    /// Path and query joined the way they appear on the wire.
    #[must_use]
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

///
/// Transport
///
/// Caller-supplied sender. Implementations decide how the request is
/// issued and what a response looks like.
///

pub trait Transport {
    type Response;
    type Error;

    fn send(
        &self,
        request: Request,
    ) -> impl Future<Output = Result<Self::Response, Self::Error>> + Send;
}

///
/// RequestError
///

#[derive(Debug, ThisError)]
pub enum RequestError<E> {
    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("request body could not be serialized: {0}")]
    Body(serde_json::Error),

    #[error("transport failed: {0}")]
    Transport(E),
}

///
/// Client
///
/// Pairs a transport with the configuration every request shares.
///

pub struct Client<T> {
    config: ClientConfig,
    transport: T,
}

impl<T> fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<T: Transport> Client<T> {
    #[must_use]
    pub const fn new(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send a prepared request.
    pub async fn send(&self, request: Request) -> Result<T::Response, RequestError<T::Error>> {
        tracing::debug!(
            method = %request.method,
            path = %request.path,
            query = %request.query,
            "sending request"
        );

        self.transport
            .send(request)
            .await
            .map_err(RequestError::Transport)
    }
}

// ----------------------------------------------------------------------------
// Terminal calls
// ----------------------------------------------------------------------------

impl<E: Entity> QueryBuilder<E> {
    /// `GET` the entity set.
    pub async fn get<T: Transport>(
        &self,
        client: &Client<T>,
    ) -> Result<T::Response, RequestError<T::Error>> {
        self.send_to(client, Method::GET, E::ENTITY_SET, None).await
    }

    /// `POST` `body` to the entity set.
    pub async fn post<T: Transport, B: Serialize + ?Sized>(
        &self,
        client: &Client<T>,
        body: &B,
    ) -> Result<T::Response, RequestError<T::Error>> {
        let body = encode_body(body)?;

        self.send_to(client, Method::POST, E::ENTITY_SET, Some(body))
            .await
    }

    /// `PUT` `body` to the entity set.
    pub async fn put<T: Transport, B: Serialize + ?Sized>(
        &self,
        client: &Client<T>,
        body: &B,
    ) -> Result<T::Response, RequestError<T::Error>> {
        let body = encode_body(body)?;

        self.send_to(client, Method::PUT, E::ENTITY_SET, Some(body))
            .await
    }

    /// `PATCH` `body` to the entity set.
    pub async fn patch<T: Transport, B: Serialize + ?Sized>(
        &self,
        client: &Client<T>,
        body: &B,
    ) -> Result<T::Response, RequestError<T::Error>> {
        let body = encode_body(body)?;

        self.send_to(client, Method::PATCH, E::ENTITY_SET, Some(body))
            .await
    }

    /// `DELETE` against the entity set.
    pub async fn delete<T: Transport>(
        &self,
        client: &Client<T>,
    ) -> Result<T::Response, RequestError<T::Error>> {
        self.send_to(client, Method::DELETE, E::ENTITY_SET, None)
            .await
    }

    /// Send to an explicit resource path instead of the entity set,
    /// e.g. `Customers(42)/Orders`.
    pub async fn send_to<T: Transport>(
        &self,
        client: &Client<T>,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T::Response, RequestError<T::Error>> {
        let config = client.config();
        let query = self.build_with(config.lambda_variable())?;

        let request = Request {
            method,
            path: config.resolve_path(path)?,
            query: query.to_query_string(),
            body,
        };

        client.send(request).await
    }
}

fn encode_body<B: Serialize + ?Sized, E>(body: &B) -> Result<serde_json::Value, RequestError<E>> {
    serde_json::to_value(body).map_err(RequestError::Body)
}
