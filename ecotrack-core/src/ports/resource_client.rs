//! Resource client port - every remote call goes through here

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::domain::result::Result;

/// HTTP methods used by the Ecotrack API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Delete => "DELETE",
        }
    }
}

/// A single request against a named resource
///
/// The path is held as unencoded segments; adapters are responsible for
/// percent-encoding them along with the query values.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
    /// Message used when a failed response carries neither `error` nor `message`
    pub fallback_message: Option<String>,
}

impl ApiRequest {
    pub fn new<I, S>(method: Method, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            method,
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
            body: None,
            fallback_message: None,
        }
    }

    pub fn get<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Get, segments)
    }

    pub fn post<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Post, segments)
    }

    pub fn delete<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Method::Delete, segments)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn json(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    pub fn fallback(mut self, message: impl Into<String>) -> Self {
        self.fallback_message = Some(message.into());
        self
    }

    /// Display form of the path, e.g. `/api/users/42/favorites`
    pub fn path(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Issues requests and normalizes their outcome
///
/// Implementations must treat any status outside 200..=299 as a failure,
/// extract the message from `error` then `message`, keep network failures
/// distinct from API failures, and never retry or cache.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    async fn request(&self, request: ApiRequest) -> Result<JsonValue>;
}
