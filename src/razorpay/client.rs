//! Async client for the Razorpay `v1` REST API.
//!
//! Only the calls the tools need are exposed: `create`, `fetch`, `all` and
//! `update` on orders, refunds and payment links, plus payment fetch and
//! refund. Responses are returned as raw JSON since the tools forward them to
//! the caller unchanged.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::{Client, Method, Url};
use serde_json::Value;
use tracing::debug;

use super::error::RazorpayError;
use crate::domains::tools::Payload;

/// A client for the Razorpay API, authenticated with an API key pair.
#[derive(Clone)]
pub struct RazorpayClient {
    http: Client,
    base_url: String,
    authorization: String,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for RazorpayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RazorpayClient")
            .field("base_url", &self.base_url)
            .field("authorization", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl RazorpayClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.razorpay.com";

    /// Create a client for the production API.
    ///
    /// # Errors
    ///
    /// Returns [`RazorpayError::InvalidCredentials`] if either part of the
    /// key pair is empty.
    pub fn new(key_id: &str, key_secret: &str) -> Result<Self, RazorpayError> {
        if key_id.is_empty() {
            return Err(RazorpayError::InvalidCredentials("key id is empty"));
        }
        if key_secret.is_empty() {
            return Err(RazorpayError::InvalidCredentials("key secret is empty"));
        }
        let token = STANDARD.encode(format!("{key_id}:{key_secret}"));
        Ok(Self {
            http: Client::new(),
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            authorization: format!("Basic {token}"),
            timeout: None,
        })
    }

    /// Point the client at another API host (tests, proxies).
    ///
    /// # Errors
    ///
    /// Returns [`RazorpayError::InvalidBaseUrl`] unless the URL is `http` or
    /// `https`.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, RazorpayError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/');
        let host = trimmed
            .strip_prefix("https://")
            .or_else(|| trimmed.strip_prefix("http://"));
        match host {
            Some(host) if !host.is_empty() && Url::parse(trimmed).is_ok() => {
                self.base_url = trimmed.to_string();
                Ok(self)
            }
            _ => Err(RazorpayError::InvalidBaseUrl(base_url)),
        }
    }

    /// Abort any request that takes longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn orders(&self) -> Resource<'_> {
        Resource::new(self, "orders")
    }

    pub fn refunds(&self) -> Resource<'_> {
        Resource::new(self, "refunds")
    }

    pub fn payment_links(&self) -> Resource<'_> {
        Resource::new(self, "payment_links")
    }

    pub fn payments(&self) -> Payments<'_> {
        Payments { client: self }
    }

    /// `{base_url}/v1/{segments...}`, each segment percent-encoded so an id
    /// can never leave its own path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, RazorpayError> {
        if let Some(bad) = segments
            .iter()
            .find(|s| matches!(s.trim(), "" | "." | ".."))
        {
            return Err(RazorpayError::InvalidId(bad.to_string()));
        }
        let invalid = || RazorpayError::InvalidBaseUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .push("v1")
            .extend(segments);
        Ok(url)
    }

    async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Payload>,
        body: Option<&Value>,
    ) -> Result<Value, RazorpayError> {
        let mut url = self.endpoint(segments)?;
        let context = format!("{method} {}", url.path());
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let encoded = serde_urlencoded::to_string(query.to_query_pairs())?;
            url.set_query(Some(&encoded));
        }

        debug!(request = %context, "Calling Razorpay API");

        let mut req = self
            .http
            .request(method, url)
            .header(reqwest::header::AUTHORIZATION, self.authorization.as_str());
        if let Some(body) = body {
            req = req.json(body);
        }
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await.map_err(|source| RazorpayError::Http {
            context: context.clone(),
            source,
        })?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Value>()
                .await
                .map_err(|source| RazorpayError::Decode { context, source });
        }

        let body = response
            .text()
            .await
            .map_err(|source| RazorpayError::Http {
                context: context.clone(),
                source,
            })?;
        Err(RazorpayError::from_response(context, status, body))
    }
}

/// CRUD operations on one API collection, e.g. `/v1/orders`.
#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    client: &'a RazorpayClient,
    name: &'static str,
}

impl<'a> Resource<'a> {
    fn new(client: &'a RazorpayClient, name: &'static str) -> Self {
        Self { client, name }
    }

    /// `POST /v1/{resource}`
    pub async fn create(&self, payload: &Payload) -> Result<Value, RazorpayError> {
        let body = payload.to_json();
        self.client
            .send(Method::POST, &[self.name], None, Some(&body))
            .await
    }

    /// `GET /v1/{resource}/{id}`
    pub async fn fetch(&self, id: &str, params: &Payload) -> Result<Value, RazorpayError> {
        self.client
            .send(Method::GET, &[self.name, id], Some(params), None)
            .await
    }

    /// `GET /v1/{resource}` with filters and pagination in the query string.
    pub async fn all(&self, query: &Payload) -> Result<Value, RazorpayError> {
        self.client
            .send(Method::GET, &[self.name], Some(query), None)
            .await
    }

    /// `PATCH /v1/{resource}/{id}`
    pub async fn update(&self, id: &str, payload: &Payload) -> Result<Value, RazorpayError> {
        let body = payload.to_json();
        self.client
            .send(Method::PATCH, &[self.name, id], None, Some(&body))
            .await
    }
}

/// Payment operations.
#[derive(Debug, Clone, Copy)]
pub struct Payments<'a> {
    client: &'a RazorpayClient,
}

impl Payments<'_> {
    /// `GET /v1/payments/{id}`
    pub async fn fetch(&self, id: &str) -> Result<Value, RazorpayError> {
        self.client
            .send(Method::GET, &["payments", id], None, None)
            .await
    }

    /// `POST /v1/payments/{id}/refund`
    ///
    /// `amount` is in the currency sub-unit and is merged into `data`.
    pub async fn refund(
        &self,
        id: &str,
        amount: i64,
        data: &Payload,
    ) -> Result<Value, RazorpayError> {
        let mut body = data.to_json();
        if let Value::Object(map) = &mut body {
            map.insert("amount".to_string(), Value::from(amount));
        }
        self.client
            .send(
                Method::POST,
                &["payments", id, "refund"],
                None,
                Some(&body),
            )
            .await
    }
}
