// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The request seam between the SDK and the network.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;
use vellum_cms_credentials::AuthToken;

use crate::error::{CmsError, Result};

/// Sends one JSON request and returns the decoded JSON body.
///
/// Implementations must report a non-2xx response as
/// [`CmsError::Status`] and a request that never got a response as
/// [`CmsError::Network`]. An empty body decodes to [`Value::Null`].
#[async_trait]
pub trait Transport: Send + Sync {
	async fn request(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
		token: Option<&AuthToken>,
	) -> Result<Value>;
}

/// [`Transport`] over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	base_url: String,
	http_client: Client,
}

impl HttpTransport {
	/// Build a transport with the shared Vellum client and the given
	/// request timeout.
	pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self> {
		let http_client = vellum_common_http::builder()
			.timeout(request_timeout)
			.build()?;
		Self::with_client(base_url, http_client)
	}

	/// Use a preconfigured client.
	pub fn with_client(base_url: &str, http_client: Client) -> Result<Self> {
		let parsed = Url::parse(base_url).map_err(|e| CmsError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
		if !matches!(parsed.scheme(), "http" | "https") {
			return Err(CmsError::InvalidBaseUrl(format!(
				"{base_url}: scheme must be http or https"
			)));
		}

		Ok(Self {
			base_url: base_url.trim_end_matches('/').to_string(),
			http_client,
		})
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	fn url(&self, path: &str) -> String {
		if path.starts_with('/') {
			format!("{}{}", self.base_url, path)
		} else {
			format!("{}/{}", self.base_url, path)
		}
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn request(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
		token: Option<&AuthToken>,
	) -> Result<Value> {
		let url = self.url(path);
		debug!(method = %method, url = %url, authenticated = token.is_some(), "sending request");

		let mut request = self.http_client.request(method.clone(), &url);
		if let Some(token) = token {
			request = request.header(reqwest::header::AUTHORIZATION, token.bearer_header());
		}
		if let Some(body) = body {
			request = request.json(&body);
		}

		let response = request.send().await?;
		let status = response.status();

		if !status.is_success() {
			let text = response.text().await.unwrap_or_default();
			let message = error_message(&text).unwrap_or_else(|| {
				status
					.canonical_reason()
					.unwrap_or("unknown error")
					.to_string()
			});
			error!(method = %method, url = %url, status = status.as_u16(), message = %message, "request failed");
			return Err(CmsError::Status {
				status: status.as_u16(),
				message,
			});
		}

		if status == StatusCode::NO_CONTENT {
			return Ok(Value::Null);
		}

		let bytes = response.bytes().await?;
		if bytes.iter().all(u8::is_ascii_whitespace) {
			return Ok(Value::Null);
		}

		Ok(serde_json::from_slice(&bytes)?)
	}
}

/// Pull a human-readable message out of an error body.
///
/// Accepts `{"error": "..."}`, `{"message": "..."}` or plain text.
fn error_message(body: &str) -> Option<String> {
	let body = body.trim();
	if body.is_empty() {
		return None;
	}

	if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
		for key in ["error", "message"] {
			if let Some(Value::String(message)) = map.get(key) {
				return Some(message.clone());
			}
		}
	}

	Some(body.to_string())
}
