// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Top-level SDK handle.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use vellum_cms_config::CmsConfig;
use vellum_cms_credentials::{FileTokenStore, MemoryTokenStore, TokenStore};

use crate::api::ApiClient;
use crate::error::{CmsError, Result};
use crate::posts::PostPublisher;
use crate::session::SessionManager;
use crate::transport::{HttpTransport, Transport};

/// SDK version for identification.
const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Builder for constructing a [`CmsClient`].
pub struct CmsClientBuilder {
	base_url: Option<String>,
	request_timeout: Duration,
	token_store: Option<Arc<dyn TokenStore>>,
	transport: Option<Arc<dyn Transport>>,
}

impl CmsClientBuilder {
	pub fn new() -> Self {
		Self {
			base_url: None,
			request_timeout: vellum_cms_config::DEFAULT_REQUEST_TIMEOUT,
			token_store: None,
			transport: None,
		}
	}

	/// Base URL, token file and timeout from a loaded configuration.
	pub fn config(self, config: &CmsConfig) -> Self {
		self.base_url(&config.base_url)
			.request_timeout(config.request_timeout)
			.token_store(Arc::new(FileTokenStore::new(&config.token_path)))
	}

	/// Sets the server origin.
	///
	/// Example: `https://cms.example.org`
	pub fn base_url(mut self, url: impl Into<String>) -> Self {
		self.base_url = Some(url.into());
		self
	}

	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	/// Where the session token is persisted. Defaults to memory only.
	pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
		self.token_store = Some(store);
		self
	}

	/// Replace the HTTP transport. The base URL and timeout are then unused.
	pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
		self.transport = Some(transport);
		self
	}

	pub fn build(self) -> Result<CmsClient> {
		let transport: Arc<dyn Transport> = match self.transport {
			Some(transport) => transport,
			None => {
				let base_url = self
					.base_url
					.ok_or_else(|| CmsError::InvalidBaseUrl("no base URL configured".to_string()))?;
				let transport = HttpTransport::new(&base_url, self.request_timeout)?;
				info!(base_url = %transport.base_url(), sdk_version = SDK_VERSION, "CMS client initialized");
				Arc::new(transport)
			}
		};

		let store = self
			.token_store
			.unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

		let api = ApiClient::new(transport);
		Ok(CmsClient {
			sessions: Arc::new(SessionManager::new(api.clone(), store)),
			posts: PostPublisher::new(api.clone()),
			api,
		})
	}
}

impl Default for CmsClientBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Session, publishing and raw API access sharing one token.
#[derive(Debug, Clone)]
pub struct CmsClient {
	api: ApiClient,
	sessions: Arc<SessionManager>,
	posts: PostPublisher,
}

impl CmsClient {
	pub fn builder() -> CmsClientBuilder {
		CmsClientBuilder::new()
	}

	pub fn from_config(config: &CmsConfig) -> Result<Self> {
		Self::builder().config(config).build()
	}

	pub fn sessions(&self) -> &SessionManager {
		&self.sessions
	}

	pub fn posts(&self) -> &PostPublisher {
		&self.posts
	}

	pub fn api(&self) -> &ApiClient {
		&self.api
	}
}
