// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authenticated, typed requests on top of a [`Transport`].

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::RwLock;
use vellum_cms_credentials::AuthToken;

use crate::error::Result;
use crate::transport::Transport;

/// Shared handle that attaches the current bearer token to every request.
///
/// Clones share the transport and the token cell, so the session manager and
/// the post publisher always send the same token.
#[derive(Clone)]
pub struct ApiClient {
	transport: Arc<dyn Transport>,
	token: Arc<RwLock<Option<AuthToken>>>,
}

impl ApiClient {
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self {
			transport,
			token: Arc::new(RwLock::new(None)),
		}
	}

	pub async fn set_token(&self, token: Option<AuthToken>) {
		*self.token.write().await = token;
	}

	pub async fn token(&self) -> Option<AuthToken> {
		self.token.read().await.clone()
	}

	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
		self.send(Method::GET, path, None).await
	}

	pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T> {
		self.send(Method::POST, path, Some(serde_json::to_value(body)?))
			.await
	}

	pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
		&self,
		path: &str,
		body: &B,
	) -> Result<T> {
		self.send(Method::PATCH, path, Some(serde_json::to_value(body)?))
			.await
	}

	/// Request with an explicit token, bypassing the shared cell.
	pub(crate) async fn get_with_token<T: DeserializeOwned>(
		&self,
		path: &str,
		token: &AuthToken,
	) -> Result<T> {
		let value = self
			.transport
			.request(Method::GET, path, None, Some(token))
			.await?;
		Ok(serde_json::from_value(value)?)
	}

	async fn send<T: DeserializeOwned>(
		&self,
		method: Method,
		path: &str,
		body: Option<serde_json::Value>,
	) -> Result<T> {
		let token = self.token().await;
		let value = self
			.transport
			.request(method, path, body, token.as_ref())
			.await?;
		Ok(serde_json::from_value(value)?)
	}
}

impl std::fmt::Debug for ApiClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ApiClient").finish_non_exhaustive()
	}
}
