// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Scripted in-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;
use vellum_cms_credentials::AuthToken;

use crate::error::{CmsError, Result};
use crate::transport::Transport;

#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
	pub method: Method,
	pub path: String,
	pub body: Option<Value>,
	pub token: Option<String>,
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct FakeTransport {
	responses: Mutex<VecDeque<Result<Value>>>,
	calls: Mutex<Vec<Recorded>>,
}

impl FakeTransport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn push_ok(&self, value: Value) {
		self.responses.lock().unwrap().push_back(Ok(value));
	}

	pub fn push_status(&self, status: u16, message: &str) {
		self.responses.lock().unwrap().push_back(Err(CmsError::Status {
			status,
			message: message.to_string(),
		}));
	}

	pub fn calls(&self) -> Vec<Recorded> {
		self.calls.lock().unwrap().clone()
	}

	/// `"METHOD path"` for each request, in order.
	pub fn call_log(&self) -> Vec<String> {
		self.calls()
			.iter()
			.map(|c| format!("{} {}", c.method, c.path))
			.collect()
	}
}

#[async_trait]
impl Transport for FakeTransport {
	async fn request(
		&self,
		method: Method,
		path: &str,
		body: Option<Value>,
		token: Option<&AuthToken>,
	) -> Result<Value> {
		self.calls.lock().unwrap().push(Recorded {
			method,
			path: path.to_string(),
			body,
			token: token.map(|t| t.expose().to_string()),
		});
		self.responses
			.lock()
			.unwrap()
			.pop_front()
			.unwrap_or_else(|| panic!("no scripted response for {path}"))
	}
}
