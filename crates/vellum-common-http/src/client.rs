// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Shared HTTP client with consistent User-Agent header.

use reqwest::{Client, ClientBuilder};

const PRODUCT: &str = "vellum";

/// Creates a new HTTP client with the standard Vellum User-Agent header.
pub fn new_client() -> Result<Client, reqwest::Error> {
	builder().build()
}

/// Creates a new HTTP client builder with the standard Vellum User-Agent header.
///
/// Use this when you need to customize the client (e.g., set timeout).
///
/// # Example
/// ```ignore
/// let client = vellum_common_http::builder()
///     .timeout(Duration::from_secs(30))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	builder_with_user_agent(user_agent())
}

/// Creates a new HTTP client builder with a custom User-Agent header.
pub fn builder_with_user_agent(user_agent: impl Into<String>) -> ClientBuilder {
	let user_agent = user_agent.into();
	tracing::trace!(user_agent = %user_agent, "building HTTP client");
	Client::builder().user_agent(user_agent)
}

/// Returns the standard Vellum User-Agent string.
///
/// Format: `vellum/{version} ({os}-{arch})`
/// Example: `vellum/0.1.0 (linux-x86_64)`
pub fn user_agent() -> String {
	format!(
		"{PRODUCT}/{} ({}-{})",
		env!("CARGO_PKG_VERSION"),
		std::env::consts::OS,
		std::env::consts::ARCH
	)
}
