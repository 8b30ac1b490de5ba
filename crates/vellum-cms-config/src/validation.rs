// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use crate::runtime::CmsConfig;
use crate::ConfigError;

/// Validate the configuration.
pub fn validate_config(config: &CmsConfig) -> Result<(), ConfigError> {
	validate_base_url(&config.base_url)?;

	if config.request_timeout.is_zero() {
		return Err(ConfigError::invalid_value(
			"api.request_timeout_secs",
			"timeout must be greater than zero",
		));
	}

	if config.default_locale.trim().is_empty() {
		return Err(ConfigError::invalid_value(
			"locale.default",
			"locale cannot be empty",
		));
	}

	Ok(())
}

fn validate_base_url(base_url: &str) -> Result<(), ConfigError> {
	let parsed = url::Url::parse(base_url)
		.map_err(|e| ConfigError::invalid_value("api.base_url", e.to_string()))?;

	match parsed.scheme() {
		"http" | "https" => {}
		other => {
			return Err(ConfigError::invalid_value(
				"api.base_url",
				format!("unsupported scheme {other:?}, expected http or https"),
			));
		}
	}

	if parsed.host_str().is_none() {
		return Err(ConfigError::invalid_value("api.base_url", "missing host"));
	}

	Ok(())
}
