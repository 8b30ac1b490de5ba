// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Fully resolved runtime configuration.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layer::{ApiLayer, ConfigLayer, LoggingLayer};
use crate::paths::PathsConfig;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_LOCALE: &str = "ko";

/// Configuration consumed by the SDK and the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CmsConfig {
	/// Server origin; API paths such as `/api/posts` are joined onto it.
	pub base_url: String,
	#[serde(with = "duration_secs")]
	pub request_timeout: Duration,
	pub default_locale: String,
	/// Where the bearer token is persisted between runs.
	pub token_path: PathBuf,
	pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	Warn,
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Error => "error",
			Self::Warn => "warn",
			Self::Info => "info",
			Self::Debug => "debug",
			Self::Trace => "trace",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Compact,
	Pretty,
	Json,
}

mod duration_secs {
	use serde::{Deserialize, Deserializer, Serializer};
	use std::time::Duration;

	pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u64(duration.as_secs())
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
	where
		D: Deserializer<'de>,
	{
		let secs = u64::deserialize(deserializer)?;
		Ok(Duration::from_secs(secs))
	}
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: LogLevel::Info,
			format: LogFormat::Compact,
		}
	}
}

impl CmsConfig {
	/// Build from a merged layer, filling gaps with built-in defaults.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		let ApiLayer {
			base_url,
			request_timeout_secs,
		} = layer.api.unwrap_or_default();

		let base_url = base_url
			.map(|u| u.trim_end_matches('/').to_string())
			.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

		let request_timeout = request_timeout_secs
			.map(Duration::from_secs)
			.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

		let default_locale = layer
			.locale
			.and_then(|l| l.default)
			.map(|l| l.to_lowercase())
			.unwrap_or_else(|| DEFAULT_LOCALE.to_string());

		let token_path = layer
			.credentials
			.and_then(|c| c.token_path)
			.unwrap_or(paths.credentials_file);

		Ok(Self {
			base_url,
			request_timeout,
			default_locale,
			token_path,
			logging: build_logging_config(layer.logging),
		})
	}
}

fn build_logging_config(layer: Option<LoggingLayer>) -> LoggingConfig {
	let layer = layer.unwrap_or_default();
	LoggingConfig {
		level: parse_log_level(layer.level.as_deref()),
		format: parse_log_format(layer.format.as_deref()),
	}
}

fn parse_log_level(s: Option<&str>) -> LogLevel {
	match s.map(str::to_ascii_lowercase).as_deref() {
		Some("error") => LogLevel::Error,
		Some("warn") => LogLevel::Warn,
		Some("info") | None => LogLevel::Info,
		Some("debug") => LogLevel::Debug,
		Some("trace") => LogLevel::Trace,
		Some(other) => {
			warn!(level = %other, "unknown log level, using info");
			LogLevel::Info
		}
	}
}

fn parse_log_format(s: Option<&str>) -> LogFormat {
	match s.map(str::to_ascii_lowercase).as_deref() {
		Some("json") => LogFormat::Json,
		Some("pretty") => LogFormat::Pretty,
		Some("compact") | None => LogFormat::Compact,
		Some(other) => {
			warn!(format = %other, "unknown log format, using compact");
			LogFormat::Compact
		}
	}
}
