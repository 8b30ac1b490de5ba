// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: defaults, user file, environment, CLI.

use std::path::PathBuf;

use tracing::{debug, trace, warn};

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	UserFile = 30,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Defaults are applied in CmsConfig::from_layer
		Ok(ConfigLayer::default())
	}
}

/// TOML file source.
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
}

impl FileSource {
	/// User config: ~/.config/vellum/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self::custom(paths.user_config_file.clone(), Precedence::UserFile, "user-config")
	}

	/// Explicit file path, e.g. from `--config`.
	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Reads `VELLUM_BASE_URL`, `VELLUM_DEFAULT_LOCALE`,
/// `VELLUM_REQUEST_TIMEOUT_SECS`, `VELLUM_TOKEN_PATH`, `VELLUM_LOG_LEVEL` and
/// `VELLUM_LOG_FORMAT`. Empty values are ignored.
pub struct EnvSource {
	vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
	/// Read from the process environment at load time.
	pub fn new() -> Self {
		Self { vars: None }
	}

	/// Read from a fixed set of variables instead of the process environment.
	pub fn from_vars<I, K, V>(vars: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			vars: Some(
				vars
					.into_iter()
					.map(|(k, v)| (k.into(), v.into()))
					.collect(),
			),
		}
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		let mut layer = ConfigLayer::default();

		let vars: Vec<(String, String)> = match &self.vars {
			Some(vars) => vars.clone(),
			None => std::env::vars().collect(),
		};

		for (key, value) in vars {
			if !key.starts_with("VELLUM_") {
				continue;
			}

			let value = value.trim().to_string();
			if value.is_empty() {
				continue;
			}

			trace!(key = %key, "processing env var");

			match key.as_str() {
				"VELLUM_BASE_URL" => {
					layer.api.get_or_insert_with(ApiLayer::default).base_url = Some(value);
				}
				"VELLUM_REQUEST_TIMEOUT_SECS" => match value.parse() {
					Ok(secs) => {
						layer
							.api
							.get_or_insert_with(ApiLayer::default)
							.request_timeout_secs = Some(secs);
					}
					Err(_) => {
						return Err(ConfigError::invalid_value(
							"VELLUM_REQUEST_TIMEOUT_SECS",
							format!("expected whole seconds, got {value:?}"),
						));
					}
				},
				"VELLUM_DEFAULT_LOCALE" => {
					layer.locale.get_or_insert_with(LocaleLayer::default).default = Some(value);
				}
				"VELLUM_TOKEN_PATH" => {
					layer
						.credentials
						.get_or_insert_with(CredentialsLayer::default)
						.token_path = Some(PathBuf::from(value));
				}
				"VELLUM_LOG_LEVEL" => {
					layer
						.logging
						.get_or_insert_with(LoggingLayer::default)
						.level = Some(value);
				}
				"VELLUM_LOG_FORMAT" => {
					layer
						.logging
						.get_or_insert_with(LoggingLayer::default)
						.format = Some(value);
				}
				_ => {
					warn!(key = %key, "ignoring unknown VELLUM_ environment variable");
				}
			}
		}

		Ok(layer)
	}
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub base_url: Option<String>,
	pub default_locale: Option<String>,
	pub token_path: Option<PathBuf>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
	pub config_file: Option<PathBuf>,
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = ConfigLayer::default();
		let o = &self.overrides;

		if let Some(ref base_url) = o.base_url {
			layer.api.get_or_insert_with(ApiLayer::default).base_url = Some(base_url.clone());
		}

		if let Some(ref locale) = o.default_locale {
			layer.locale.get_or_insert_with(LocaleLayer::default).default = Some(locale.clone());
		}

		if let Some(ref path) = o.token_path {
			layer
				.credentials
				.get_or_insert_with(CredentialsLayer::default)
				.token_path = Some(path.clone());
		}

		if let Some(ref level) = o.log_level {
			layer
				.logging
				.get_or_insert_with(LoggingLayer::default)
				.level = Some(level.clone());
		}

		if let Some(ref format) = o.log_format {
			layer
				.logging
				.get_or_insert_with(LoggingLayer::default)
				.format = Some(format.clone());
		}

		Ok(layer)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;

	#[test]
	fn test_precedence_ordering() {
		assert!(Precedence::Cli > Precedence::Environment);
		assert!(Precedence::Environment > Precedence::UserFile);
		assert!(Precedence::UserFile > Precedence::Defaults);
	}

	#[test]
	fn test_file_source_missing_file_returns_empty() {
		let source = FileSource::custom(
			PathBuf::from("/nonexistent/vellum/config.toml"),
			Precedence::UserFile,
			"test",
		);
		assert_eq!(source.load().unwrap(), ConfigLayer::default());
	}

	#[test]
	fn test_file_source_reports_parse_errors_with_path() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		writeln!(file, "[api\nbase_url = ").unwrap();

		let source = FileSource::custom(file.path().to_path_buf(), Precedence::UserFile, "test");
		match source.load() {
			Err(ConfigError::TomlParse { path, .. }) => assert_eq!(path, file.path()),
			other => panic!("expected TomlParse, got {other:?}"),
		}
	}

	#[test]
	fn test_env_source_maps_known_variables() {
		let source = EnvSource::from_vars([
			("VELLUM_BASE_URL", "https://cms.example.org"),
			("VELLUM_REQUEST_TIMEOUT_SECS", "45"),
			("VELLUM_DEFAULT_LOCALE", "en"),
			("VELLUM_TOKEN_PATH", "/tmp/vellum/credentials.json"),
			("VELLUM_LOG_LEVEL", "debug"),
			("VELLUM_LOG_FORMAT", "json"),
			("HOME", "/root"),
		]);
		let layer = source.load().unwrap();

		let api = layer.api.unwrap();
		assert_eq!(api.base_url.as_deref(), Some("https://cms.example.org"));
		assert_eq!(api.request_timeout_secs, Some(45));
		assert_eq!(layer.locale.unwrap().default.as_deref(), Some("en"));
		assert_eq!(
			layer.credentials.unwrap().token_path,
			Some(PathBuf::from("/tmp/vellum/credentials.json"))
		);
		let logging = layer.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("debug"));
		assert_eq!(logging.format.as_deref(), Some("json"));
	}

	#[test]
	fn test_env_source_ignores_blank_values() {
		let layer = EnvSource::from_vars([("VELLUM_BASE_URL", "   ")]).load().unwrap();
		assert!(layer.api.is_none());
	}

	#[test]
	fn test_env_source_rejects_non_numeric_timeout() {
		let err = EnvSource::from_vars([("VELLUM_REQUEST_TIMEOUT_SECS", "soon")])
			.load()
			.unwrap_err();
		assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "VELLUM_REQUEST_TIMEOUT_SECS"));
	}

	#[test]
	fn test_cli_source_sets_only_given_fields() {
		let layer = CliSource::new(CliOverrides {
			log_level: Some("trace".to_string()),
			..Default::default()
		})
		.load()
		.unwrap();
		assert!(layer.api.is_none());
		assert_eq!(layer.logging.unwrap().level.as_deref(), Some("trace"));
	}
}
