// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Layered configuration for Vellum.
//!
//! Precedence, lowest to highest:
//!
//! 1. built-in defaults
//! 2. user file (`$XDG_CONFIG_HOME/vellum/config.toml`, or `--config`)
//! 3. `VELLUM_*` environment variables
//! 4. command-line overrides
//!
//! ```toml
//! [api]
//! base_url = "https://cms.example.org"
//! request_timeout_secs = 30
//!
//! [locale]
//! default = "ko"
//!
//! [logging]
//! level = "info"
//! format = "compact"
//! ```

mod error;
pub mod layer;
mod paths;
mod registry;
mod runtime;
mod sources;
mod validation;

pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::{resolve_xdg_paths, PathsConfig};
pub use registry::ConfigRegistry;
pub use runtime::{
	CmsConfig, LogFormat, LogLevel, LoggingConfig, DEFAULT_BASE_URL, DEFAULT_LOCALE,
	DEFAULT_REQUEST_TIMEOUT,
};
pub use sources::{
	CliOverrides, CliSource, ConfigSource, DefaultsSource, EnvSource, FileSource, Precedence,
};
pub use validation::validate_config;

/// Load configuration from defaults, the user file and the environment.
pub fn load_config() -> Result<CmsConfig, ConfigError> {
	load_config_with_cli(CliOverrides::default())
}

/// Load configuration with command-line overrides on top.
///
/// When `overrides.config_file` is set it replaces the user config file.
pub fn load_config_with_cli(overrides: CliOverrides) -> Result<CmsConfig, ConfigError> {
	let paths = resolve_xdg_paths()?;

	let file = match overrides.config_file.clone() {
		Some(path) => FileSource::custom(path, Precedence::UserFile, "cli-config-file"),
		None => FileSource::user(&paths),
	};

	let mut registry = ConfigRegistry::new();
	registry.register(Box::new(DefaultsSource));
	registry.register(Box::new(file));
	registry.register(Box::new(EnvSource::new()));
	registry.register(Box::new(CliSource::new(overrides)));

	registry.load(paths)
}
