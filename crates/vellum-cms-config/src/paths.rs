// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

/// Resolved XDG paths for Vellum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/vellum/config.toml
	pub user_config_file: PathBuf,
	/// Token store: ~/.local/share/vellum/credentials.json
	pub credentials_file: PathBuf,
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/vellum/config.toml"),
			credentials_file: PathBuf::from("~/.local/share/vellum/credentials.json"),
		}
	}
}

/// Resolve XDG paths.
///
/// Uses `XDG_CONFIG_HOME` / `XDG_DATA_HOME` when set, otherwise
/// `~/.config` / `~/.local/share`.
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let data_home = std::env::var_os("XDG_DATA_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/share"));

	tracing::debug!(
			config_home = %config_home.display(),
			data_home = %data_home.display(),
			"resolved XDG paths"
	);

	Ok(PathsConfig {
		user_config_file: config_home.join("vellum/config.toml"),
		credentials_file: data_home.join("vellum/credentials.json"),
	})
}
