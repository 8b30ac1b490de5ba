// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layers.
//!
//! Every field is optional so a layer only carries what its source actually
//! set. Layers are merged lowest precedence first; a `Some` in a later layer
//! replaces the earlier value.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One source's view of the configuration, as written in `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigLayer {
	pub api: Option<ApiLayer>,
	pub locale: Option<LocaleLayer>,
	pub credentials: Option<CredentialsLayer>,
	pub logging: Option<LoggingLayer>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiLayer {
	pub base_url: Option<String>,
	pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleLayer {
	pub default: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialsLayer {
	pub token_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingLayer {
	pub level: Option<String>,
	pub format: Option<String>,
}

fn merge_opt<T>(base: &mut Option<T>, other: Option<T>) {
	if other.is_some() {
		*base = other;
	}
}

impl ConfigLayer {
	/// Merge `other` on top of `self`.
	pub fn merge(&mut self, other: ConfigLayer) {
		if let Some(api) = other.api {
			self.api.get_or_insert_with(ApiLayer::default).merge(api);
		}
		if let Some(locale) = other.locale {
			merge_opt(
				&mut self.locale.get_or_insert_with(LocaleLayer::default).default,
				locale.default,
			);
		}
		if let Some(credentials) = other.credentials {
			merge_opt(
				&mut self
					.credentials
					.get_or_insert_with(CredentialsLayer::default)
					.token_path,
				credentials.token_path,
			);
		}
		if let Some(logging) = other.logging {
			self.logging
				.get_or_insert_with(LoggingLayer::default)
				.merge(logging);
		}
	}
}

impl ApiLayer {
	fn merge(&mut self, other: ApiLayer) {
		merge_opt(&mut self.base_url, other.base_url);
		merge_opt(&mut self.request_timeout_secs, other.request_timeout_secs);
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		merge_opt(&mut self.level, other.level);
		merge_opt(&mut self.format, other.format);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn parses_partial_toml() {
		let layer: ConfigLayer = toml::from_str(
			r#"
[api]
base_url = "https://cms.example.org"

[logging]
format = "json"
"#,
		)
		.unwrap();

		let api = layer.api.unwrap();
		assert_eq!(api.base_url.as_deref(), Some("https://cms.example.org"));
		assert!(api.request_timeout_secs.is_none());
		assert!(layer.locale.is_none());
		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("json"));
	}

	#[test]
	fn later_layer_overrides_only_what_it_sets() {
		let mut base = ConfigLayer {
			api: Some(ApiLayer {
				base_url: Some("http://localhost:3000".to_string()),
				request_timeout_secs: Some(30),
			}),
			..Default::default()
		};
		base.merge(ConfigLayer {
			api: Some(ApiLayer {
				base_url: Some("https://cms.example.org".to_string()),
				request_timeout_secs: None,
			}),
			..Default::default()
		});

		let api = base.api.unwrap();
		assert_eq!(api.base_url.as_deref(), Some("https://cms.example.org"));
		assert_eq!(api.request_timeout_secs, Some(30));
	}

	#[test]
	fn merging_empty_layer_is_identity() {
		let mut layer = ConfigLayer {
			locale: Some(LocaleLayer {
				default: Some("en".to_string()),
			}),
			..Default::default()
		};
		let before = layer.clone();
		layer.merge(ConfigLayer::default());
		assert_eq!(layer, before);
	}

	proptest! {
		#[test]
		fn merge_keeps_last_set_timeout(values in prop::collection::vec(prop::option::of(1u64..600), 0..6)) {
			let mut merged = ConfigLayer::default();
			for value in &values {
				merged.merge(ConfigLayer {
					api: Some(ApiLayer { base_url: None, request_timeout_secs: *value }),
					..Default::default()
				});
			}
			let expected = values.iter().rev().find_map(|v| *v);
			let actual = merged.api.and_then(|a| a.request_timeout_secs);
			prop_assert_eq!(actual, expected);
		}
	}
}
