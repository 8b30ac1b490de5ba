// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! UI locale resolution.
//!
//! This picks the locale a caller should *request*; it does not touch post
//! translations, which fall back through [`crate::get_translation`] and accept
//! any locale string.

/// The site's default language.
pub const DEFAULT_LOCALE: &str = "ko";

/// Locales the public site ships UI strings for.
pub const SUPPORTED_LOCALES: &[&str] = &["ko", "en"];

/// Resolve the effective UI locale.
///
/// Resolution order (highest to lowest priority):
/// 1. `requested` (if supported)
/// 2. `configured_default` (if supported)
/// 3. [`DEFAULT_LOCALE`]
///
/// Matching ignores case and region subtags, so `en-US` resolves to `en`.
///
/// # Example
///
/// ```
/// use vellum_cms_core::resolve_locale;
///
/// assert_eq!(resolve_locale(Some("en-US"), "ko"), "en");
/// assert_eq!(resolve_locale(None, "en"), "en");
/// assert_eq!(resolve_locale(Some("fr"), "de"), "ko");
/// ```
pub fn resolve_locale(requested: Option<&str>, configured_default: &str) -> &'static str {
	if let Some(locale) = requested.and_then(supported) {
		return locale;
	}

	supported(configured_default).unwrap_or(DEFAULT_LOCALE)
}

fn supported(locale: &str) -> Option<&'static str> {
	let primary = locale.split(['-', '_']).next().unwrap_or_default();
	SUPPORTED_LOCALES
		.iter()
		.copied()
		.find(|l| l.eq_ignore_ascii_case(primary))
}
