// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use vellum_cms_core::resolve_locale;

/// Locale for display when `--locale` is not given.
///
/// The operating system locale if supported, else the configured default.
pub fn display_locale(configured_default: &str) -> &'static str {
	let system = sys_locale::get_locale();
	resolve_locale(system.as_deref(), configured_default)
}
