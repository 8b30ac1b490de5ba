// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission-string matching.
//!
//! Permissions are dot-segmented paths such as `event.create`. A granted set
//! may contain exact strings, wildcard suffixes (`event.*`, `admin.posts.*`)
//! or the global wildcard `*`. All checks are pure functions over the set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Grants every permission.
pub const GLOBAL_WILDCARD: &str = "*";

/// The permissions granted to the current session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}

	/// Check a single permission.
	///
	/// Resolution order:
	/// 1. the global wildcard
	/// 2. the exact string
	/// 3. `prefix.*` for every proper, non-empty prefix, longest first
	///
	/// A wildcard never matches its own prefix: `a.b.*` grants `a.b.c` but
	/// not `a.b`. A single-segment permission only matches exactly or through
	/// the global wildcard.
	pub fn has_permission(&self, permission: &str) -> bool {
		if self.0.contains(GLOBAL_WILDCARD) {
			return true;
		}

		if self.0.contains(permission) {
			return true;
		}

		let segments: Vec<&str> = permission.split('.').collect();
		for len in (1..segments.len()).rev() {
			let wildcard = format!("{}.*", segments[..len].join("."));
			if self.0.contains(&wildcard) {
				return true;
			}
		}

		false
	}

	/// True if at least one of `permissions` is granted.
	pub fn has_any_permission<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
		permissions.iter().any(|p| self.has_permission(p.as_ref()))
	}

	/// True if every one of `permissions` is granted. Vacuously true for an
	/// empty list.
	pub fn has_all_permissions<S: AsRef<str>>(&self, permissions: &[S]) -> bool {
		permissions.iter().all(|p| self.has_permission(p.as_ref()))
	}
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(iter.into_iter().map(Into::into).collect())
	}
}
